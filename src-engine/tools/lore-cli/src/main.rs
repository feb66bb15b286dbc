// FICHIER : src-engine/tools/lore-cli/src/main.rs

use clap::{Parser, Subcommand};

mod commands;

use lore_engine::{
    user_error,
    utils::{context, prelude::*},
};

#[derive(Parser)]
#[command(name = "lore-cli")]
#[command(about = "CLI du moteur Lore : évolution génétique et sociétés d'agents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Évolution d'une population avec une fitness intégrée
    Evolve(commands::evolve::EvolveArgs),

    /// Simulation d'une société d'agents intelligents
    Society(commands::society::SocietyArgs),

    /// Version et environnement d'exécution
    Info(commands::info::InfoArgs),
}

fn main() {
    // 1. Configuration (CRITIQUE)
    if let Err(e) = AppConfig::init() {
        eprintln!("❌ CRITICAL ERROR: Impossible d'initialiser la configuration.");
        eprintln!("   Détails : {}", e);
        std::process::exit(1);
    }

    // 2. Logger
    context::init_logging();

    // 3. Parsing & Dispatch
    let cli = Cli::parse();
    if let Err(e) = execute_command(cli.command) {
        user_error!("CMD_FAIL", "{}", e);
        std::process::exit(1);
    }

    tracing::debug!("Fin de l'exécution du CLI");
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Evolve(args) => commands::evolve::handle(args),
        Commands::Society(args) => commands::society::handle(args),
        Commands::Info(args) => commands::info::handle(args),
    }
}
