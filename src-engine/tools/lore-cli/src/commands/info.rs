// FICHIER : src-engine/tools/lore-cli/src/commands/info.rs

use clap::Args;
use lore_engine::user_info;
use lore_engine::utils::prelude::*;

/// Version, parallélisme disponible et configuration active.
#[derive(Args, Clone, Debug, Default)]
pub struct InfoArgs {
    /// Affiche aussi la configuration complète en JSON
    #[arg(long)]
    pub config: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineInfo {
    pub version: &'static str,
    pub profile: &'static str,
    pub rayon_threads: usize,
    pub env_mode: String,
    pub seed: Option<u64>,
}

pub fn collect() -> EngineInfo {
    let config = AppConfig::get();
    EngineInfo {
        version: env!("CARGO_PKG_VERSION"),
        profile: if cfg!(debug_assertions) { "debug" } else { "release" },
        rayon_threads: rayon::current_num_threads(),
        env_mode: config.core.env_mode.clone(),
        seed: config.seed,
    }
}

pub fn handle(args: InfoArgs) -> Result<()> {
    let info = collect();
    user_info!(
        "INFO",
        "lore-cli v{} ({}) | {} threads | mode {} | graine {:?}",
        info.version,
        info.profile,
        info.rayon_threads,
        info.env_mode,
        info.seed
    );
    if args.config {
        println!("{}", serde_json::to_string_pretty(AppConfig::get())?);
    }
    Ok(())
}
