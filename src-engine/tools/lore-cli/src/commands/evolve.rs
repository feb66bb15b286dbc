// FICHIER : src-engine/tools/lore-cli/src/commands/evolve.rs

use super::command_rng;
use clap::Args;
use lore_engine::genetics::{
    initialize_population, BuiltinFitness, EvolutionOutcome, EvolutionParams, GeneticEngine,
};
use lore_engine::utils::{io, prelude::*};
use lore_engine::{user_info, user_success};

/// Lance une évolution avec une fonction de fitness intégrée.
/// Les options absentes reprennent la configuration (`evolution`, `gene_count`...).
#[derive(Args, Clone, Debug, Default)]
pub struct EvolveArgs {
    /// Taille de la population
    #[arg(short, long)]
    pub population: Option<usize>,

    /// Nombre maximal de générations
    #[arg(short, long)]
    pub generations: Option<u64>,

    /// Taux de mutation (0.0 - 1.0)
    #[arg(short, long)]
    pub mutation_rate: Option<f64>,

    /// Taux de croisement (0.0 - 1.0)
    #[arg(short, long)]
    pub crossover_rate: Option<f64>,

    #[arg(long)]
    pub selection_pressure: Option<f64>,

    /// Nombre d'élites conservées à chaque génération
    #[arg(short, long)]
    pub elitism: Option<usize>,

    #[arg(short, long)]
    pub tournament: Option<usize>,

    /// Arrêt anticipé dès que la meilleure fitness atteint cette valeur
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<f64>,

    /// Threads du pool dédié (par défaut : pool global rayon)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Écart-type du bruit gaussien de mutation
    #[arg(long)]
    pub strength: Option<f64>,

    /// Nombre de gènes par génome
    #[arg(long)]
    pub genes: Option<usize>,

    #[arg(long, env = "LORE_SEED")]
    pub seed: Option<u64>,

    /// sphere | rastrigin
    #[arg(short, long, default_value = "sphere")]
    pub fitness: BuiltinFitness,

    /// Fichier JSON recevant le résultat complet (écriture atomique)
    #[arg(short, long)]
    pub output: Option<io::PathBuf>,
}

/// Superpose les options de la ligne de commande aux paramètres de base.
pub fn build_params(args: &EvolveArgs, base: &EvolutionParams) -> Result<EvolutionParams> {
    let population = args.population.unwrap_or(base.population_size());
    EvolutionParams::builder()
        .population_size(population)
        .mutation_rate(args.mutation_rate.unwrap_or(base.mutation_rate()))
        .crossover_rate(args.crossover_rate.unwrap_or(base.crossover_rate()))
        .selection_pressure(args.selection_pressure.unwrap_or(base.selection_pressure()))
        .elitism_count(args.elitism.unwrap_or(base.elitism_count().min(population)))
        .max_generations(args.generations.unwrap_or(base.max_generations()))
        .tournament_size(args.tournament.unwrap_or(base.tournament_size().min(population)))
        .target_fitness(args.target.or(base.target_fitness()))
        .parallel_threads(args.threads.or(base.parallel_threads()))
        .build()
}

/// Exécute l'évolution et renvoie le résultat complet.
pub fn run(args: &EvolveArgs) -> Result<EvolutionOutcome> {
    let config = AppConfig::get();
    let params = build_params(args, &config.evolution)?;
    let gene_count = args.genes.unwrap_or(config.gene_count);
    let strength = args.strength.unwrap_or(config.mutation_strength);

    let mut rng = command_rng(args.seed);
    let initial = initialize_population(params.population_size(), gene_count, &mut rng)?;
    let mut engine = GeneticEngine::new(params)?.with_mutation_strength(strength)?;
    let evaluator = args.fitness.evaluator();

    user_info!(
        "EVOLVE_START",
        "Évolution '{}' : {} génomes x {} gènes, {} générations max",
        args.fitness,
        engine.params().population_size(),
        gene_count,
        engine.params().max_generations()
    );

    engine.run_with(initial, evaluator.as_ref(), &mut rng, |report| {
        user_info!(
            "EVOLVE_GENERATION",
            "  gen {:>4} | best {:>12.6} | mean {:>12.6} | diversité {:.4}",
            report.generation,
            report.best_fitness,
            report.mean_fitness,
            report.diversity_index
        );
    })
}

pub fn handle(args: EvolveArgs) -> Result<()> {
    let outcome = run(&args)?;

    user_success!(
        "EVOLVE_DONE",
        "Terminé ({:?}) : {} générations, {} évaluations, meilleure fitness {:.6}",
        outcome.termination,
        outcome.generations(),
        outcome.total_evaluations,
        outcome.best.as_ref().and_then(|b| b.fitness).unwrap_or(f64::NAN)
    );

    if let Some(path) = &args.output {
        io::write_json_atomic(path, &outcome)?;
        user_success!("EVOLVE_SAVED", "Résultat écrit dans {}", path.display());
    }
    Ok(())
}
