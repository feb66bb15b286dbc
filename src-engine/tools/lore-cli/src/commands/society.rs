// FICHIER : src-engine/tools/lore-cli/src/commands/society.rs

use super::command_rng;
use clap::Args;
use lore_engine::agents::{create_agent_with_neural_brain, BehaviorType, CognitiveState, IntelligentAgent};
use lore_engine::genetics::{initialize_population, EvolutionParams, GeneticEngine};
use lore_engine::society::{run_evolution_cycle, AgentSociety, SocietyStats};
use lore_engine::utils::{io, prelude::*};
use lore_engine::{user_info, user_success};
use rand::RngCore;

/// Simule une société d'agents : rencontres, statistiques, décision collective.
#[derive(Args, Clone, Debug, Default)]
pub struct SocietyArgs {
    /// Nombre d'agents
    #[arg(short, long, default_value = "20")]
    pub agents: usize,

    /// Rencontres tentées par tour (défaut : configuration)
    #[arg(short, long)]
    pub interactions: Option<usize>,

    #[arg(short, long, default_value = "1")]
    pub rounds: usize,

    /// Nombre de gènes par agent
    #[arg(long)]
    pub genes: Option<usize>,

    /// Couches cachées du cerveau des agents, ex. `8,8` (un agent sur deux en est doté).
    /// Défaut : `society.brain_hidden_layers` de la configuration
    #[arg(long, value_delimiter = ',')]
    pub hidden: Option<Vec<usize>>,

    /// Fait évoluer la société entre deux tours
    #[arg(long)]
    pub evolve: bool,

    #[arg(long, env = "LORE_SEED")]
    pub seed: Option<u64>,

    /// Fichier JSON recevant le rapport (écriture atomique)
    #[arg(short, long)]
    pub output: Option<io::PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocietyReport {
    pub rounds: Vec<SocietyStats>,
    pub situation: Vec<f64>,
    pub collective_decision: Vec<f64>,
}

/// Société initiale : archétypes en rotation, cognition dérivée des gènes.
pub fn build_society(
    size: usize,
    gene_count: usize,
    brain: Option<&[usize]>,
    rng: &mut dyn RngCore,
) -> Result<AgentSociety> {
    let population = initialize_population(size, gene_count, &mut *rng)?;
    let mut society = AgentSociety::new();
    for (i, genome) in population.genomes.into_iter().enumerate() {
        let id = format!("agent-{:03}", i);
        let behavior = BehaviorType::ALL[i % BehaviorType::ALL.len()];
        let agent = match brain {
            Some(arch) if i % 2 == 0 => {
                create_agent_with_neural_brain(id, genome, behavior, arch, &mut *rng)?
            }
            _ => {
                let cognition = CognitiveState::from_genes(&genome.genes);
                IntelligentAgent::new(id, genome, behavior, cognition)?
            }
        };
        society.add_agent(agent)?;
    }
    Ok(society)
}

/// Paramètres de configuration, ramenés à la taille de la société : l'évolution
/// conserve le nombre d'agents.
fn society_params(base: &EvolutionParams, size: usize) -> Result<EvolutionParams> {
    EvolutionParams::builder()
        .population_size(size)
        .mutation_rate(base.mutation_rate())
        .crossover_rate(base.crossover_rate())
        .selection_pressure(base.selection_pressure())
        .elitism_count(base.elitism_count().min(size))
        .tournament_size(base.tournament_size().min(size))
        .parallel_threads(base.parallel_threads())
        .build()
}

/// Situation de référence : rampe régulière dans [-0.5, 0.5[.
fn reference_situation(gene_count: usize) -> Vec<f64> {
    (0..gene_count)
        .map(|i| i as f64 / gene_count as f64 - 0.5)
        .collect()
}

/// Architecture complète `[gene_count, cachées..., gene_count]` : entrée et sortie
/// des cerveaux ont la largeur des décisions des agents sans cerveau.
fn brain_architecture(gene_count: usize, hidden: &[usize]) -> Vec<usize> {
    let mut arch = Vec::with_capacity(hidden.len() + 2);
    arch.push(gene_count);
    arch.extend_from_slice(hidden);
    arch.push(gene_count);
    arch
}

pub fn run(args: &SocietyArgs) -> Result<SocietyReport> {
    run_with(args, AppConfig::get())
}

pub fn run_with(args: &SocietyArgs, config: &AppConfig) -> Result<SocietyReport> {
    let gene_count = args.genes.unwrap_or(config.gene_count);
    let interactions = args
        .interactions
        .unwrap_or(config.society.interactions_per_round);
    let brain = args
        .hidden
        .as_deref()
        .or(config.society.brain_hidden_layers.as_deref())
        .map(|hidden| brain_architecture(gene_count, hidden));

    let mut rng = command_rng(args.seed.or(config.seed));
    let mut society = build_society(args.agents, gene_count, brain.as_deref(), &mut rng)?;
    let mut engine = GeneticEngine::new(society_params(&config.evolution, society.len())?)?
        .with_mutation_strength(config.mutation_strength)?;

    let mut rounds = Vec::with_capacity(args.rounds);
    for round in 1..=args.rounds {
        let linked = society.simulate_interactions(interactions, &mut rng)?;
        society.tick_all();
        let stats = society.get_society_stats();
        user_info!(
            "SOCIETY_ROUND",
            "Tour {} : {} liens renforcés | {} arêtes | {} composantes | capacité moyenne {:.3}",
            round,
            linked,
            stats.total_connections,
            stats.components,
            stats.avg_cognitive_capacity
        );
        rounds.push(stats);

        if args.evolve && round < args.rounds {
            society = run_evolution_cycle(&society, &mut engine, &mut rng)?;
        }
    }

    let situation = reference_situation(gene_count);
    let collective_decision = society.collective_decision(&situation)?;
    Ok(SocietyReport {
        rounds,
        situation,
        collective_decision,
    })
}

pub fn handle(args: SocietyArgs) -> Result<()> {
    let report = run(&args)?;
    user_success!(
        "SOCIETY_DONE",
        "Décision collective : {:?}",
        report.collective_decision
    );
    if let Some(path) = &args.output {
        io::write_json_atomic(path, &report)?;
        user_success!("SOCIETY_SAVED", "Rapport écrit dans {}", path.display());
    }
    Ok(())
}
