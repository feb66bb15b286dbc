// FICHIER : src-engine/src/society/cycle.rs

use super::graph::AgentSociety;
use crate::agents::{create_agent_with_neural_brain, BehaviorType, CognitiveState, IntelligentAgent, XP_PER_LEVEL};
use crate::genetics::{GeneticEngine, Population};
use crate::utils::{prelude::*, HashMap};
use rand::RngCore;

/// Poids du degré social dans la fitness réalisée.
const DEGREE_WEIGHT: f64 = 0.1;

impl AgentSociety {
    /// Génomes des agents, notés par ce qu'ils ont réellement accompli :
    /// `capacité + 0.1 × degré + expérience / XP_PER_LEVEL`.
    pub fn realized_population(&self) -> Population {
        let genomes: Vec<_> = self
            .agents()
            .map(|agent| {
                let mut genome = agent.genome().clone();
                genome.set_fitness(
                    agent.cognition().capacity()
                        + DEGREE_WEIGHT * agent.social_connections() as f64
                        + agent.experience_points() as f64 / XP_PER_LEVEL as f64,
                );
                genome
            })
            .collect();
        let generation = genomes.iter().map(|g| g.generation).max().unwrap_or(0);
        Population::new(genomes, generation)
    }
}

/// Fait évoluer les génomes d'une société sur une génération et renvoie une
/// nouvelle société d'agents neufs.
///
/// Chaque génome retrouve l'agent dont il provient : les élites par leur propre
/// identifiant, les enfants par leur premier parent. L'archétype et l'architecture
/// du cerveau de cet agent sont repris, la cognition est dérivée des gènes.
/// La société d'origine n'est pas modifiée.
#[instrument(skip_all, fields(agents = society.len()))]
pub fn run_evolution_cycle(
    society: &AgentSociety,
    engine: &mut GeneticEngine,
    rng: &mut dyn RngCore,
) -> Result<AgentSociety> {
    if society.is_empty() {
        return Err(AppError::Precondition(
            "cycle d'évolution sur une société vide".to_string(),
        ));
    }

    let population = society.realized_population();
    // Toute la population est déjà notée : l'évaluateur n'est jamais sollicité
    let realized = |_genes: &[f64]| -> Result<f64> {
        Err(AppError::Precondition(
            "génome sans fitness réalisée".to_string(),
        ))
    };
    let next = engine.evolve_generation(&population, &realized, rng)?;

    let templates: Vec<(BehaviorType, Option<Vec<usize>>)> = society
        .agents()
        .map(|agent| (agent.behavior(), agent.brain().map(|b| b.architecture())))
        .collect();
    let by_genome: HashMap<Uuid, usize> = society
        .agents()
        .enumerate()
        .map(|(i, agent)| (agent.genome().id(), i))
        .collect();

    let mut offspring = Vec::with_capacity(next.len());
    for (i, genome) in next.genomes.into_iter().enumerate() {
        let source = std::iter::once(genome.id())
            .chain(genome.parent_ids.first().copied())
            .find_map(|id| by_genome.get(&id).copied())
            .unwrap_or(i % templates.len());
        let (behavior, architecture) = &templates[source];
        let id = format!("agent-g{}-{:03}", next.generation, i);
        let agent = match architecture {
            Some(arch) => create_agent_with_neural_brain(id, genome, *behavior, arch, &mut *rng)?,
            None => {
                let cognition = CognitiveState::from_genes(&genome.genes);
                IntelligentAgent::new(id, genome, *behavior, cognition)?
            }
        };
        offspring.push(agent);
    }

    info!(
        "Cycle d'évolution : {} agents -> {} agents (génération {})",
        society.len(),
        offspring.len(),
        next.generation
    );
    AgentSociety::with_agents(offspring)
}
