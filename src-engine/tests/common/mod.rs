// FICHIER : src-engine/tests/common/mod.rs

use lore_engine::agents::{create_agent_with_neural_brain, BehaviorType, CognitiveState, IntelligentAgent};
use lore_engine::genetics::initialize_population;
use lore_engine::society::AgentSociety;
use lore_engine::utils::config::test_mocks::inject_mock_config;
use lore_engine::utils::Once;
use rand::rngs::StdRng;
use rand::SeedableRng;

static INIT: Once = Once::new();

/// Logs vers la sortie de test + configuration par défaut, une seule fois par binaire.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        inject_mock_config();
    });
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Société reproductible : archétypes en rotation, un agent sur deux avec cerveau.
#[allow(dead_code)]
pub fn sample_society(size: usize, gene_count: usize, seed: u64) -> AgentSociety {
    let mut rng = seeded(seed);
    let population =
        initialize_population(size, gene_count, &mut rng).expect("population de test");

    let mut society = AgentSociety::new();
    for (i, genome) in population.genomes.into_iter().enumerate() {
        let id = format!("agent-{:02}", i);
        let behavior = BehaviorType::ALL[i % BehaviorType::ALL.len()];
        let agent = if i % 2 == 0 {
            create_agent_with_neural_brain(id, genome, behavior, &[gene_count, 8, gene_count], &mut rng)
                .expect("agent neuronal de test")
        } else {
            let cognition = CognitiveState::from_genes(&genome.genes);
            IntelligentAgent::new(id, genome, behavior, cognition).expect("agent de test")
        };
        society.add_agent(agent).expect("identifiants uniques");
    }
    society
}
