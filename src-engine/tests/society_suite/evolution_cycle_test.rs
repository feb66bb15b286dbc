// FICHIER : src-engine/tests/society_suite/evolution_cycle_test.rs

use crate::common::{init_test_env, sample_society, seeded};
use lore_engine::genetics::{EvolutionParams, GeneticEngine};
use lore_engine::society::run_evolution_cycle;

#[test]
fn test_several_cycles() {
    init_test_env();
    let mut rng = seeded(77);
    let mut society = sample_society(10, 6, 77);
    let params = EvolutionParams::builder()
        .population_size(10)
        .elitism_count(2)
        .tournament_size(3)
        .build()
        .unwrap();
    let mut engine = GeneticEngine::new(params).unwrap();

    for round in 1..=3u64 {
        society.simulate_interactions(40, &mut rng).unwrap();
        let next = run_evolution_cycle(&society, &mut engine, &mut rng).unwrap();

        assert_eq!(next.len(), 10);
        assert_eq!(engine.generation(), round);
        // Agents neufs : pas d'expérience ni de liens hérités
        assert!(next.agents().all(|a| a.experience_points() == 0));
        assert_eq!(next.edge_count(), 0);
        // Les cerveaux gardent leur architecture
        for agent in next.agents().filter(|a| a.has_brain()) {
            assert_eq!(agent.brain().unwrap().architecture(), vec![6, 8, 6]);
        }
        society = next;
    }

    let population = society.realized_population();
    assert!(population.genomes.iter().all(|g| g.generation <= 3));
    assert!(population.genomes.iter().any(|g| g.generation >= 1));
}
