// FICHIER : src-engine/tests/society_suite/collective_test.rs

use crate::common::{init_test_env, sample_society, seeded};
use lore_engine::society::AgentSociety;
use lore_engine::utils::prelude::*;

#[test]
fn test_empty_society_is_a_documented_error() {
    init_test_env();
    let society = AgentSociety::new();
    assert!(matches!(
        society.collective_decision(&[0.1, 0.2]),
        Err(AppError::Precondition(_))
    ));
    let stats = society.get_society_stats();
    assert_eq!(stats.total_agents, 0);
    assert_eq!(stats.avg_connections, 0.0);
}

#[test]
fn test_collective_decision_after_interactions() {
    init_test_env();
    let mut society = sample_society(10, 4, 31);
    let mut rng = seeded(31);

    let before = society.collective_decision(&[0.5, -0.5, 0.25, 1.0]).unwrap();
    assert_eq!(before.len(), 4);

    let linked = society.simulate_interactions(100, &mut rng).unwrap();
    assert!(linked > 0);
    assert!(society.edge_count() <= 10 * 9 / 2);

    let after = society.collective_decision(&[0.5, -0.5, 0.25, 1.0]).unwrap();
    assert_eq!(after.len(), 4);
    assert!(after.iter().all(|v| v.is_finite()));
}

#[test]
fn test_stats_follow_the_graph() {
    init_test_env();
    let mut society = sample_society(8, 6, 5);
    let mut rng = seeded(5);
    let linked = society.simulate_interactions(60, &mut rng).unwrap();

    let stats = society.get_society_stats();
    assert_eq!(stats.total_agents, 8);
    assert_eq!(stats.total_interactions, 60);
    assert_eq!(stats.total_connections, society.edge_count());
    assert!((stats.avg_connections - 2.0 * society.edge_count() as f64 / 8.0).abs() < 1e-12);
    // Chaque succès rapporte 10 XP aux deux participants
    assert!((stats.avg_experience - (linked as f64 * 20.0) / 8.0).abs() < 1e-9);
    assert_eq!(stats.behavior_distribution.values().sum::<usize>(), 8);
    assert!(stats.components >= 1 && stats.components <= 8);

    for agent in society.agents() {
        assert_eq!(agent.social_connections(), society.neighbors(agent.id()).len());
    }
}

#[test]
fn test_duplicate_agent_rejected_without_side_effect() {
    init_test_env();
    let mut society = sample_society(3, 4, 9);
    let clone = society.get_agent("agent-01").unwrap().clone();
    assert!(matches!(society.add_agent(clone), Err(AppError::DuplicateId(_))));
    assert_eq!(society.len(), 3);
}
