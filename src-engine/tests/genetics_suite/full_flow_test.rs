// FICHIER : src-engine/tests/genetics_suite/full_flow_test.rs

use crate::common::{init_test_env, seeded};
use lore_engine::genetics::{
    initialize_population, EvolutionParams, GeneticEngine, Rastrigin, Sphere, TargetVector,
    TerminationReason,
};
use lore_engine::utils::prelude::*;

fn scenario_params(max_generations: u64) -> EvolutionParams {
    EvolutionParams::builder()
        .population_size(20)
        .mutation_rate(0.1)
        .crossover_rate(0.8)
        .elitism_count(2)
        .tournament_size(3)
        .max_generations(max_generations)
        .build()
        .expect("paramètres du scénario")
}

#[test]
fn test_elitism_gives_monotonic_best_fitness() {
    init_test_env();
    let mut rng = seeded(42);
    let initial = initialize_population(20, 10, &mut rng).unwrap();
    let mut engine = GeneticEngine::new(scenario_params(5)).unwrap();

    let outcome = engine.run(initial, &Sphere, &mut rng).unwrap();

    assert_eq!(outcome.termination, TerminationReason::MaxGenerations);
    assert_eq!(outcome.generations(), 5);
    assert_eq!(engine.generation(), 5);
    let history = outcome.best_fitness_history();
    assert_eq!(history.len(), 6);
    for pair in history.windows(2) {
        assert!(pair[1] >= pair[0], "régression du meilleur : {:?}", history);
    }
    assert_eq!(outcome.population.len(), 20);
    assert!(outcome.population.genomes.iter().all(|g| g.has_fitness()));
}

#[test]
fn test_long_run_improves_rastrigin() {
    init_test_env();
    let mut rng = seeded(7);
    let initial = initialize_population(40, 4, &mut rng).unwrap();
    let mut engine = GeneticEngine::new(
        EvolutionParams::builder()
            .population_size(40)
            .elitism_count(2)
            .max_generations(30)
            .build()
            .unwrap(),
    )
    .unwrap()
    .with_mutation_strength(0.2)
    .unwrap();

    let outcome = engine.run(initial, &Rastrigin, &mut rng).unwrap();
    let history = outcome.best_fitness_history();
    assert!(history.last().unwrap() >= history.first().unwrap());
    // Une évaluation par génome initial, puis une par enfant (les élites sont déjà notées)
    assert_eq!(outcome.total_evaluations, 40 + 30 * 38);
}

#[test]
fn test_target_fitness_stops_early() {
    init_test_env();
    let mut rng = seeded(3);
    let initial = initialize_population(30, 3, &mut rng).unwrap();
    let params = EvolutionParams::builder()
        .population_size(30)
        .max_generations(500)
        // Toute population aléatoire dans [-1, 1]^3 est à moins de 2*sqrt(3) de la cible
        .target_fitness(Some(-3.5))
        .build()
        .unwrap();
    let mut engine = GeneticEngine::new(params).unwrap();

    let target = TargetVector::new(vec![0.0, 0.0, 0.0]).unwrap();
    let outcome = engine.run(initial, &target, &mut rng).unwrap();

    assert_eq!(outcome.termination, TerminationReason::TargetReached);
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(engine.generation(), 0);
}

#[test]
fn test_callback_sees_every_report() {
    init_test_env();
    let mut rng = seeded(11);
    let initial = initialize_population(20, 5, &mut rng).unwrap();
    let mut engine = GeneticEngine::new(scenario_params(3)).unwrap();

    let mut seen = Vec::new();
    let outcome = engine
        .run_with(initial, &Sphere, &mut rng, |report| seen.push(report.generation))
        .unwrap();

    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(outcome.reports.len(), seen.len());
}

#[test]
fn test_failing_evaluator_leaves_population_untouched() {
    init_test_env();
    let mut rng = seeded(5);
    let initial = initialize_population(20, 4, &mut rng).unwrap();
    let snapshot: Vec<Vec<f64>> = initial.genomes.iter().map(|g| g.genes.clone()).collect();
    let mut engine = GeneticEngine::new(scenario_params(5)).unwrap();

    let broken = |_: &[f64]| -> Result<f64> { Err(AppError::from("capteur hors ligne")) };
    let err = engine.evolve_generation(&initial, &broken, &mut rng).unwrap_err();

    assert!(matches!(err, AppError::Evaluation(_)));
    assert_eq!(engine.generation(), 0);
    let after: Vec<Vec<f64>> = initial.genomes.iter().map(|g| g.genes.clone()).collect();
    assert_eq!(snapshot, after);
    assert!(initial.genomes.iter().all(|g| !g.has_fitness()));
}
