// FICHIER : src-engine/tests/neural_suite/evolved_weights_test.rs

use crate::common::{init_test_env, seeded};
use lore_engine::genetics::{initialize_population, EvolutionParams, GeneticEngine, NeuralFitness};
use lore_engine::neural::{create_feedforward, ActivationFunction};

/// Les gènes servent de poids : l'évolution doit réduire l'erreur sur une fonction linéaire.
#[test]
fn test_evolution_reduces_network_error() {
    init_test_env();
    let mut rng = seeded(17);
    let template = create_feedforward(2, &[3], 1, ActivationFunction::Tanh, &mut rng).unwrap();
    let dataset: Vec<(Vec<f64>, Vec<f64>)> = [(-0.5, 0.5), (0.0, 0.0), (0.5, -0.5), (0.25, 0.25)]
        .iter()
        .map(|&(a, b)| (vec![a, b], vec![0.5 * a - 0.25 * b]))
        .collect();
    let fitness = NeuralFitness::genes_as_weights(template, dataset).unwrap();

    let initial = initialize_population(30, fitness.expected_gene_count(), &mut rng).unwrap();
    let params = EvolutionParams::builder()
        .population_size(30)
        .elitism_count(3)
        .max_generations(15)
        .build()
        .unwrap();
    let outcome = GeneticEngine::new(params)
        .unwrap()
        .run(initial, &fitness, &mut rng)
        .unwrap();

    let history = outcome.best_fitness_history();
    assert!(history.iter().all(|f| *f <= 0.0));
    assert!(history.last().unwrap() >= history.first().unwrap());
    assert_eq!(
        outcome.best.unwrap().gene_count(),
        fitness.expected_gene_count()
    );
}

/// Les gènes servent d'entrée : la population est notée par la sortie moyenne du réseau.
#[test]
fn test_genes_as_network_input() {
    init_test_env();
    let mut rng = seeded(23);
    let network = create_feedforward(5, &[4], 2, ActivationFunction::Sigmoid, &mut rng).unwrap();
    let fitness = NeuralFitness::genes_as_input(network);

    let initial = initialize_population(16, 5, &mut rng).unwrap();
    let params = EvolutionParams::builder()
        .population_size(16)
        .elitism_count(1)
        .max_generations(4)
        .build()
        .unwrap();
    let outcome = GeneticEngine::new(params)
        .unwrap()
        .run(initial, &fitness, &mut rng)
        .unwrap();

    // Sortie sigmoïde : score dans [0, 1]
    assert!(outcome.best_fitness_history().iter().all(|f| (0.0..=1.0).contains(f)));
}
