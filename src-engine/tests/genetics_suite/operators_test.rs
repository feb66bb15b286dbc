// FICHIER : src-engine/tests/genetics_suite/operators_test.rs

use crate::common::seeded;
use lore_engine::genetics::{
    crossover, initialize_population, mutate, parallel_crossover, parallel_mutation,
    select_tournament, EvolutionParams, Genome,
};
use lore_engine::utils::prelude::*;

#[test]
fn test_initialization_properties() {
    let mut rng = seeded(1);
    for (size, gene_count) in [(1, 1), (7, 3), (50, 32)] {
        let population = initialize_population(size, gene_count, &mut rng).unwrap();
        assert_eq!(population.len(), size);
        assert_eq!(population.generation, 0);
        for genome in &population.genomes {
            assert_eq!(genome.gene_count(), gene_count);
            assert!(genome.genes.iter().all(|g| (-1.0..=1.0).contains(g)));
            assert!(genome.fitness.is_none());
            assert_eq!(genome.generation, 0);
            assert_eq!(genome.mutation_count, 0);
        }
    }
    assert!(initialize_population(0, 4, &mut rng).is_err());
    assert!(initialize_population(4, 0, &mut rng).is_err());
}

#[test]
fn test_params_examples() {
    assert!(EvolutionParams::new(0, 0.1, 0.8).is_err());
    assert!(EvolutionParams::new(100, 1.5, 0.8).is_err());
    let params = EvolutionParams::new(100, 0.1, 0.8).unwrap();
    assert_eq!(params.population_size(), 100);
}

#[test]
fn test_crossover_generation_and_fitness_reset() {
    let mut rng = seeded(2);
    let mut a = Genome::new(vec![0.1; 12]);
    let mut b = Genome::new(vec![-0.1; 12]);
    a.generation = 3;
    b.generation = 7;
    a.set_fitness(1.0);
    b.set_fitness(2.0);

    let (c1, c2) = crossover(&a, &b, 1.0, &mut rng).unwrap();
    for child in [&c1, &c2] {
        assert_eq!(child.gene_count(), 12);
        assert_eq!(child.generation, 8);
        assert!(!child.has_fitness());
    }

    let (k1, k2) = crossover(&a, &b, 0.0, &mut rng).unwrap();
    assert_eq!(k1.genes, a.genes);
    assert_eq!(k2.genes, b.genes);
    assert_ne!(k1.id(), a.id());
    assert!(!k1.has_fitness() && !k2.has_fitness());

    let short = Genome::new(vec![0.0; 3]);
    assert!(matches!(
        crossover(&a, &short, 0.5, &mut rng),
        Err(AppError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_parallel_operators_counts() {
    let mut rng = seeded(3);
    let parents = initialize_population(8, 5, &mut rng).unwrap().genomes;

    let offspring = parallel_crossover(&parents[..5], &parents[3..8], 0.8, &mut rng).unwrap();
    assert_eq!(offspring.len(), 10);
    let uneven = parallel_crossover(&parents[..5], &parents[..2], 0.8, &mut rng).unwrap();
    assert_eq!(uneven.len(), 4);

    let mutated = parallel_mutation(&offspring, 1.0, 0.5, &mut rng).unwrap();
    assert_eq!(mutated.len(), offspring.len());
    for (before, after) in offspring.iter().zip(mutated.iter()) {
        assert_eq!(before.id(), after.id());
        assert_eq!(before.mutation_count, 0);
    }
}

#[test]
fn test_mutation_counts_events_not_genes() {
    let mut rng = seeded(4);
    let mut genome = Genome::new(vec![0.0; 20]);

    assert!(!mutate(&mut genome, 0.0, 0.5, &mut rng).unwrap());
    assert_eq!(genome.mutation_count, 0);

    assert!(mutate(&mut genome, 1.0, 0.5, &mut rng).unwrap());
    assert_eq!(genome.mutation_count, 1);
    assert!(genome.genes.iter().any(|g| *g != 0.0));
}

#[test]
fn test_tournament_requires_fitness() {
    let mut rng = seeded(5);
    let mut population = initialize_population(6, 2, &mut rng).unwrap().genomes;
    assert!(matches!(
        select_tournament(&population, 6, &mut rng),
        Err(AppError::Precondition(_))
    ));

    for (i, genome) in population.iter_mut().enumerate() {
        genome.set_fitness(i as f64);
    }
    let winner = select_tournament(&population, 6, &mut rng).unwrap();
    assert_eq!(winner.fitness, Some(5.0));
}

#[test]
fn test_clone_with_new_id() {
    let mut original = Genome::new(vec![0.3, -0.2]);
    original.set_fitness(0.7);
    let copy = original.clone_with_new_id();
    assert_eq!(copy.genes, original.genes);
    assert_eq!(copy.fitness, original.fitness);
    assert_ne!(copy.id(), original.id());
}
