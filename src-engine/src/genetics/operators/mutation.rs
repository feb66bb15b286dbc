// FICHIER : src-engine/src/genetics/operators/mutation.rs

use super::derive_seeds;
use crate::genetics::types::{check_rate, Genome, GENE_MAX, GENE_MIN};
use crate::utils::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

/// Bruit gaussien N(0, sigma) ajouté gène par gène avec la probabilité `mutation_rate`,
/// puis ramené dans [-1, 1]. Renvoie le nombre de gènes effectivement modifiés.
///
/// Un gène déjà sur une borne peut rester inchangé après écrêtage.
pub fn gaussian_mutation(
    genes: &mut [f64],
    mutation_rate: f64,
    sigma: f64,
    rng: &mut dyn RngCore,
) -> Result<usize> {
    check_rate("mutation_rate", mutation_rate)?;
    let normal = Normal::new(0.0, sigma).map_err(|e| {
        AppError::Validation(format!("mutation_strength invalide ({}) : {}", sigma, e))
    })?;

    let mut changed = 0;
    for gene in genes.iter_mut() {
        if rng.random_bool(mutation_rate) {
            let mutated = (*gene + normal.sample(&mut *rng)).clamp(GENE_MIN, GENE_MAX);
            if mutated != *gene {
                *gene = mutated;
                changed += 1;
            }
        }
    }
    Ok(changed)
}

/// Mutation en place. `mutation_count` n'augmente que si au moins un gène a changé ;
/// dans ce cas la fitness, devenue obsolète, est effacée.
pub fn mutate(
    genome: &mut Genome,
    mutation_rate: f64,
    mutation_strength: f64,
    rng: &mut dyn RngCore,
) -> Result<bool> {
    let changed = gaussian_mutation(&mut genome.genes, mutation_rate, mutation_strength, rng)?;
    if changed > 0 {
        genome.mutation_count += 1;
        genome.fitness = None;
    }
    Ok(changed > 0)
}

/// Mute une copie de chaque génome en parallèle. L'entrée n'est pas modifiée ;
/// l'ordre et la taille sont conservés.
#[instrument(skip_all, fields(size = population.len()))]
pub fn parallel_mutation(
    population: &[Genome],
    mutation_rate: f64,
    mutation_strength: f64,
    rng: &mut dyn RngCore,
) -> Result<Vec<Genome>> {
    let seeds = derive_seeds(rng, population.len());

    population
        .par_iter()
        .zip(seeds.par_iter())
        .map(|(genome, &seed)| -> Result<Genome> {
            let mut local = StdRng::seed_from_u64(seed);
            let mut copy = genome.clone();
            mutate(&mut copy, mutation_rate, mutation_strength, &mut local)?;
            Ok(copy)
        })
        .collect()
}
