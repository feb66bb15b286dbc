// FICHIER : src-engine/src/genetics/operators/initialization.rs

use super::derive_seeds;
use crate::genetics::types::{Genome, Population, GENE_MAX, GENE_MIN, MAX_GENE_COUNT};
use crate::utils::prelude::*;
use crate::utils::Instant;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Population aléatoire : gènes tirés uniformément dans [-1, 1], génération 0.
/// La génération des génomes est parallèle (une graine dérivée par génome).
#[instrument(skip(rng))]
pub fn initialize_population(
    size: usize,
    gene_count: usize,
    rng: &mut dyn RngCore,
) -> Result<Population> {
    if size == 0 {
        return Err(AppError::Validation(
            "la taille de population doit être > 0".to_string(),
        ));
    }
    if gene_count == 0 || gene_count > MAX_GENE_COUNT {
        return Err(AppError::Validation(format!(
            "gene_count doit être entre 1 et {}, reçu {}",
            MAX_GENE_COUNT, gene_count
        )));
    }

    let timer = Instant::now();
    let seeds = derive_seeds(rng, size);

    let genomes: Vec<Genome> = seeds
        .par_iter()
        .map(|&seed| {
            let mut local = StdRng::seed_from_u64(seed);
            let genes: Vec<f64> = (0..gene_count)
                .map(|_| local.random_range(GENE_MIN..=GENE_MAX))
                .collect();
            Genome::new_seeded(genes, &mut local)
        })
        .collect();

    debug!(
        "Population aléatoire de {} génomes ({} gènes) créée en {}ms",
        size,
        gene_count,
        timer.elapsed().as_millis()
    );
    Ok(Population::new(genomes, 0))
}
