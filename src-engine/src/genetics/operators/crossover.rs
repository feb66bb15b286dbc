// FICHIER : src-engine/src/genetics/operators/crossover.rs

use super::derive_seeds;
use crate::genetics::types::{check_rate, Genome};
use crate::utils::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Croisement uniforme : chaque position vient de l'un ou l'autre parent (pile ou face).
/// Les deux enfants sont complémentaires.
pub fn uniform_crossover<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut dyn RngCore,
) -> Result<(Vec<T>, Vec<T>)> {
    if parent1.len() != parent2.len() {
        return Err(AppError::dimension(
            "croisement uniforme",
            parent1.len(),
            parent2.len(),
        ));
    }

    let mut child1 = Vec::with_capacity(parent1.len());
    let mut child2 = Vec::with_capacity(parent1.len());
    for (g1, g2) in parent1.iter().zip(parent2.iter()) {
        if rng.random_bool(0.5) {
            child1.push(g1.clone());
            child2.push(g2.clone());
        } else {
            child1.push(g2.clone());
            child2.push(g1.clone());
        }
    }
    Ok((child1, child2))
}

/// Produit deux enfants à partir de deux parents de même longueur.
///
/// Avec la probabilité `crossover_rate` : croisement uniforme, génération
/// `max(parents) + 1`. Sinon : clones des parents (nouveaux identifiants,
/// génération incrémentée). Dans les deux cas la fitness des enfants est effacée.
pub fn crossover(
    parent_a: &Genome,
    parent_b: &Genome,
    crossover_rate: f64,
    rng: &mut dyn RngCore,
) -> Result<(Genome, Genome)> {
    check_rate("crossover_rate", crossover_rate)?;
    if parent_a.gene_count() != parent_b.gene_count() {
        return Err(AppError::dimension(
            "crossover",
            parent_a.gene_count(),
            parent_b.gene_count(),
        ));
    }

    if rng.random_bool(crossover_rate) {
        let (genes_a, genes_b) = uniform_crossover(&parent_a.genes, &parent_b.genes, rng)?;
        let generation = parent_a.generation.max(parent_b.generation) + 1;
        let lineage = vec![parent_a.id(), parent_b.id()];

        let child_a = Genome::offspring(genes_a, generation, lineage.clone(), rng);
        let child_b = Genome::offspring(genes_b, generation, lineage, rng);
        Ok((child_a, child_b))
    } else {
        Ok((clone_parent(parent_a, rng), clone_parent(parent_b, rng)))
    }
}

fn clone_parent(parent: &Genome, rng: &mut dyn RngCore) -> Genome {
    let mut child = parent.clone_with_id_from(rng);
    child.fitness = None;
    child.generation = parent.generation + 1;
    child.parent_ids = vec![parent.id()];
    child.created_at = Utc::now();
    child
}

/// Croise `parents_a[i]` avec `parents_b[i]` en parallèle.
/// Deux enfants par paire ; les parents au-delà de la liste la plus courte sont ignorés.
#[instrument(skip_all, fields(pairs = parents_a.len().min(parents_b.len())))]
pub fn parallel_crossover(
    parents_a: &[Genome],
    parents_b: &[Genome],
    crossover_rate: f64,
    rng: &mut dyn RngCore,
) -> Result<Vec<Genome>> {
    check_rate("crossover_rate", crossover_rate)?;
    if parents_a.len() != parents_b.len() {
        warn!(
            "Listes de parents de tailles différentes ({} / {}) : appariement tronqué",
            parents_a.len(),
            parents_b.len()
        );
    }

    let pairs = parents_a.len().min(parents_b.len());
    let seeds = derive_seeds(rng, pairs);

    let children: Vec<(Genome, Genome)> = parents_a
        .par_iter()
        .zip(parents_b.par_iter())
        .zip(seeds.par_iter())
        .map(|((a, b), &seed)| {
            let mut local = StdRng::seed_from_u64(seed);
            crossover(a, b, crossover_rate, &mut local)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(children
        .into_iter()
        .flat_map(|(a, b)| [a, b])
        .collect())
}
