// FICHIER : src-engine/src/genetics/operators/selection.rs

use crate::genetics::types::{compare_by_fitness, Genome};
use crate::utils::prelude::*;
use rand::prelude::*;
use rand::seq::index;

/// Stratégie de choix d'un parent dans une population évaluée.
pub trait SelectionStrategy: Send + Sync {
    fn select<'a>(&self, rng: &mut dyn RngCore, population: &'a [Genome]) -> Result<&'a Genome>;
}

pub struct TournamentSelection {
    pub tournament_size: usize,
}

impl TournamentSelection {
    pub fn new(size: usize) -> Self {
        Self {
            tournament_size: size,
        }
    }
}

impl SelectionStrategy for TournamentSelection {
    fn select<'a>(&self, rng: &mut dyn RngCore, population: &'a [Genome]) -> Result<&'a Genome> {
        select_tournament(population, self.tournament_size, rng)
    }
}

/// Tire `tournament_size` génomes distincts (sans remise) et renvoie le meilleur.
/// Égalités départagées par l'identifiant le plus bas.
pub fn select_tournament<'a>(
    population: &'a [Genome],
    tournament_size: usize,
    rng: &mut dyn RngCore,
) -> Result<&'a Genome> {
    if population.is_empty() {
        return Err(AppError::Precondition(
            "sélection impossible dans une population vide".to_string(),
        ));
    }
    if tournament_size == 0 || tournament_size > population.len() {
        return Err(AppError::Validation(format!(
            "tournament_size doit être entre 1 et {}, reçu {}",
            population.len(),
            tournament_size
        )));
    }

    let mut winner: Option<&Genome> = None;
    for idx in index::sample(rng, population.len(), tournament_size).iter() {
        let candidate = &population[idx];
        if !candidate.has_fitness() {
            return Err(AppError::Precondition(format!(
                "le génome {} n'a pas de fitness : évaluer avant la sélection",
                candidate.id()
            )));
        }
        winner = match winner {
            Some(best) if compare_by_fitness(best, candidate).is_le() => Some(best),
            _ => Some(candidate),
        };
    }

    winner.ok_or_else(|| AppError::Precondition("tournoi vide".to_string()))
}
