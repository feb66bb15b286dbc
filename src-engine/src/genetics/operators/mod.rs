// FICHIER : src-engine/src/genetics/operators/mod.rs

pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod selection;

pub use crossover::{crossover, parallel_crossover, uniform_crossover};
pub use initialization::initialize_population;
pub use mutation::{gaussian_mutation, mutate, parallel_mutation};
pub use selection::{select_tournament, SelectionStrategy, TournamentSelection};

use rand::RngCore;

/// Tire une graine par unité de travail, séquentiellement depuis la source de l'appelant.
/// Chaque unité dispose ensuite de son propre `StdRng` : le résultat ne dépend pas
/// du nombre de threads ni de l'ordonnancement rayon.
pub(crate) fn derive_seeds(rng: &mut dyn RngCore, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.next_u64()).collect()
}
