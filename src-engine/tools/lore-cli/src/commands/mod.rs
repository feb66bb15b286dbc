// FICHIER : src-engine/tools/lore-cli/src/commands/mod.rs

// Un fichier par sous-commande

pub mod evolve;
pub mod info;
pub mod society;

use lore_engine::utils::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Source aléatoire d'une commande : `--seed`, sinon la graine de configuration,
/// sinon l'entropie du système.
pub fn command_rng(seed: Option<u64>) -> StdRng {
    match seed.or_else(|| AppConfig::get().seed) {
        Some(seed) => {
            debug!("Graine fixée : {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
