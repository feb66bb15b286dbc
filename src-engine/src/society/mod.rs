// FICHIER : src-engine/src/society/mod.rs

pub mod cycle;
pub mod graph;
pub mod stats;

pub use cycle::run_evolution_cycle;
pub use graph::{AgentSociety, InteractionKind, SharedSociety, SOCIAL_EXPERIENCE};
pub use stats::SocietyStats;
