// FICHIER : src-engine/src/lib.rs

//! Moteur d'évolution d'agents : génomes réels, opérateurs génétiques parallèles,
//! réseaux de neurones feed-forward et société d'agents intelligents.

pub mod utils;

pub mod genetics;
pub mod neural;

pub mod agents;
pub mod society;

// Points d'entrée les plus courants
pub use agents::{BehaviorType, CognitiveState, IntelligentAgent};
pub use genetics::{EvolutionParams, FitnessEvaluator, GeneticEngine, Genome, Population};
pub use neural::{ActivationFunction, NeuralLayer, NeuralNetwork};
pub use society::{AgentSociety, SharedSociety, SocietyStats};
pub use utils::{AppConfig, AppError, Result};
