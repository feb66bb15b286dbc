pub mod dto;
pub mod engine;
pub mod evaluators;
pub mod operators;
pub mod traits;
pub mod types;

pub use dto::{EvolutionOutcome, GenerationReport, TerminationReason};
pub use engine::{EngineState, GeneticEngine};
pub use evaluators::{BuiltinFitness, NeuralFitness, Rastrigin, Sphere, TargetVector};
pub use operators::{
    crossover, initialize_population, mutate, parallel_crossover, parallel_mutation,
    select_tournament,
};
pub use traits::FitnessEvaluator;
pub use types::{EvolutionParams, Genome, Population, PopulationStats, MAX_GENE_COUNT};
