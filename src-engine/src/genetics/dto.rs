// FICHIER : src-engine/src/genetics/dto.rs

use crate::genetics::types::{Genome, Population, PopulationStats};
use crate::utils::prelude::*;

// --- Sorties & Feedback ---

/// Résumé d'une génération évaluée (un par génération parcourue par `run`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationReport {
    pub generation: u64,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub fitness_std: f64,
    pub diversity_index: f64,
    /// Écart de meilleure fitness avec la génération précédente (0 pour la première).
    pub improvement: f64,
    /// Appels cumulés à l'évaluateur depuis la création du moteur.
    pub evaluations: u64,
    pub elapsed_ms: u64,
    pub best_genome_id: Option<Uuid>,
}

impl GenerationReport {
    pub(crate) fn from_stats(
        population: &Population,
        stats: &PopulationStats,
        previous_best: Option<f64>,
        evaluations: u64,
        elapsed_ms: u64,
    ) -> Self {
        let best_fitness = stats.best.unwrap_or_default();
        Self {
            generation: population.generation,
            best_fitness,
            mean_fitness: stats.mean.unwrap_or_default(),
            fitness_std: stats.std.unwrap_or_default(),
            diversity_index: stats.diversity_index,
            improvement: previous_best.map_or(0.0, |prev| best_fitness - prev),
            evaluations,
            elapsed_ms,
            best_genome_id: population.best().map(Genome::id),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    MaxGenerations,
    TargetReached,
}

/// Résultat complet d'un `GeneticEngine::run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub reports: Vec<GenerationReport>,
    pub termination: TerminationReason,
    /// Population finale, entièrement évaluée.
    pub population: Population,
    pub best: Option<Genome>,
    pub total_evaluations: u64,
    pub duration_ms: u64,
}

impl EvolutionOutcome {
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.reports.iter().map(|r| r.best_fitness).collect()
    }

    pub fn generations(&self) -> u64 {
        self.population.generation
    }
}
