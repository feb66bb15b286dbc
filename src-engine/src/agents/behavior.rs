// FICHIER : src-engine/src/agents/behavior.rs

use super::cognitive::CognitiveState;
use crate::utils::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Archétype de comportement, fixé à la création de l'agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorType {
    Explorer,
    Socializer,
    Optimizer,
    Creator,
    Analyzer,
}

impl BehaviorType {
    pub const ALL: [BehaviorType; 5] = [
        BehaviorType::Explorer,
        BehaviorType::Socializer,
        BehaviorType::Optimizer,
        BehaviorType::Creator,
        BehaviorType::Analyzer,
    ];

    /// Décision sans réseau : la situation est pondérée élément par élément.
    ///
    /// Poids de base tiré du génome (`1 + 0.5 * gène`), terme propre à l'archétype,
    /// le tout modulé par la capacité cognitive. `situation` et `genes` ont la même longueur.
    pub fn weigh(
        self,
        situation: &[f64],
        genes: &[f64],
        cognition: &CognitiveState,
        social_connections: usize,
    ) -> Vec<f64> {
        let n = situation.len().max(1) as f64;
        let mean = situation.iter().sum::<f64>() / n;
        let capacity = cognition.capacity();
        let social_factor = (1.0 + social_connections as f64).ln() * cognition.sociability();

        situation
            .iter()
            .zip(genes.iter())
            .map(|(&x, &gene)| {
                let base = 1.0 + 0.5 * gene;
                let term = match self {
                    // Amplifie l'écart à la moyenne : recherche de nouveauté
                    BehaviorType::Explorer => x + cognition.creativity() * (x - mean),
                    BehaviorType::Optimizer => x * (1.0 + cognition.focus()),
                    BehaviorType::Socializer => x * (1.0 + social_factor),
                    BehaviorType::Creator => x + cognition.creativity() * gene,
                    BehaviorType::Analyzer => x * (0.5 + 0.5 * cognition.reasoning()),
                };
                base * term * capacity
            })
            .collect()
    }
}

impl fmt::Display for BehaviorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviorType::Explorer => "explorer",
            BehaviorType::Socializer => "socializer",
            BehaviorType::Optimizer => "optimizer",
            BehaviorType::Creator => "creator",
            BehaviorType::Analyzer => "analyzer",
        };
        f.write_str(name)
    }
}

impl FromStr for BehaviorType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        BehaviorType::ALL
            .into_iter()
            .find(|b| b.to_string() == s.trim().to_lowercase())
            .ok_or_else(|| AppError::Validation(format!("comportement inconnu : '{}'", s)))
    }
}
