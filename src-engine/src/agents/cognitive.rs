// FICHIER : src-engine/src/agents/cognitive.rs

use crate::utils::prelude::*;
use rand::prelude::*;
use std::str::FromStr;

/// Ajustement maximal d'un trait par expérience.
const MAX_ADJUSTMENT: f64 = 0.1;
/// Valeur d'un trait quand le génome est trop court pour le fournir.
const DEFAULT_TRAIT: f64 = 0.5;

pub const TRAIT_COUNT: usize = 6;

/// Profil cognitif : six traits bornés à [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CognitiveState {
    reasoning: f64,
    creativity: f64,
    sociability: f64,
    stability: f64,
    adaptability: f64,
    focus: f64,
}

/// Nature d'une expérience vécue, pour `CognitiveState::adjust`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    Learning,
    Social,
    Creative,
    Stress,
}

impl FromStr for ExperienceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "learning" => Ok(ExperienceKind::Learning),
            "social" => Ok(ExperienceKind::Social),
            "creative" => Ok(ExperienceKind::Creative),
            "stress" => Ok(ExperienceKind::Stress),
            other => Err(AppError::Validation(format!(
                "type d'expérience inconnu : '{}'",
                other
            ))),
        }
    }
}

impl CognitiveState {
    /// Les valeurs hors [0, 1] sont ramenées dans l'intervalle ; NaN est refusé.
    pub fn new(
        reasoning: f64,
        creativity: f64,
        sociability: f64,
        stability: f64,
        adaptability: f64,
        focus: f64,
    ) -> Result<Self> {
        let traits = [reasoning, creativity, sociability, stability, adaptability, focus];
        if traits.iter().any(|t| t.is_nan()) {
            return Err(AppError::Validation(format!(
                "trait cognitif NaN : {:?}",
                traits
            )));
        }
        Ok(Self::from_array(traits.map(|t| t.clamp(0.0, 1.0))))
    }

    fn from_array(t: [f64; TRAIT_COUNT]) -> Self {
        Self {
            reasoning: t[0],
            creativity: t[1],
            sociability: t[2],
            stability: t[3],
            adaptability: t[4],
            focus: t[5],
        }
    }

    pub fn random(rng: &mut dyn RngCore) -> Self {
        Self::from_array(std::array::from_fn(|_| rng.random_range(0.0..=1.0)))
    }

    /// Traits dérivés des six premiers gènes (valeur absolue, bornée à 1).
    pub fn from_genes(genes: &[f64]) -> Self {
        Self::from_array(std::array::from_fn(|i| {
            genes
                .get(i)
                .copied()
                .filter(|g| g.is_finite())
                .map_or(DEFAULT_TRAIT, |g| g.abs().min(1.0))
        }))
    }

    pub fn reasoning(&self) -> f64 {
        self.reasoning
    }
    pub fn creativity(&self) -> f64 {
        self.creativity
    }
    pub fn sociability(&self) -> f64 {
        self.sociability
    }
    pub fn stability(&self) -> f64 {
        self.stability
    }
    pub fn adaptability(&self) -> f64 {
        self.adaptability
    }
    pub fn focus(&self) -> f64 {
        self.focus
    }

    pub fn traits(&self) -> [f64; TRAIT_COUNT] {
        [
            self.reasoning,
            self.creativity,
            self.sociability,
            self.stability,
            self.adaptability,
            self.focus,
        ]
    }

    /// Capacité globale : moyenne des traits, recalculée à chaque lecture.
    pub fn capacity(&self) -> f64 {
        self.traits().iter().sum::<f64>() / TRAIT_COUNT as f64
    }

    /// Fait évoluer les traits concernés ; `intensity` est bornée à ±0.1.
    pub fn adjust(&mut self, kind: ExperienceKind, intensity: f64) {
        if intensity.is_nan() {
            return;
        }
        let adj = intensity.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
        match kind {
            ExperienceKind::Learning => {
                bump(&mut self.reasoning, adj);
                bump(&mut self.adaptability, adj * 0.5);
            }
            ExperienceKind::Social => {
                bump(&mut self.sociability, adj);
                bump(&mut self.stability, adj * 0.3);
            }
            ExperienceKind::Creative => {
                bump(&mut self.creativity, adj);
                bump(&mut self.focus, adj * 0.2);
            }
            ExperienceKind::Stress => {
                bump(&mut self.stability, -adj.abs());
                bump(&mut self.focus, -adj.abs() * 0.5);
            }
        }
    }
}

fn bump(value: &mut f64, delta: f64) {
    *value = (*value + delta).clamp(0.0, 1.0);
}
