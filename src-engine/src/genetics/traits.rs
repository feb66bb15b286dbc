// FICHIER : src-engine/src/genetics/traits.rs

use crate::utils::prelude::*;

/// Le trait FitnessEvaluator fait le lien avec le métier.
///
/// Convention : on cherche toujours à MAXIMISER la valeur renvoyée
/// (pour minimiser un coût, renvoyer son opposé).
/// L'évaluation est appelée en parallèle sur toute la population.
pub trait FitnessEvaluator: Send + Sync {
    /// Nom lisible (logs, rapports).
    fn name(&self) -> &str {
        "custom"
    }

    /// Calcule la fitness d'un vecteur de gènes.
    fn evaluate(&self, genes: &[f64]) -> Result<f64>;
}

/// Toute closure `Fn(&[f64]) -> Result<f64>` est un évaluateur.
impl<F> FitnessEvaluator for F
where
    F: Fn(&[f64]) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        self(genes)
    }
}

/// Évalue puis vérifie que le score est exploitable pour le classement.
pub(crate) fn checked_evaluate(evaluator: &dyn FitnessEvaluator, genes: &[f64]) -> Result<f64> {
    let score = evaluator.evaluate(genes).map_err(|e| match e {
        AppError::Evaluation(_) => e,
        other => AppError::Evaluation(format!("{} : {}", evaluator.name(), other)),
    })?;
    if !score.is_finite() {
        return Err(AppError::Evaluation(format!(
            "{} a renvoyé une fitness non finie ({})",
            evaluator.name(),
            score
        )));
    }
    Ok(score)
}
