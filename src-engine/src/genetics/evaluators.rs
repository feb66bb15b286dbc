// FICHIER : src-engine/src/genetics/evaluators.rs

use crate::genetics::traits::FitnessEvaluator;
use crate::neural::network::NeuralNetwork;
use crate::utils::prelude::*;
use std::f64::consts::PI;
use std::str::FromStr;

/// Opposé de la somme des carrés : maximum 0 à l'origine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sphere;

impl FitnessEvaluator for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }

    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        Ok(-genes.iter().map(|g| g * g).sum::<f64>())
    }
}

/// Rastrigin (opposée) : paysage multimodal, maximum 0 à l'origine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rastrigin;

impl FitnessEvaluator for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }

    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        let a = 10.0;
        let value = a * genes.len() as f64
            + genes
                .iter()
                .map(|x| x * x - a * (2.0 * PI * x).cos())
                .sum::<f64>();
        Ok(-value)
    }
}

/// Opposé de la distance euclidienne à un vecteur cible.
#[derive(Debug, Clone)]
pub struct TargetVector {
    target: Vec<f64>,
}

impl TargetVector {
    pub fn new(target: Vec<f64>) -> Result<Self> {
        if target.is_empty() {
            return Err(AppError::Validation("vecteur cible vide".to_string()));
        }
        Ok(Self { target })
    }
}

impl FitnessEvaluator for TargetVector {
    fn name(&self) -> &str {
        "target_vector"
    }

    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        if genes.len() != self.target.len() {
            return Err(AppError::dimension(
                "target_vector",
                self.target.len(),
                genes.len(),
            ));
        }
        let distance = genes
            .iter()
            .zip(self.target.iter())
            .map(|(g, t)| (g - t).powi(2))
            .sum::<f64>()
            .sqrt();
        Ok(-distance)
    }
}

/// Un réseau de neurones comme évaluateur.
///
/// Deux conventions coexistent selon ce que représentent les gènes :
/// l'entrée du réseau (score = moyenne des sorties), ou ses poids
/// (score = opposé de l'erreur quadratique moyenne sur un jeu d'exemples).
#[derive(Debug, Clone)]
pub enum NeuralFitness {
    GenesAsInput {
        network: NeuralNetwork,
    },
    GenesAsWeights {
        template: NeuralNetwork,
        dataset: Vec<(Vec<f64>, Vec<f64>)>,
    },
}

impl NeuralFitness {
    pub fn genes_as_input(network: NeuralNetwork) -> Self {
        NeuralFitness::GenesAsInput { network }
    }

    pub fn genes_as_weights(
        template: NeuralNetwork,
        dataset: Vec<(Vec<f64>, Vec<f64>)>,
    ) -> Result<Self> {
        if dataset.is_empty() {
            return Err(AppError::Validation(
                "jeu d'exemples vide pour NeuralFitness".to_string(),
            ));
        }
        for (input, expected) in &dataset {
            if input.len() != template.input_size() {
                return Err(AppError::dimension(
                    "exemple (entrée)",
                    template.input_size(),
                    input.len(),
                ));
            }
            if expected.len() != template.output_size() {
                return Err(AppError::dimension(
                    "exemple (sortie attendue)",
                    template.output_size(),
                    expected.len(),
                ));
            }
        }
        Ok(NeuralFitness::GenesAsWeights { template, dataset })
    }

    /// Nombre de gènes attendu par l'évaluateur.
    pub fn expected_gene_count(&self) -> usize {
        match self {
            NeuralFitness::GenesAsInput { network } => network.input_size(),
            NeuralFitness::GenesAsWeights { template, .. } => template.parameter_count(),
        }
    }
}

impl FitnessEvaluator for NeuralFitness {
    fn name(&self) -> &str {
        match self {
            NeuralFitness::GenesAsInput { .. } => "neural_input",
            NeuralFitness::GenesAsWeights { .. } => "neural_weights",
        }
    }

    fn evaluate(&self, genes: &[f64]) -> Result<f64> {
        match self {
            NeuralFitness::GenesAsInput { network } => {
                let output = network.forward(genes)?;
                Ok(output.iter().sum::<f64>() / output.len() as f64)
            }
            NeuralFitness::GenesAsWeights { template, dataset } => {
                let mut network = template.clone();
                network.load_genes(genes)?;

                let mut squared_error = 0.0;
                let mut count = 0usize;
                for (input, expected) in dataset {
                    let output = network.forward(input)?;
                    for (o, e) in output.iter().zip(expected.iter()) {
                        squared_error += (o - e).powi(2);
                        count += 1;
                    }
                }
                Ok(-(squared_error / count.max(1) as f64))
            }
        }
    }
}

/// Fonctions de fitness intégrées, sélectionnables par nom (CLI, configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinFitness {
    #[default]
    Sphere,
    Rastrigin,
}

impl std::fmt::Display for BuiltinFitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BuiltinFitness::Sphere => "sphere",
            BuiltinFitness::Rastrigin => "rastrigin",
        })
    }
}

impl BuiltinFitness {
    pub fn evaluator(self) -> Box<dyn FitnessEvaluator> {
        match self {
            BuiltinFitness::Sphere => Box::new(Sphere),
            BuiltinFitness::Rastrigin => Box::new(Rastrigin),
        }
    }
}

impl FromStr for BuiltinFitness {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sphere" => Ok(BuiltinFitness::Sphere),
            "rastrigin" => Ok(BuiltinFitness::Rastrigin),
            other => Err(AppError::Validation(format!(
                "fonction de fitness inconnue : '{}' (attendu : sphere, rastrigin)",
                other
            ))),
        }
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::neural::activation::ActivationFunction;
    use crate::neural::layer::NeuralLayer;

    #[test]
    fn test_sphere_and_rastrigin_optimum() {
        assert_eq!(Sphere.evaluate(&[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(Sphere.evaluate(&[1.0, -2.0]).unwrap(), -5.0);

        assert!(Rastrigin.evaluate(&[0.0, 0.0, 0.0]).unwrap().abs() < 1e-12);
        assert!(Rastrigin.evaluate(&[0.5, 0.5]).unwrap() < 0.0);
    }

    #[test]
    fn test_target_vector() {
        let eval = TargetVector::new(vec![0.5, 0.5]).unwrap();
        assert_eq!(eval.evaluate(&[0.5, 0.5]).unwrap(), 0.0);
        assert!(eval.evaluate(&[0.5]).is_err());
        assert!(TargetVector::new(vec![]).is_err());
    }

    #[test]
    fn test_neural_fitness_genes_as_input() {
        // Réseau identité 2 -> 2
        let layer = NeuralLayer::from_parts(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 0.0],
            ActivationFunction::Linear,
        )
        .unwrap();
        let network = NeuralNetwork::from_layers(vec![layer]).unwrap();
        let eval = NeuralFitness::genes_as_input(network);

        assert_eq!(eval.expected_gene_count(), 2);
        assert!((eval.evaluate(&[0.2, 0.4]).unwrap() - 0.3).abs() < 1e-12);
        assert!(eval.evaluate(&[0.2]).is_err());
    }

    #[test]
    fn test_neural_fitness_genes_as_weights() {
        let template = NeuralNetwork::from_layers(vec![NeuralLayer::from_parts(
            vec![vec![0.0]],
            vec![0.0],
            ActivationFunction::Linear,
        )
        .unwrap()])
        .unwrap();
        // Cible : y = 2x
        let dataset = vec![(vec![1.0], vec![2.0]), (vec![-1.0], vec![-2.0])];
        let eval = NeuralFitness::genes_as_weights(template, dataset).unwrap();

        assert_eq!(eval.expected_gene_count(), 2);
        assert_eq!(eval.evaluate(&[2.0, 0.0]).unwrap(), 0.0);
        assert!(eval.evaluate(&[0.0, 0.0]).unwrap() < 0.0);
        assert!(eval.evaluate(&[1.0]).is_err());
    }

    #[test]
    fn test_builtin_parsing() {
        assert_eq!("Sphere".parse::<BuiltinFitness>().unwrap(), BuiltinFitness::Sphere);
        assert_eq!(
            BuiltinFitness::Rastrigin.evaluator().name(),
            "rastrigin"
        );
        assert!("ackley".parse::<BuiltinFitness>().is_err());
    }
}
