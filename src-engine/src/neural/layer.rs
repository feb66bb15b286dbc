// FICHIER : src-engine/src/neural/layer.rs

use super::activation::ActivationFunction;
use crate::utils::prelude::*;
use rand::RngCore;
use rand_distr::{Distribution, Normal};

/// Taille maximale d'une couche (entrée ou sortie).
pub const MAX_LAYER_SIZE: usize = 10_000;

/// Couche dense : `weights` (out × in), `bias` (out), activation.
/// Les formes sont vérifiées à chaque construction ou mise à jour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuralLayer {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    activation: ActivationFunction,
    in_size: usize,
}

impl NeuralLayer {
    /// Initialisation de He : poids ~ N(0, sqrt(2 / in_size)), biais nuls.
    pub fn new(
        in_size: usize,
        out_size: usize,
        activation: ActivationFunction,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        check_size("in_size", in_size)?;
        check_size("out_size", out_size)?;

        let normal = Normal::new(0.0, (2.0 / in_size as f64).sqrt())
            .map_err(|e| AppError::Validation(format!("initialisation de He : {}", e)))?;
        let weights = (0..out_size)
            .map(|_| (0..in_size).map(|_| normal.sample(&mut *rng)).collect())
            .collect();

        Ok(Self {
            weights,
            bias: vec![0.0; out_size],
            activation,
            in_size,
        })
    }

    /// Construit une couche à partir de poids explicites (lignes = neurones de sortie).
    pub fn from_parts(
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
        activation: ActivationFunction,
    ) -> Result<Self> {
        let in_size = weights.first().map(Vec::len).unwrap_or(0);
        check_size("out_size", weights.len())?;
        check_size("in_size", in_size)?;
        check_shape(&weights, &bias, weights.len(), in_size)?;

        Ok(Self {
            weights,
            bias,
            activation,
            in_size,
        })
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.bias.len()
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn bias(&self) -> &[f64] {
        &self.bias
    }

    pub fn parameter_count(&self) -> usize {
        self.in_size * self.out_size() + self.out_size()
    }

    /// `activation(W · x + b)`.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.in_size {
            return Err(AppError::dimension("entrée de couche", self.in_size, input.len()));
        }
        Ok(self
            .weights
            .iter()
            .zip(self.bias.iter())
            .map(|(row, b)| {
                let sum: f64 = row.iter().zip(input.iter()).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + b)
            })
            .collect())
    }

    /// Remplace poids et biais ; la forme doit être identique.
    pub fn update_weights(&mut self, weights: Vec<Vec<f64>>, bias: Vec<f64>) -> Result<()> {
        check_shape(&weights, &bias, self.out_size(), self.in_size)?;
        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    /// Poids (ligne par ligne) puis biais, à plat.
    pub(crate) fn write_parameters(&self, out: &mut Vec<f64>) {
        for row in &self.weights {
            out.extend_from_slice(row);
        }
        out.extend_from_slice(&self.bias);
    }

    /// Lit exactement `parameter_count()` valeurs dans le même ordre que `write_parameters`.
    pub(crate) fn read_parameters(&mut self, values: &[f64]) {
        let (weights, bias) = values.split_at(self.in_size * self.out_size());
        for (row, chunk) in self.weights.iter_mut().zip(weights.chunks(self.in_size)) {
            row.copy_from_slice(chunk);
        }
        self.bias.copy_from_slice(bias);
    }
}

fn check_size(name: &str, size: usize) -> Result<()> {
    if size == 0 || size > MAX_LAYER_SIZE {
        return Err(AppError::Validation(format!(
            "{} doit être entre 1 et {}, reçu {}",
            name, MAX_LAYER_SIZE, size
        )));
    }
    Ok(())
}

fn check_shape(weights: &[Vec<f64>], bias: &[f64], out_size: usize, in_size: usize) -> Result<()> {
    if weights.len() != out_size {
        return Err(AppError::dimension("lignes de poids", out_size, weights.len()));
    }
    if bias.len() != out_size {
        return Err(AppError::dimension("biais", out_size, bias.len()));
    }
    if let Some(row) = weights.iter().find(|row| row.len() != in_size) {
        return Err(AppError::dimension("colonnes de poids", in_size, row.len()));
    }
    Ok(())
}
