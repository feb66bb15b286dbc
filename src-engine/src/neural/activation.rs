// FICHIER : src-engine/src/neural/activation.rs

use crate::utils::prelude::*;
use std::fmt;
use std::str::FromStr;

const LEAKY_SLOPE: f64 = 0.01;

/// Fonctions d'activation disponibles pour une couche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    Sigmoid,
    Tanh,
    LeakyReLU,
    ELU,
    Swish,
    Linear,
}

impl ActivationFunction {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_SLOPE * x
                }
            }
            ActivationFunction::ELU => {
                if x > 0.0 {
                    x
                } else {
                    x.exp_m1()
                }
            }
            ActivationFunction::Swish => x * sigmoid(x),
            ActivationFunction::Linear => x,
        }
    }

    pub fn apply_in_place(self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.apply(*v);
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivationFunction::ReLU => "relu",
            ActivationFunction::Sigmoid => "sigmoid",
            ActivationFunction::Tanh => "tanh",
            ActivationFunction::LeakyReLU => "leaky_relu",
            ActivationFunction::ELU => "elu",
            ActivationFunction::Swish => "swish",
            ActivationFunction::Linear => "linear",
        };
        f.write_str(name)
    }
}

impl FromStr for ActivationFunction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "relu" => Ok(ActivationFunction::ReLU),
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "tanh" => Ok(ActivationFunction::Tanh),
            "leakyrelu" => Ok(ActivationFunction::LeakyReLU),
            "elu" => Ok(ActivationFunction::ELU),
            "swish" => Ok(ActivationFunction::Swish),
            "linear" | "identity" => Ok(ActivationFunction::Linear),
            _ => Err(AppError::Validation(format!(
                "fonction d'activation inconnue : '{}'",
                s
            ))),
        }
    }
}
