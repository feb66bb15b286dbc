// FICHIER : src-engine/src/neural/network.rs

use super::activation::ActivationFunction;
use super::layer::NeuralLayer;
use crate::utils::prelude::*;
use crate::utils::Instant;
use rand::RngCore;
use rayon::prelude::*;

/// Réseau feed-forward : suite de couches où `out_size(i) == in_size(i + 1)`.
/// L'architecture est figée à la construction ; seuls les poids peuvent changer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuralNetwork {
    layers: Vec<NeuralLayer>,
}

impl NeuralNetwork {
    /// `layer_sizes` inclut l'entrée : `[4, 6, 2]` = deux couches.
    /// Une activation par couche (entrée exclue).
    pub fn new(
        layer_sizes: &[usize],
        activations: &[ActivationFunction],
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(AppError::Validation(format!(
                "au moins une entrée et une sortie sont nécessaires, reçu {:?}",
                layer_sizes
            )));
        }
        if activations.len() != layer_sizes.len() - 1 {
            return Err(AppError::dimension(
                "activations par couche",
                layer_sizes.len() - 1,
                activations.len(),
            ));
        }

        let layers = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(pair, act)| NeuralLayer::new(pair[0], pair[1], *act, &mut *rng))
            .collect::<Result<Vec<_>>>()?;

        debug!("Réseau créé : {:?}", layer_sizes);
        Ok(Self { layers })
    }

    /// Assemble des couches existantes en vérifiant leur enchaînement.
    pub fn from_layers(layers: Vec<NeuralLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(AppError::Validation("réseau sans couche".to_string()));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].out_size() != pair[1].in_size() {
                return Err(AppError::dimension(
                    format!("enchaînement couche {} -> {}", i, i + 1),
                    pair[0].out_size(),
                    pair[1].in_size(),
                ));
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[NeuralLayer] {
        &self.layers
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, NeuralLayer::in_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, NeuralLayer::out_size)
    }

    /// Tailles successives, entrée comprise.
    pub fn architecture(&self) -> Vec<usize> {
        let mut arch = vec![self.input_size()];
        arch.extend(self.layers.iter().map(NeuralLayer::out_size));
        arch
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(NeuralLayer::parameter_count).sum()
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(AppError::dimension(
                "entrée du réseau",
                self.input_size(),
                input.len(),
            ));
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current)?;
        }
        Ok(current)
    }

    /// Propagation d'un lot d'entrées, en parallèle. L'ordre des sorties suit celui des entrées.
    pub fn batch_forward(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let timer = Instant::now();
        let outputs = inputs
            .par_iter()
            .map(|input| self.forward(input))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "batch_forward : {} entrées en {}ms",
            inputs.len(),
            timer.elapsed().as_millis()
        );
        Ok(outputs)
    }

    /// Tous les paramètres à plat : pour chaque couche, poids ligne par ligne puis biais.
    pub fn to_genes(&self) -> Vec<f64> {
        let mut genes = Vec::with_capacity(self.parameter_count());
        for layer in &self.layers {
            layer.write_parameters(&mut genes);
        }
        genes
    }

    /// Inverse de `to_genes`. La longueur doit correspondre exactement.
    pub fn load_genes(&mut self, genes: &[f64]) -> Result<()> {
        let expected = self.parameter_count();
        if genes.len() != expected {
            return Err(AppError::dimension("gènes -> poids", expected, genes.len()));
        }
        let mut offset = 0;
        for layer in &mut self.layers {
            let count = layer.parameter_count();
            layer.read_parameters(&genes[offset..offset + count]);
            offset += count;
        }
        Ok(())
    }
}

/// Réseau dense avec la même activation sur toutes les couches.
pub fn create_feedforward(
    input_size: usize,
    hidden_sizes: &[usize],
    output_size: usize,
    activation: ActivationFunction,
    rng: &mut dyn RngCore,
) -> Result<NeuralNetwork> {
    let mut sizes = Vec::with_capacity(hidden_sizes.len() + 2);
    sizes.push(input_size);
    sizes.extend_from_slice(hidden_sizes);
    sizes.push(output_size);

    let activations = vec![activation; sizes.len() - 1];
    NeuralNetwork::new(&sizes, &activations, rng)
}

/// Moyenne élément par élément des prédictions de plusieurs réseaux.
pub fn ensemble_predict(networks: &[NeuralNetwork], input: &[f64]) -> Result<Vec<f64>> {
    let first = networks.first().ok_or_else(|| {
        AppError::Precondition("ensemble_predict sur un ensemble vide".to_string())
    })?;

    let predictions = networks
        .par_iter()
        .map(|net| net.forward(input))
        .collect::<Result<Vec<_>>>()?;

    let mut averaged = vec![0.0; first.output_size()];
    for prediction in &predictions {
        if prediction.len() != averaged.len() {
            return Err(AppError::dimension(
                "sorties de l'ensemble",
                averaged.len(),
                prediction.len(),
            ));
        }
        for (acc, value) in averaged.iter_mut().zip(prediction.iter()) {
            *acc += value;
        }
    }
    let n = predictions.len() as f64;
    averaged.iter_mut().for_each(|v| *v /= n);
    Ok(averaged)
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn linear(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> NeuralLayer {
        NeuralLayer::from_parts(weights, bias, ActivationFunction::Linear).unwrap()
    }

    #[test]
    fn test_feedforward_architecture() {
        let mut rng = StdRng::seed_from_u64(42);
        let net = create_feedforward(4, &[6, 4], 2, ActivationFunction::Tanh, &mut rng).unwrap();

        assert_eq!(net.architecture(), vec![4, 6, 4, 2]);
        assert_eq!(net.parameter_count(), (4 * 6 + 6) + (6 * 4 + 4) + (4 * 2 + 2));
        assert_eq!(net.forward(&[0.1, -0.2, 0.3, 0.9]).unwrap().len(), 2);
        assert!(net.forward(&[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(NeuralNetwork::new(&[3], &[], &mut rng).is_err());
        assert!(NeuralNetwork::new(&[3, 2], &[], &mut rng).is_err());
        assert!(NeuralNetwork::new(&[3, 0, 2], &[ActivationFunction::ReLU; 2], &mut rng).is_err());

        let chain = NeuralNetwork::from_layers(vec![
            linear(vec![vec![1.0, 1.0]], vec![0.0]),
            linear(vec![vec![1.0, 1.0]], vec![0.0]),
        ]);
        assert!(matches!(chain, Err(AppError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_forward_composition() {
        // x -> 2x -> 2x + 1
        let net = NeuralNetwork::from_layers(vec![
            linear(vec![vec![2.0]], vec![0.0]),
            linear(vec![vec![1.0]], vec![1.0]),
        ])
        .unwrap();
        assert_eq!(net.forward(&[3.0]).unwrap(), vec![7.0]);

        let batch = net.batch_forward(&[vec![0.0], vec![1.0], vec![-1.0]]).unwrap();
        assert_eq!(batch, vec![vec![1.0], vec![3.0], vec![-1.0]]);
        assert!(net.batch_forward(&[vec![0.0, 1.0]]).is_err());
    }

    #[test]
    fn test_genes_round_trip_changes_behavior() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = create_feedforward(2, &[3], 1, ActivationFunction::Linear, &mut rng).unwrap();
        let genes = net.to_genes();
        assert_eq!(genes.len(), net.parameter_count());

        // Tous les paramètres à zéro -> sortie nulle
        net.load_genes(&vec![0.0; genes.len()]).unwrap();
        assert_eq!(net.forward(&[1.0, 1.0]).unwrap(), vec![0.0]);

        net.load_genes(&genes).unwrap();
        assert_eq!(net.to_genes(), genes);
        assert!(net.load_genes(&genes[1..]).is_err());
    }

    #[test]
    fn test_ensemble_predict() {
        let a = NeuralNetwork::from_layers(vec![linear(vec![vec![1.0]], vec![0.0])]).unwrap();
        let b = NeuralNetwork::from_layers(vec![linear(vec![vec![3.0]], vec![0.0])]).unwrap();

        assert_eq!(ensemble_predict(&[a.clone(), b], &[1.0]).unwrap(), vec![2.0]);
        assert!(matches!(
            ensemble_predict(&[], &[1.0]),
            Err(AppError::Precondition(_))
        ));

        let wide = NeuralNetwork::from_layers(vec![linear(vec![vec![1.0], vec![1.0]], vec![0.0, 0.0])]).unwrap();
        assert!(ensemble_predict(&[a, wide], &[1.0]).is_err());
    }
}
