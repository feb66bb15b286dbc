// FICHIER : src-engine/tests/neural_suite/network_test.rs

use crate::common::seeded;
use lore_engine::neural::{create_feedforward, ensemble_predict, ActivationFunction, NeuralNetwork};

#[test]
fn test_output_length_matches_last_layer() {
    let mut rng = seeded(42);
    let net = create_feedforward(4, &[6, 4], 2, ActivationFunction::ReLU, &mut rng).unwrap();

    for input in [[0.0; 4], [1.0, -1.0, 0.5, 0.25], [10.0, 10.0, -10.0, 3.0]] {
        assert_eq!(net.forward(&input).unwrap().len(), 2);
    }
}

#[test]
fn test_every_activation_builds_a_working_network() {
    let mut rng = seeded(1);
    for name in ["relu", "sigmoid", "tanh", "leaky_relu", "elu", "swish", "linear"] {
        let activation: ActivationFunction = name.parse().unwrap();
        let net = create_feedforward(3, &[5], 2, activation, &mut rng).unwrap();
        let out = net.forward(&[0.3, -0.7, 0.9]).unwrap();
        assert!(out.iter().all(|v| v.is_finite()), "{} : {:?}", name, out);
    }
}

#[test]
fn test_batch_forward_matches_single_calls() {
    let mut rng = seeded(8);
    let net = create_feedforward(3, &[8, 8], 4, ActivationFunction::Tanh, &mut rng).unwrap();
    let inputs: Vec<Vec<f64>> = (0..32)
        .map(|i| vec![i as f64 * 0.1, -(i as f64) * 0.05, 1.0])
        .collect();

    let batch = net.batch_forward(&inputs).unwrap();
    let single: Vec<Vec<f64>> = inputs.iter().map(|x| net.forward(x).unwrap()).collect();
    assert_eq!(batch, single);
}

#[test]
fn test_mixed_activations() {
    let mut rng = seeded(3);
    let net = NeuralNetwork::new(
        &[2, 3, 1],
        &[ActivationFunction::ReLU, ActivationFunction::Sigmoid],
        &mut rng,
    )
    .unwrap();
    let out = net.forward(&[0.5, 0.5]).unwrap()[0];
    assert!((0.0..=1.0).contains(&out));
}

#[test]
fn test_ensemble_of_identical_networks() {
    let mut rng = seeded(6);
    let net = create_feedforward(2, &[4], 3, ActivationFunction::Linear, &mut rng).unwrap();
    let single = net.forward(&[0.2, 0.4]).unwrap();
    let averaged = ensemble_predict(&[net.clone(), net.clone(), net], &[0.2, 0.4]).unwrap();
    for (a, b) in single.iter().zip(averaged.iter()) {
        assert!((a - b).abs() < 1e-12);
    }
}
