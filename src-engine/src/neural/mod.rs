pub mod activation;
pub mod layer;
pub mod network;

pub use activation::ActivationFunction;
pub use layer::NeuralLayer;
pub use network::{create_feedforward, ensemble_predict, NeuralNetwork};
