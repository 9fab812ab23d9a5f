use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::loss::functions;

/// Selects the training loss; also fixes the output layer's activation.
///
/// - `CrossEntropy`       - categorical cross-entropy over a Softmax output.
///   The gradient is taken with respect to the logits (`predicted - expected`).
/// - `BinaryCrossEntropy` - per-output BCE over a Sigmoid output.
/// - `Mse`                - mean-squared error over a Linear output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    CrossEntropy,
    BinaryCrossEntropy,
    Mse,
}

impl LossType {
    pub fn output_activation(self) -> ActivationFunction {
        match self {
            LossType::CrossEntropy       => ActivationFunction::Softmax,
            LossType::BinaryCrossEntropy => ActivationFunction::Sigmoid,
            LossType::Mse                => ActivationFunction::Linear,
        }
    }

    /// Scalar loss for one sample.
    pub fn loss(self, predicted: &[f64], expected: &[f64]) -> f64 {
        match self {
            LossType::CrossEntropy       => functions::cross_entropy(predicted, expected),
            LossType::BinaryCrossEntropy => functions::binary_cross_entropy(predicted, expected),
            LossType::Mse                => functions::mse(predicted, expected),
        }
    }

    /// ∂L/∂output for one sample.
    pub fn derivative(self, predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        match self {
            LossType::CrossEntropy       => functions::cross_entropy_gradient(predicted, expected),
            LossType::BinaryCrossEntropy => functions::binary_cross_entropy_gradient(predicted, expected),
            LossType::Mse                => functions::mse_gradient(predicted, expected),
        }
    }

    /// Mean loss over paired prediction/target rows; 0 for no rows.
    pub fn mean_loss(self, predicted: &[Vec<f64>], expected: &[Vec<f64>]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        predicted.iter().zip(expected)
            .map(|(p, e)| self.loss(p, e))
            .sum::<f64>() / predicted.len() as f64
    }
}
