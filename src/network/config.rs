use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;
use crate::error::{PlaygroundError, Result};
use crate::layers::WeightInit;
use crate::loss::LossType;
use crate::optim::{OptimizerKind, Regularization};

/// Largest hidden layer the playground offers.
pub const MAX_NEURONS: usize = 10;

/// Architecture and optimization settings for a playground model.
///
/// The output layer is not listed: its width is the class count and its
/// activation follows from `loss` (see `LossType::output_activation`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Neuron count per hidden layer, input side first. May be empty.
    pub hidden_layers: Vec<usize>,
    /// Activation for every hidden layer.
    pub activation: ActivationFunction,
    pub learning_rate: f64,
    pub momentum: f64,
    pub optimizer: OptimizerKind,
    /// Probability of zeroing a hidden unit during training.
    pub dropout_rate: f64,
    pub regularization: Regularization,
    pub weight_init: WeightInit,
    pub loss: LossType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            hidden_layers: vec![4, 2],
            activation: ActivationFunction::Tanh,
            learning_rate: 0.03,
            momentum: 0.9,
            optimizer: OptimizerKind::Sgd,
            dropout_rate: 0.0,
            regularization: Regularization::None,
            weight_init: WeightInit::Xavier,
            loss: LossType::CrossEntropy,
        }
    }
}

impl ModelConfig {
    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(&bad) = self.hidden_layers.iter().find(|&&n| n == 0 || n > MAX_NEURONS) {
            return Err(PlaygroundError::invalid(format!(
                "hidden layer size {bad} outside 1..={MAX_NEURONS}"
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(PlaygroundError::invalid(format!(
                "learning rate must be positive, got {}", self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(PlaygroundError::invalid(format!(
                "momentum must be in [0, 1), got {}", self.momentum
            )));
        }
        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(PlaygroundError::invalid(format!(
                "dropout rate must be in [0, 1), got {}", self.dropout_rate
            )));
        }
        if self.regularization.rates().iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(PlaygroundError::invalid("regularization rate must be non-negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_settings() {
        let base = ModelConfig::default();
        assert!(base.clone().with_hidden_layers(vec![4, 0]).validate().is_err());
        assert!(base.clone().with_hidden_layers(vec![11]).validate().is_err());
        assert!(base.clone().with_learning_rate(0.0).validate().is_err());
        assert!(base.clone().with_learning_rate(f64::NAN).validate().is_err());
        assert!(ModelConfig { momentum: 1.0, ..base.clone() }.validate().is_err());
        assert!(ModelConfig { dropout_rate: -0.1, ..base.clone() }.validate().is_err());
        assert!(ModelConfig { regularization: Regularization::L2 { rate: -1.0 }, ..base }.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ModelConfig = serde_json::from_str(r#"{"hidden_layers": [8], "activation": "relu"}"#).unwrap();
        assert_eq!(cfg.hidden_layers, vec![8]);
        assert_eq!(cfg.activation, ActivationFunction::ReLU);
        assert_eq!(cfg.learning_rate, 0.03);
        assert_eq!(cfg.loss, LossType::CrossEntropy);
    }
}
