use serde::{Serialize, Deserialize};

use crate::math::Matrix;

/// Weight penalty added to the data-loss gradient. Biases are never
/// regularized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Regularization {
    #[default]
    None,
    L1 { rate: f64 },
    L2 { rate: f64 },
    L1L2 { l1: f64, l2: f64 },
}

impl Regularization {
    /// Gradient of the penalty with respect to `weights`.
    pub fn gradient(&self, weights: &Matrix) -> Option<Matrix> {
        match *self {
            Regularization::None => None,
            Regularization::L1 { rate } => Some(weights.map(|w| rate * sign(w))),
            Regularization::L2 { rate } => Some(weights.map(|w| rate * w)),
            Regularization::L1L2 { l1, l2 } => Some(weights.map(|w| l1 * sign(w) + l2 * w)),
        }
    }

    pub fn rates(&self) -> Vec<f64> {
        match *self {
            Regularization::None => vec![],
            Regularization::L1 { rate } | Regularization::L2 { rate } => vec![rate],
            Regularization::L1L2 { l1, l2 } => vec![l1, l2],
        }
    }
}

fn sign(w: f64) -> f64 {
    if w > 0.0 { 1.0 } else if w < 0.0 { -1.0 } else { 0.0 }
}
