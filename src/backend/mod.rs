//! The seam between the playground session and whatever computes gradients.
//!
//! `Playground` only talks to a [`Backend`]; the crate ships [`DenseBackend`],
//! a small from-scratch network, but any tensor library can sit behind the
//! trait.

pub mod dense;

use serde::{Serialize, Deserialize};

use crate::dataset::Sample;
use crate::error::Result;
use crate::network::ModelConfig;

pub use dense::{DenseBackend, DenseModel};

/// A mini-batch of borrowed training samples.
#[derive(Debug, Clone)]
pub struct Batch<'a> {
    pub samples: Vec<&'a Sample>,
}

impl<'a> Batch<'a> {
    pub fn new(samples: Vec<&'a Sample>) -> Self {
        Batch { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Result of one parameter update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Mean data loss over the batch, before the update.
    pub loss: f64,
    /// Fraction of the batch whose argmax output matched the label.
    pub accuracy: f64,
}

/// Weights and biases of one layer as plain nested arrays for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerParameters {
    /// `weights[i][j]` connects input `i` to unit `j`.
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

pub trait Backend {
    type Model;

    fn build_model(&self, config: &ModelConfig, input_dim: usize, output_dim: usize, seed: u64) -> Result<Self::Model>;

    fn train_step(&self, model: &mut Self::Model, batch: Batch<'_>) -> Result<StepMetrics>;

    fn predict(&self, model: &Self::Model, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    fn parameters(&self, model: &Self::Model) -> Vec<LayerParameters>;
}
