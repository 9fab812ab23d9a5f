use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Tanh,
    Sigmoid,
    ReLU,
    Linear,
    /// Vector-valued; applied across a whole layer by [`ActivationFunction::apply`].
    /// Only used on output layers paired with cross-entropy.
    Softmax,
}

impl ActivationFunction {
    /// Element-wise activation. `Softmax` falls back to identity here; use
    /// [`ActivationFunction::apply`] for layer outputs.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::Linear | ActivationFunction::Softmax => x,
        }
    }

    /// Element-wise derivative at pre-activation `x`.
    ///
    /// For `Softmax` the cross-entropy gradient is already taken with respect
    /// to the logits (`predicted - expected`), so this passes it through as 1.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Linear | ActivationFunction::Softmax => 1.0,
        }
    }

    /// Activates a full layer of pre-activations.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter().map(|&x| self.function(x)).collect(),
        }
    }
}

impl Default for ActivationFunction {
    fn default() -> Self {
        ActivationFunction::Tanh
    }
}

/// Numerically stable softmax (shifts by the max logit).
fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
