use serde::{Serialize, Deserialize};

use crate::{activation::ActivationFunction, math::{Matrix, RandomSource}};

/// Weight initialization strategy for dense layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightInit {
    /// N(0, sqrt(1 / fan_in)); suits tanh, sigmoid and linear layers.
    #[default]
    Xavier,
    /// N(0, sqrt(2 / fan_in)); suits ReLU layers.
    He,
    /// U(-1, 1).
    Random,
}

/// A fully connected layer: `a = f(x · W + b)`.
///
/// `weights` has shape (input_size, size); `biases` is a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
}

/// Per-layer values recorded during a forward pass, needed for backprop.
#[derive(Debug, Clone)]
pub struct LayerTrace {
    /// Pre-activation z = xW + b.
    pub z: Matrix,
    /// Activation after dropout (what the next layer sees).
    pub a: Matrix,
    /// Inverted-dropout scale per unit; `None` when dropout was not applied.
    pub mask: Option<Matrix>,
}

impl Layer {
    pub fn new<R: RandomSource + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        init: WeightInit,
        rng: &mut R,
    ) -> Layer {
        let fan_in = input_size.max(1) as f64;
        let weights = match init {
            WeightInit::Xavier => Matrix::normal(input_size, size, (1.0 / fan_in).sqrt(), rng),
            WeightInit::He => Matrix::normal(input_size, size, (2.0 / fan_in).sqrt(), rng),
            WeightInit::Random => Matrix::random(input_size, size, rng),
        };

        Layer {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass for a single sample row.
    pub fn feed_from(&self, input: &Matrix) -> LayerTrace {
        let z = input.dot(&self.weights).add(&self.biases);
        let a = Matrix::row(&self.activator.apply(&z.data[0]));
        LayerTrace { z, a, mask: None }
    }

    /// Computes gradients for one sample. Returns (weights_grad, biases_grad, input_delta).
    ///
    /// `delta` is ∂L/∂a for this layer's (post-dropout) output; `input` is what
    /// the layer was fed.
    pub fn compute_gradients(&self, delta: &Matrix, trace: &LayerTrace, input: &Matrix) -> (Matrix, Matrix, Matrix) {
        let delta = match &trace.mask {
            Some(mask) => delta.hadamard(mask),
            None => delta.clone(),
        };
        let act_derivative = trace.z.map(|x| self.activator.derivative(x));
        // δ = error ⊙ f'(z)
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = input.transpose().dot(&layer_delta);
        let input_delta = layer_delta.dot(&self.weights.transpose());

        (weights_grad, layer_delta, input_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::seeded;

    #[test]
    fn shapes_follow_sizes() {
        let layer = Layer::new(3, 2, ActivationFunction::Tanh, WeightInit::He, &mut seeded(3));
        assert_eq!((layer.weights.rows, layer.weights.cols), (2, 3));
        assert_eq!((layer.biases.rows, layer.biases.cols), (1, 3));
        assert!(layer.biases.data[0].iter().all(|&b| b == 0.0));
        let trace = layer.feed_from(&Matrix::row(&[0.5, -0.5]));
        assert_eq!(trace.a.cols, 3);
    }

    #[test]
    fn linear_gradient_is_outer_product() {
        let mut layer = Layer::new(1, 2, ActivationFunction::Linear, WeightInit::Random, &mut seeded(0));
        layer.weights = Matrix { rows: 2, cols: 1, data: vec![vec![2.0], vec![3.0]] };
        let input = Matrix::row(&[1.0, -1.0]);
        let trace = layer.feed_from(&input);
        let (w, b, back) = layer.compute_gradients(&Matrix::row(&[1.0]), &trace, &input);
        assert_eq!(w.data, vec![vec![1.0], vec![-1.0]]);
        assert_eq!(b.data, vec![vec![1.0]]);
        assert_eq!(back.data, vec![vec![2.0, 3.0]]);
    }
}
