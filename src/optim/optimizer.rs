use serde::{Serialize, Deserialize};

use crate::{layers::Layer, math::Matrix};

const ADAM_BETA1: f64 = 0.9;
const ADAM_BETA2: f64 = 0.999;
const RMSPROP_DECAY: f64 = 0.9;
const EPS: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    /// Gradient descent with classical momentum.
    #[default]
    Sgd,
    Adam,
    RmsProp,
}

/// Running moments for one parameter matrix.
#[derive(Debug, Clone)]
struct Slot {
    first: Matrix,
    second: Matrix,
}

impl Slot {
    fn for_shape(m: &Matrix) -> Slot {
        Slot { first: Matrix::zeros(m.rows, m.cols), second: Matrix::zeros(m.rows, m.cols) }
    }
}

/// Optimizer with per-layer state, sized to a network at construction.
#[derive(Debug, Clone)]
pub struct Optimizer {
    pub kind: OptimizerKind,
    pub learning_rate: f64,
    /// Only used by `OptimizerKind::Sgd`.
    pub momentum: f64,
    /// (weights, biases) per layer.
    slots: Vec<(Slot, Slot)>,
    steps: i32,
}

impl Optimizer {
    pub fn new(kind: OptimizerKind, learning_rate: f64, momentum: f64, layers: &[Layer]) -> Optimizer {
        Optimizer {
            kind,
            learning_rate,
            momentum,
            slots: layers.iter()
                .map(|l| (Slot::for_shape(&l.weights), Slot::for_shape(&l.biases)))
                .collect(),
            steps: 0,
        }
    }

    /// Applies one update to every layer. `grads` holds (weights_grad,
    /// biases_grad) per layer, already averaged over the batch.
    pub fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]) {
        assert_eq!(layers.len(), grads.len(), "one gradient pair per layer");
        self.steps = self.steps.saturating_add(1);

        for (i, (layer, (w_grad, b_grad))) in layers.iter_mut().zip(grads).enumerate() {
            let (w_slot, b_slot) = &mut self.slots[i];
            let w_update = update(self.kind, self.learning_rate, self.momentum, self.steps, w_slot, w_grad);
            let b_update = update(self.kind, self.learning_rate, self.momentum, self.steps, b_slot, b_grad);
            layer.weights.add_assign(&w_update);
            layer.biases.add_assign(&b_update);
        }
    }
}

/// The additive parameter change for one matrix.
fn update(kind: OptimizerKind, lr: f64, momentum: f64, t: i32, slot: &mut Slot, grad: &Matrix) -> Matrix {
    match kind {
        OptimizerKind::Sgd => {
            // v = μv − ηg
            slot.first = slot.first.scale(momentum).sub(&grad.scale(lr));
            slot.first.clone()
        }
        OptimizerKind::Adam => {
            slot.first = slot.first.scale(ADAM_BETA1).add(&grad.scale(1.0 - ADAM_BETA1));
            slot.second = slot.second.scale(ADAM_BETA2).add(&grad.map(|g| g * g).scale(1.0 - ADAM_BETA2));
            let m_corr = 1.0 - ADAM_BETA1.powi(t);
            let v_corr = 1.0 - ADAM_BETA2.powi(t);
            slot.first.zip_with(&slot.second, |m, v| -lr * (m / m_corr) / ((v / v_corr).sqrt() + EPS))
        }
        OptimizerKind::RmsProp => {
            slot.second = slot.second.scale(RMSPROP_DECAY).add(&grad.map(|g| g * g).scale(1.0 - RMSPROP_DECAY));
            grad.zip_with(&slot.second, |g, v| -lr * g / (v.sqrt() + EPS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::layers::WeightInit;
    use crate::math::random::seeded;

    fn single_weight_layer(w: f64) -> Layer {
        let mut layer = Layer::new(1, 1, ActivationFunction::Linear, WeightInit::Random, &mut seeded(0));
        layer.weights = Matrix { rows: 1, cols: 1, data: vec![vec![w]] };
        layer
    }

    fn grads(g: f64) -> Vec<(Matrix, Matrix)> {
        vec![(Matrix { rows: 1, cols: 1, data: vec![vec![g]] }, Matrix::zeros(1, 1))]
    }

    #[test]
    fn sgd_without_momentum_is_plain_descent() {
        let mut layers = vec![single_weight_layer(1.0)];
        let mut opt = Optimizer::new(OptimizerKind::Sgd, 0.1, 0.0, &layers);
        opt.step(&mut layers, &grads(2.0));
        assert!((layers[0].weights.data[0][0] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn momentum_accumulates_velocity() {
        let mut layers = vec![single_weight_layer(0.0)];
        let mut opt = Optimizer::new(OptimizerKind::Sgd, 0.1, 0.9, &layers);
        opt.step(&mut layers, &grads(1.0));
        opt.step(&mut layers, &grads(1.0));
        // -0.1, then -(0.09 + 0.1)
        assert!((layers[0].weights.data[0][0] + 0.29).abs() < 1e-12);
    }

    #[test]
    fn adam_first_step_moves_by_learning_rate() {
        let mut layers = vec![single_weight_layer(0.0)];
        let mut opt = Optimizer::new(OptimizerKind::Adam, 0.01, 0.0, &layers);
        opt.step(&mut layers, &grads(5.0));
        assert!((layers[0].weights.data[0][0] + 0.01).abs() < 1e-6);
    }

    #[test]
    fn rmsprop_moves_against_gradient() {
        let mut layers = vec![single_weight_layer(0.0)];
        let mut opt = Optimizer::new(OptimizerKind::RmsProp, 0.01, 0.0, &layers);
        opt.step(&mut layers, &grads(-3.0));
        assert!(layers[0].weights.data[0][0] > 0.0);
    }
}
