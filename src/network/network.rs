use serde::{Serialize, Deserialize};

use crate::{
    layers::{Layer, LayerTrace},
    math::{Matrix, RandomSource},
    network::ModelConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds hidden layers from `config` followed by an output layer of
    /// `output_dim` units whose activation is implied by the loss.
    pub fn from_config<R: RandomSource + ?Sized>(
        config: &ModelConfig,
        input_dim: usize,
        output_dim: usize,
        rng: &mut R,
    ) -> Network {
        let mut layers = Vec::with_capacity(config.hidden_layers.len() + 1);
        let mut fan_in = input_dim;
        for &size in &config.hidden_layers {
            layers.push(Layer::new(size, fan_in, config.activation, config.weight_init, rng));
            fan_in = size;
        }
        layers.push(Layer::new(output_dim, fan_in, config.loss.output_activation(), config.weight_init, rng));
        Network { layers }
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map(Layer::input_size).unwrap_or(0)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map(|l| l.size).unwrap_or(0)
    }

    /// Inference pass for one sample.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::row(input);
        for layer in &self.layers {
            current = layer.feed_from(&current).a;
        }
        current.data.swap_remove(0)
    }

    /// Training pass for one sample; returns one trace per layer.
    ///
    /// With `dropout_rate > 0` each hidden unit is kept with probability
    /// `1 - rate` and survivors are scaled by `1 / (1 - rate)`. The output
    /// layer never drops.
    pub fn forward_train<R: RandomSource + ?Sized>(
        &self,
        input: &[f64],
        dropout_rate: f64,
        rng: &mut R,
    ) -> Vec<LayerTrace> {
        let last = self.layers.len().saturating_sub(1);
        let mut traces: Vec<LayerTrace> = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            let mut trace = match traces.last() {
                Some(prev) => layer.feed_from(&prev.a),
                None => layer.feed_from(&Matrix::row(input)),
            };
            if dropout_rate > 0.0 && i < last {
                let keep = 1.0 - dropout_rate;
                let mask = Matrix::row(
                    &(0..layer.size)
                        .map(|_| if rng.next_unit() < keep { 1.0 / keep } else { 0.0 })
                        .collect::<Vec<_>>(),
                );
                trace.a = trace.a.hadamard(&mask);
                trace.mask = Some(mask);
            }
            traces.push(trace);
        }
        traces
    }

    /// Backpropagates `output_delta` (∂L/∂output) through the recorded
    /// traces. Returns (weights_grad, biases_grad) per layer, input side first.
    pub fn backward(&self, input: &[f64], traces: &[LayerTrace], output_delta: &[f64]) -> Vec<(Matrix, Matrix)> {
        assert_eq!(traces.len(), self.layers.len(), "one trace per layer");
        let input = Matrix::row(input);
        let mut grads = Vec::with_capacity(self.layers.len());
        let mut delta = Matrix::row(output_delta);

        for i in (0..self.layers.len()).rev() {
            let layer_input = if i == 0 { &input } else { &traces[i - 1].a };
            let (w_grad, b_grad, input_delta) = self.layers[i].compute_gradients(&delta, &traces[i], layer_input);
            grads.push((w_grad, b_grad));
            delta = input_delta;
        }
        grads.reverse();
        grads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::seeded;

    #[test]
    fn layer_widths_follow_config() {
        let cfg = ModelConfig::default();
        let net = Network::from_config(&cfg, 2, 3, &mut seeded(1));
        let widths: Vec<_> = net.layers.iter().map(|l| (l.input_size(), l.size)).collect();
        assert_eq!(widths, vec![(2, 4), (4, 2), (2, 3)]);
        let out = net.predict(&[0.1, -0.2]);
        assert_eq!(out.len(), 3);
        assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dropout_masks_hidden_layers_only() {
        let cfg = ModelConfig { hidden_layers: vec![10], ..ModelConfig::default() };
        let net = Network::from_config(&cfg, 2, 2, &mut seeded(2));
        let traces = net.forward_train(&[1.0, 1.0], 0.5, &mut seeded(3));
        let mask = traces[0].mask.as_ref().unwrap();
        assert!(mask.data[0].iter().all(|&m| m == 0.0 || m == 2.0));
        assert!(traces[1].mask.is_none());
    }

    #[test]
    fn backward_matches_finite_difference() {
        let cfg = ModelConfig { hidden_layers: vec![3], ..ModelConfig::default() };
        let mut net = Network::from_config(&cfg, 2, 2, &mut seeded(4));
        let input = [0.3, -0.7];
        let target = [0.0, 1.0];
        let loss = cfg.loss;

        let traces = net.forward_train(&input, 0.0, &mut seeded(0));
        let out = &traces.last().unwrap().a.data[0];
        let grads = net.backward(&input, &traces, &loss.derivative(out, &target));

        let h = 1e-6;
        let original = net.layers[0].weights.data[1][2];
        net.layers[0].weights.data[1][2] = original + h;
        let up = loss.loss(&net.predict(&input), &target);
        net.layers[0].weights.data[1][2] = original - h;
        let down = loss.loss(&net.predict(&input), &target);
        let numeric = (up - down) / (2.0 * h);

        assert!((grads[0].0.data[1][2] - numeric).abs() < 1e-5);
    }
}
