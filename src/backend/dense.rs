use rand::rngs::StdRng;

use crate::backend::{Backend, Batch, LayerParameters, StepMetrics};
use crate::dataset::sample::argmax;
use crate::error::{PlaygroundError, Result};
use crate::math::{random::seeded, Matrix};
use crate::network::{ModelConfig, Network};
use crate::optim::Optimizer;

/// Backpropagation over the crate's own dense `Network`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseBackend;

/// A dense network plus everything that evolves while it trains.
#[derive(Debug, Clone)]
pub struct DenseModel {
    pub network: Network,
    pub config: ModelConfig,
    optimizer: Optimizer,
    /// Drives dropout masks.
    rng: StdRng,
}

impl DenseModel {
    fn check_input(&self, features: &[f64]) -> Result<()> {
        let expected = self.network.input_size();
        if features.len() != expected {
            return Err(PlaygroundError::ShapeMismatch(format!(
                "model expects {expected} inputs, got {}", features.len()
            )));
        }
        Ok(())
    }
}

impl Backend for DenseBackend {
    type Model = DenseModel;

    fn build_model(&self, config: &ModelConfig, input_dim: usize, output_dim: usize, seed: u64) -> Result<DenseModel> {
        config.validate()?;
        if output_dim == 0 {
            return Err(PlaygroundError::invalid("model needs at least one output"));
        }
        let mut rng = seeded(seed);
        let network = Network::from_config(config, input_dim, output_dim, &mut rng);
        let optimizer = Optimizer::new(config.optimizer, config.learning_rate, config.momentum, &network.layers);
        tracing::debug!(input_dim, output_dim, hidden = ?config.hidden_layers, "built dense model");
        Ok(DenseModel { network, config: config.clone(), optimizer, rng })
    }

    fn train_step(&self, model: &mut DenseModel, batch: Batch<'_>) -> Result<StepMetrics> {
        if batch.is_empty() {
            return Err(PlaygroundError::invalid("empty batch"));
        }
        let output_dim = model.network.output_size();
        for sample in &batch.samples {
            model.check_input(&sample.features)?;
            if sample.label.len() != output_dim {
                return Err(PlaygroundError::ShapeMismatch(format!(
                    "model has {output_dim} outputs, label has {}", sample.label.len()
                )));
            }
        }

        let loss_type = model.config.loss;
        let mut acc_grads: Vec<(Matrix, Matrix)> = model.network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();
        let mut total_loss = 0.0;
        let mut correct = 0usize;

        for sample in &batch.samples {
            let traces = model.network.forward_train(&sample.features, model.config.dropout_rate, &mut model.rng);
            let output = &traces[traces.len() - 1].a.data[0];

            total_loss += loss_type.loss(output, &sample.label);
            if argmax(output) == sample.class_index() {
                correct += 1;
            }

            let delta = loss_type.derivative(output, &sample.label);
            let grads = model.network.backward(&sample.features, &traces, &delta);
            for ((w_acc, b_acc), (w_grad, b_grad)) in acc_grads.iter_mut().zip(&grads) {
                w_acc.add_assign(w_grad);
                b_acc.add_assign(b_grad);
            }
        }

        let inv_batch = 1.0 / batch.len() as f64;
        let grads: Vec<(Matrix, Matrix)> = acc_grads.into_iter()
            .zip(&model.network.layers)
            .map(|((w_acc, b_acc), layer)| {
                let mut w_avg = w_acc.scale(inv_batch);
                if let Some(penalty) = model.config.regularization.gradient(&layer.weights) {
                    w_avg.add_assign(&penalty);
                }
                (w_avg, b_acc.scale(inv_batch))
            })
            .collect();
        model.optimizer.step(&mut model.network.layers, &grads);

        Ok(StepMetrics {
            loss: total_loss * inv_batch,
            accuracy: correct as f64 * inv_batch,
        })
    }

    fn predict(&self, model: &DenseModel, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        inputs.iter()
            .map(|features| {
                model.check_input(features)?;
                Ok(model.network.predict(features))
            })
            .collect()
    }

    fn parameters(&self, model: &DenseModel) -> Vec<LayerParameters> {
        model.network.layers.iter()
            .map(|layer| LayerParameters {
                weights: layer.weights.data.clone(),
                biases: layer.biases.data[0].clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample::one_hot;
    use crate::dataset::Sample;

    fn sample(x: f64, y: f64, class: usize) -> Sample {
        Sample { features: vec![x, y], label: one_hot(class, 2) }
    }

    #[test]
    fn same_seed_builds_same_weights() {
        let cfg = ModelConfig::default();
        let a = DenseBackend.build_model(&cfg, 2, 2, 9).unwrap();
        let b = DenseBackend.build_model(&cfg, 2, 2, 9).unwrap();
        assert_eq!(DenseBackend.parameters(&a), DenseBackend.parameters(&b));
    }

    #[test]
    fn rejects_wrong_input_width() {
        let mut model = DenseBackend.build_model(&ModelConfig::default(), 2, 2, 0).unwrap();
        let bad = Sample { features: vec![1.0, 2.0, 3.0], label: one_hot(0, 2) };
        let err = DenseBackend.train_step(&mut model, Batch::new(vec![&bad])).unwrap_err();
        assert!(matches!(err, PlaygroundError::ShapeMismatch(_)));
        assert!(DenseBackend.predict(&model, &[vec![1.0]]).is_err());
    }

    #[test]
    fn repeated_steps_reduce_loss() {
        let cfg = ModelConfig { hidden_layers: vec![4], learning_rate: 0.1, ..ModelConfig::default() };
        let mut model = DenseBackend.build_model(&cfg, 2, 2, 1).unwrap();
        let data = vec![sample(-1.0, -1.0, 0), sample(-0.8, -1.2, 0), sample(1.0, 1.0, 1), sample(1.2, 0.9, 1)];
        let first = DenseBackend.train_step(&mut model, Batch::new(data.iter().collect())).unwrap();
        let mut last = first;
        for _ in 0..200 {
            last = DenseBackend.train_step(&mut model, Batch::new(data.iter().collect())).unwrap();
        }
        assert!(last.loss < first.loss);
        assert_eq!(last.accuracy, 1.0);
    }

    #[test]
    fn parameters_expose_every_layer() {
        let model = DenseBackend.build_model(&ModelConfig::default(), 2, 3, 0).unwrap();
        let params = DenseBackend.parameters(&model);
        assert_eq!(params.len(), 3);
        assert_eq!(params[2].biases.len(), 3);
        assert_eq!(params[0].weights.len(), 2);
    }
}
