use std::time::Instant;

use rand::{rngs::StdRng, seq::SliceRandom, RngCore};
use serde::{Serialize, Deserialize};

use crate::backend::{Backend, Batch, DenseBackend, LayerParameters};
use crate::config::PlaygroundConfig;
use crate::dataset::{generate_split, split, sample::argmax, Bounds, Dataset, GenerationConfig, Split};
use crate::error::{PlaygroundError, Result};
use crate::math::random::{from_entropy, seeded};
use crate::network::ModelConfig;
use crate::train::stats::{IterationStats, TrainingState};
use crate::train::train_config::{RunControl, TrainConfig};

/// Margin added around the data when laying out a decision grid.
const GRID_PADDING: f64 = 0.1;

/// Session state for an interactive training playground.
///
/// Owns the configs, the cached train/test split, the model and the
/// training history. All mutation goes through `&mut self`; a host that
/// drives `run` from a worker thread hands the whole value to that thread.
pub struct Playground<B: Backend = DenseBackend> {
    backend: B,
    generation: GenerationConfig,
    model_config: ModelConfig,
    training: TrainConfig,
    rng: StdRng,
    split: Option<Split>,
    model: Option<B::Model>,
    state: TrainingState,
}

/// Predicted class and confidence over a regular grid covering the data.
///
/// Row `r` holds points at `y = bounds.y_min + r * dy`; column `c` at
/// `x = bounds.x_min + c * dx`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionGrid {
    pub resolution: usize,
    pub bounds: Bounds,
    pub classes: Vec<Vec<usize>>,
    /// The winning output value per cell.
    pub confidence: Vec<Vec<f64>>,
}

/// Serializable view of a session for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaygroundSnapshot {
    pub iteration: usize,
    pub history: TrainingState,
    pub parameters: Vec<LayerParameters>,
    pub train_size: usize,
    pub test_size: usize,
}

impl PlaygroundSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Playground<DenseBackend> {
    pub fn new(config: &PlaygroundConfig) -> Result<Self> {
        Playground::with_backend(DenseBackend, config)
    }
}

impl<B: Backend> Playground<B> {
    pub fn with_backend(backend: B, config: &PlaygroundConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => seeded(seed),
            None => from_entropy(),
        };
        Ok(Playground {
            backend,
            generation: config.dataset.clone(),
            model_config: config.model.clone(),
            training: config.training.clone(),
            rng,
            split: None,
            model: None,
            state: TrainingState::default(),
        })
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    pub fn train_config(&self) -> &TrainConfig {
        &self.training
    }

    pub fn split(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    pub fn model(&self) -> Option<&B::Model> {
        self.model.as_ref()
    }

    pub fn history(&self) -> &TrainingState {
        &self.state
    }

    pub fn iteration(&self) -> usize {
        self.state.iteration
    }

    /// Replaces the generation config; the cached data, model and history
    /// are discarded.
    pub fn set_generation_config(&mut self, config: GenerationConfig) -> Result<()> {
        config.validate()?;
        self.generation = config;
        self.split = None;
        self.reset_training();
        Ok(())
    }

    /// Replaces the model config; the model and history are discarded but
    /// the data is kept.
    pub fn set_model_config(&mut self, config: ModelConfig) -> Result<()> {
        config.validate()?;
        self.model_config = config;
        self.reset_training();
        Ok(())
    }

    /// Batch size and iteration cap apply from the next step on.
    pub fn set_train_config(&mut self, config: TrainConfig) -> Result<()> {
        config.validate()?;
        self.training = config;
        Ok(())
    }

    /// Draws a fresh dataset and split from the current generation config.
    pub fn regenerate(&mut self) -> Result<&Split> {
        self.reset_training();
        let split = generate_split(&self.generation, &mut self.rng)?;
        tracing::info!(
            shape = %self.generation.shape,
            train = split.train.len(),
            test = split.test.len(),
            "regenerated dataset"
        );
        Ok(&*self.split.insert(split))
    }

    /// Trains on a caller-supplied dataset (imported or hand-placed points)
    /// instead of a generated one. It is split with the current test ratio.
    pub fn use_dataset(&mut self, dataset: Dataset) -> Result<&Split> {
        if dataset.is_empty() {
            return Err(PlaygroundError::invalid("dataset is empty"));
        }
        self.reset_training();
        let parts = split(&dataset, self.generation.test_ratio, &mut self.rng)?;
        tracing::info!(train = parts.train.len(), test = parts.test.len(), "using supplied dataset");
        Ok(&*self.split.insert(parts))
    }

    /// Generates data if none is cached.
    pub fn ensure_data(&mut self) -> Result<&Split> {
        if self.split.is_none() {
            self.regenerate()?;
        }
        self.split.as_ref().ok_or_else(|| PlaygroundError::invalid("no data"))
    }

    /// Drops the model and the history; the data is kept.
    pub fn reset_training(&mut self) {
        self.model = None;
        self.state = TrainingState::default();
    }

    fn ensure_model(&mut self) -> Result<()> {
        self.ensure_data()?;
        if self.model.is_some() {
            return Ok(());
        }
        let split = self.split.as_ref().ok_or_else(|| PlaygroundError::invalid("no data"))?;
        let seed = self.rng.next_u64();
        let model = self.backend.build_model(
            &self.model_config,
            split.train.feature_dim(),
            split.train.class_count(),
            seed,
        )?;
        self.model = Some(model);
        Ok(())
    }

    /// Runs one iteration: a shuffled pass of mini-batches over the training
    /// split, then an evaluation of both splits.
    ///
    /// Returns `Ok(None)` once `max_iterations` has been reached.
    pub fn step(&mut self) -> Result<Option<IterationStats>> {
        if self.state.iteration >= self.training.max_iterations {
            return Ok(None);
        }
        self.ensure_model()?;

        let t_start = Instant::now();
        let (split, model) = match (self.split.as_ref(), self.model.as_mut()) {
            (Some(split), Some(model)) => (split, model),
            _ => return Err(PlaygroundError::invalid("no data or model")),
        };

        let mut order: Vec<usize> = (0..split.train.len()).collect();
        order.shuffle(&mut self.rng);
        for chunk in order.chunks(self.training.batch_size) {
            let batch = Batch::new(chunk.iter().map(|&i| &split.train.samples()[i]).collect());
            self.backend.train_step(model, batch)?;
        }

        let (train_loss, train_accuracy) = evaluate(&self.backend, model, &self.model_config, &split.train)?;
        let (test_loss, test_accuracy) = evaluate(&self.backend, model, &self.model_config, &split.test)?;

        let stats = IterationStats {
            iteration: self.state.iteration + 1,
            train_loss,
            test_loss,
            train_accuracy,
            test_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        self.state.record(&stats);
        tracing::debug!(
            iteration = stats.iteration,
            train_loss = stats.train_loss,
            test_loss = stats.test_loss,
            "iteration done"
        );
        Ok(Some(stats))
    }

    /// Steps up to `iterations` times and returns the stats of the
    /// iterations that ran.
    ///
    /// Stops early at the iteration cap, when `control.stop_flag` is set, or
    /// when the `control.progress_tx` receiver has been dropped.
    pub fn run(&mut self, iterations: usize, control: &RunControl) -> Result<Vec<IterationStats>> {
        let mut completed = Vec::new();
        for _ in 0..iterations {
            if control.stop_requested() {
                tracing::info!(iteration = self.state.iteration, "stop requested");
                break;
            }
            let Some(stats) = self.step()? else {
                break;
            };
            completed.push(stats.clone());

            if let Some(ref tx) = control.progress_tx {
                if tx.send(stats).is_err() {
                    tracing::info!("progress receiver dropped, stopping");
                    break;
                }
            }
        }
        Ok(completed)
    }

    pub fn parameters(&self) -> Option<Vec<LayerParameters>> {
        self.model.as_ref().map(|m| self.backend.parameters(m))
    }

    /// Predicts a `resolution × resolution` grid over the data's bounding
    /// box padded by 10% on every side.
    pub fn decision_grid(&self, resolution: usize) -> Result<DecisionGrid> {
        if resolution < 2 {
            return Err(PlaygroundError::invalid("grid resolution must be at least 2"));
        }
        let split = self.split.as_ref()
            .ok_or_else(|| PlaygroundError::invalid("decision grid needs data"))?;
        let model = self.model.as_ref()
            .ok_or_else(|| PlaygroundError::invalid("decision grid needs a trained model"))?;
        if split.train.feature_dim() != 2 {
            return Err(PlaygroundError::invalid(format!(
                "decision grid needs 2 features, data has {}", split.train.feature_dim()
            )));
        }
        let bounds = merge(split.train.bounding_box(), split.test.bounding_box())
            .ok_or_else(|| PlaygroundError::invalid("decision grid needs data"))?
            .padded(GRID_PADDING);

        let steps = (resolution - 1) as f64;
        let dx = (bounds.x_max - bounds.x_min) / steps;
        let dy = (bounds.y_max - bounds.y_min) / steps;
        let points: Vec<Vec<f64>> = (0..resolution)
            .flat_map(|r| (0..resolution).map(move |c| vec![bounds.x_min + c as f64 * dx, bounds.y_min + r as f64 * dy]))
            .collect();
        let outputs = self.backend.predict(model, &points)?;

        let mut classes = Vec::with_capacity(resolution);
        let mut confidence = Vec::with_capacity(resolution);
        for row in outputs.chunks(resolution) {
            classes.push(row.iter().map(|o| argmax(o)).collect());
            confidence.push(row.iter().map(|o| o[argmax(o)]).collect());
        }
        Ok(DecisionGrid { resolution, bounds, classes, confidence })
    }

    pub fn snapshot(&self) -> PlaygroundSnapshot {
        PlaygroundSnapshot {
            iteration: self.state.iteration,
            history: self.state.clone(),
            parameters: self.parameters().unwrap_or_default(),
            train_size: self.split.as_ref().map(|s| s.train.len()).unwrap_or(0),
            test_size: self.split.as_ref().map(|s| s.test.len()).unwrap_or(0),
        }
    }
}

/// Mean loss and accuracy of `model` over `data`; (0, 0) for no samples.
fn evaluate<B: Backend>(backend: &B, model: &B::Model, config: &ModelConfig, data: &Dataset) -> Result<(f64, f64)> {
    if data.is_empty() {
        return Ok((0.0, 0.0));
    }
    let outputs = backend.predict(model, &data.inputs())?;
    let targets = data.targets();
    let loss = config.loss.mean_loss(&outputs, &targets);
    let correct = outputs.iter().zip(data.samples())
        .filter(|(out, sample)| argmax(out) == sample.class_index())
        .count();
    Ok((loss, correct as f64 / data.len() as f64))
}

fn merge(a: Option<Bounds>, b: Option<Bounds>) -> Option<Bounds> {
    match (a, b) {
        (Some(a), Some(b)) => Some(Bounds {
            x_min: a.x_min.min(b.x_min),
            x_max: a.x_max.max(b.x_max),
            y_min: a.y_min.min(b.y_min),
            y_max: a.y_max.max(b.y_max),
        }),
        (a, b) => a.or(b),
    }
}
