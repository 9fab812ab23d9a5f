use serde::{Serialize, Deserialize};

/// Statistics for one completed playground iteration.
///
/// When a `progress_tx` channel is set on `RunControl`, `Playground::run`
/// sends one value per iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Mean loss over the training set, evaluated after the update.
    pub train_loss: f64,
    pub test_loss: f64,
    /// Fraction in [0, 1].
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    /// Wall-clock duration of this iteration in milliseconds.
    pub elapsed_ms: u64,
}

/// Iteration counter and loss/accuracy curves for the current model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingState {
    pub iteration: usize,
    pub train_loss: Vec<f64>,
    pub test_loss: Vec<f64>,
    pub train_accuracy: Vec<f64>,
    pub test_accuracy: Vec<f64>,
}

impl TrainingState {
    pub(crate) fn record(&mut self, stats: &IterationStats) {
        self.iteration = stats.iteration;
        self.train_loss.push(stats.train_loss);
        self.test_loss.push(stats.test_loss);
        self.train_accuracy.push(stats.train_accuracy);
        self.test_accuracy.push(stats.test_accuracy);
    }
}
