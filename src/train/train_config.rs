use std::sync::mpsc;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

use serde::{Serialize, Deserialize};

use crate::error::{PlaygroundError, Result};
use crate::train::stats::IterationStats;

/// Mini-batch size and iteration cap for a playground session.
///
/// One iteration is a full pass over the training split in batches of
/// `batch_size`; `Playground::step` stops advancing at `max_iterations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub batch_size: usize,
    pub max_iterations: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { batch_size: 10, max_iterations: 1000 }
    }
}

impl TrainConfig {
    pub fn new(batch_size: usize, max_iterations: usize) -> Self {
        TrainConfig { batch_size, max_iterations }
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(PlaygroundError::invalid("batch size must be at least 1"));
        }
        if self.max_iterations == 0 {
            return Err(PlaygroundError::invalid("max iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Hooks for driving `Playground::run` from a worker thread.
///
/// - `progress_tx` - one `IterationStats` is sent per completed iteration.
///                   If the receiver is dropped the run stops.
/// - `stop_flag`   - when set to `true` from another thread the run stops
///                   after the current iteration.
#[derive(Debug, Default, Clone)]
pub struct RunControl {
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl RunControl {
    pub fn new() -> Self {
        RunControl::default()
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<IterationStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_flag.as_ref().map(|f| f.load(Ordering::Relaxed)).unwrap_or(false)
    }
}
