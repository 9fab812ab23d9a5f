pub mod session;
pub mod stats;
pub mod train_config;

pub use session::{DecisionGrid, Playground, PlaygroundSnapshot};
pub use stats::{IterationStats, TrainingState};
pub use train_config::{RunControl, TrainConfig};
