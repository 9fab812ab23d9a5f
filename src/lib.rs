pub mod error;
pub mod math;
pub mod dataset;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod optim;
pub mod network;
pub mod backend;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{ParseWarning, PlaygroundError, Result};
pub use math::{Matrix, RandomSource, ReplaySource};
pub use dataset::{
    generate, generate_split, load_delimited_with, load_from_delimited, split,
    Dataset, DelimitedImport, DelimitedOptions, GenerationConfig, NoiseLevel, Sample, Shape, Split,
};
pub use activation::ActivationFunction;
pub use layers::{Layer, WeightInit};
pub use loss::LossType;
pub use optim::{OptimizerKind, Regularization};
pub use network::{ModelConfig, Network};
pub use backend::{Backend, Batch, DenseBackend, LayerParameters, StepMetrics};
pub use train::{DecisionGrid, IterationStats, Playground, PlaygroundSnapshot, RunControl, TrainConfig, TrainingState};
pub use config::PlaygroundConfig;
