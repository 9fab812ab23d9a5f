pub mod optimizer;
pub mod regularization;

pub use optimizer::{Optimizer, OptimizerKind};
pub use regularization::Regularization;
