pub mod dense;

pub use dense::{Layer, LayerTrace, WeightInit};
