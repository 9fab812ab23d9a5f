pub mod config;
pub mod network;

pub use config::{ModelConfig, MAX_NEURONS};
pub use network::Network;
