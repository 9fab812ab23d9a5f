use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::dataset::GenerationConfig;
use crate::error::Result;
use crate::network::ModelConfig;
use crate::train::TrainConfig;

/// Everything a playground session is configured from.
///
/// Every section falls back to its defaults, so `{}` is a valid config and
/// a file may override only the fields it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub dataset: GenerationConfig,
    pub model: ModelConfig,
    pub training: TrainConfig,
    /// Seeds data generation, shuffling and weight init. `None` draws from
    /// OS entropy.
    pub seed: Option<u64>,
}

impl PlaygroundConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.dataset.validate()?;
        self.model.validate()?;
        self.training.validate()
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(text: &str) -> Result<PlaygroundConfig> {
        let config: PlaygroundConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: impl AsRef<Path>) -> Result<PlaygroundConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: PlaygroundConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Shape;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PlaygroundConfig::from_json_str("{}").unwrap(), PlaygroundConfig::default());
    }

    #[test]
    fn partial_sections_override_defaults() {
        let cfg = PlaygroundConfig::from_json_str(
            r#"{"dataset": {"shape": "spiral", "noise": 0.25}, "training": {"batch_size": 5}, "seed": 7}"#,
        ).unwrap();
        assert_eq!(cfg.dataset.shape, Shape::Spiral);
        assert_eq!(cfg.dataset.noise.value(), 0.25);
        assert_eq!(cfg.dataset.sample_count, 500);
        assert_eq!(cfg.training.batch_size, 5);
        assert_eq!(cfg.training.max_iterations, 1000);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(PlaygroundConfig::from_json_str(r#"{"dataset": {"test_ratio": 1.5}}"#).is_err());
        assert!(PlaygroundConfig::from_json_str(r#"{"dataset": {"noise": 2.0}}"#).is_err());
        assert!(PlaygroundConfig::from_json_str(r#"{"dataset": {"shape": "torus"}}"#).is_err());
        assert!(PlaygroundConfig::from_json_str(r#"{"training": {"batch_size": 0}}"#).is_err());
    }
}
