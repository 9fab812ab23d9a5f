use serde::{Serialize, Deserialize};

use crate::dataset::generators::{DEFAULT_ARMS, DEFAULT_CLUSTERS};
use crate::dataset::shape::Shape;
use crate::error::{PlaygroundError, Result};

/// Top of the percent-style noise slider.
pub const MAX_NOISE_PERCENT: f64 = 50.0;

/// Coordinate noise as a fraction in [0, 1] of the shape's characteristic
/// scale.
///
/// Deserializes from a bare number and rejects anything outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NoiseLevel(f64);

impl NoiseLevel {
    pub const NONE: NoiseLevel = NoiseLevel(0.0);

    pub fn fraction(value: f64) -> Result<NoiseLevel> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(PlaygroundError::invalid(format!(
                "noise fraction must be within [0, 1], got {value}"
            )));
        }
        Ok(NoiseLevel(value))
    }

    /// Converts the 0–50 slider scale to a fraction.
    pub fn from_percent(percent: f64) -> Result<NoiseLevel> {
        if !percent.is_finite() || !(0.0..=MAX_NOISE_PERCENT).contains(&percent) {
            return Err(PlaygroundError::invalid(format!(
                "noise percent must be within [0, {MAX_NOISE_PERCENT}], got {percent}"
            )));
        }
        Ok(NoiseLevel(percent / MAX_NOISE_PERCENT))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn as_percent(self) -> f64 {
        self.0 * MAX_NOISE_PERCENT
    }
}

impl TryFrom<f64> for NoiseLevel {
    type Error = PlaygroundError;

    fn try_from(value: f64) -> Result<Self> {
        NoiseLevel::fraction(value)
    }
}

impl From<NoiseLevel> for f64 {
    fn from(n: NoiseLevel) -> f64 {
        n.0
    }
}

/// Everything needed to produce a dataset and its train/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub shape: Shape,
    pub sample_count: usize,
    pub noise: NoiseLevel,
    /// Fraction of samples held out for testing, in (0, 1).
    pub test_ratio: f64,
    /// Cluster count for `Shape::Gaussian`.
    pub clusters: usize,
    /// Arm count for `Shape::Spiral`.
    pub arms: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            shape: Shape::Circle,
            sample_count: 500,
            noise: NoiseLevel::NONE,
            test_ratio: 0.1,
            clusters: DEFAULT_CLUSTERS,
            arms: DEFAULT_ARMS,
        }
    }
}

impl GenerationConfig {
    pub fn new(shape: Shape, sample_count: usize) -> Self {
        GenerationConfig { shape, sample_count, ..GenerationConfig::default() }
    }

    pub fn with_noise(mut self, noise: NoiseLevel) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_test_ratio(mut self, ratio: f64) -> Self {
        self.test_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(PlaygroundError::invalid("sample count must be at least 1"));
        }
        validate_test_ratio(self.test_ratio)?;
        if self.clusters == 0 {
            return Err(PlaygroundError::invalid("cluster count must be at least 1"));
        }
        if self.arms == 0 {
            return Err(PlaygroundError::invalid("spiral arm count must be at least 1"));
        }
        let classes = match self.shape {
            Shape::Gaussian => Some((self.clusters, "cluster")),
            Shape::Spiral => Some((self.arms, "spiral arm")),
            Shape::Moons => Some((2, "moon")),
            Shape::Circle | Shape::Xor => None,
        };
        if let Some((n, what)) = classes {
            if self.sample_count < n {
                return Err(PlaygroundError::invalid(format!(
                    "sample count {} is smaller than {what} count {n}", self.sample_count
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_test_ratio(ratio: f64) -> Result<()> {
    if ratio.is_nan() || ratio <= 0.0 || ratio >= 1.0 {
        return Err(PlaygroundError::invalid(format!(
            "test ratio must be strictly between 0 and 1, got {ratio}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_scale_maps_onto_fraction() {
        assert_eq!(NoiseLevel::from_percent(25.0).unwrap().value(), 0.5);
        assert_eq!(NoiseLevel::from_percent(50.0).unwrap().value(), 1.0);
        assert!(NoiseLevel::from_percent(51.0).is_err());
        assert!(NoiseLevel::fraction(-0.1).is_err());
        assert!(NoiseLevel::fraction(f64::NAN).is_err());
    }

    #[test]
    fn deserializing_rejects_out_of_range_noise() {
        let ok: GenerationConfig = serde_json::from_str(r#"{"noise": 0.3}"#).unwrap();
        assert_eq!(ok.noise.value(), 0.3);
        assert_eq!(ok.sample_count, 500);
        assert!(serde_json::from_str::<GenerationConfig>(r#"{"noise": 3.0}"#).is_err());
    }

    #[test]
    fn validate_catches_bad_fields() {
        assert!(GenerationConfig::default().validate().is_ok());
        assert_eq!(GenerationConfig::default().clusters, DEFAULT_CLUSTERS);
        assert_eq!(GenerationConfig::default().arms, DEFAULT_ARMS);
        assert!(GenerationConfig::new(Shape::Xor, 0).validate().is_err());
        assert!(GenerationConfig::default().with_test_ratio(1.0).validate().is_err());
        let mut cfg = GenerationConfig::default();
        cfg.arms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_requires_one_sample_per_class() {
        let mut cfg = GenerationConfig::new(Shape::Gaussian, 3);
        assert!(cfg.validate().is_err());
        cfg.sample_count = 4;
        assert!(cfg.validate().is_ok());
        assert!(GenerationConfig::new(Shape::Moons, 1).validate().is_err());
        assert!(GenerationConfig::new(Shape::Spiral, 2).validate().is_err());
        assert!(GenerationConfig::new(Shape::Circle, 1).validate().is_ok());
    }
}
