use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlaygroundError;

/// Radius of the disk sampled by the circle generator.
pub const CIRCLE_RADIUS: f64 = 5.0;

/// The pattern that defines a synthetic dataset's class boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Inner disk vs. outer ring, 2 classes.
    Circle,
    /// Quadrant parity on [-1, 1]², 2 classes.
    Xor,
    /// Normal clusters around fixed centers, one class per cluster.
    Gaussian,
    /// Interleaved spiral arms, one class per arm.
    Spiral,
    /// Two interleaving half circles, 2 classes.
    Moons,
}

impl Shape {
    pub const ALL: [Shape; 5] = [Shape::Circle, Shape::Xor, Shape::Gaussian, Shape::Spiral, Shape::Moons];

    /// The length that a noise fraction of 1.0 is measured against.
    /// Per-coordinate noise amplitude is `noise * scale / 2`.
    pub fn characteristic_scale(self) -> f64 {
        match self {
            Shape::Circle => CIRCLE_RADIUS,
            Shape::Xor | Shape::Spiral | Shape::Moons | Shape::Gaussian => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Xor => "xor",
            Shape::Gaussian => "gaussian",
            Shape::Spiral => "spiral",
            Shape::Moons => "moons",
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Circle
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| PlaygroundError::invalid(format!("unknown dataset shape '{}'", s.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("XOR".parse::<Shape>().unwrap(), Shape::Xor);
        assert_eq!(" spiral ".parse::<Shape>().unwrap(), Shape::Spiral);
        for shape in Shape::ALL {
            assert_eq!(shape.to_string().parse::<Shape>().unwrap(), shape);
        }
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        let err = "sine".parse::<Shape>().unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidArgument(_)));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Shape::Gaussian).unwrap(), "\"gaussian\"");
    }
}
