use serde::{Serialize, Deserialize};

use crate::error::{PlaygroundError, Result};

/// One labelled point: input features plus a one-hot class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    /// One-hot, length = class count.
    pub label: Vec<f64>,
}

impl Sample {
    /// Index of the hot entry in `label`.
    pub fn class_index(&self) -> usize {
        argmax(&self.label)
    }
}

/// Axis-aligned extent of a 2-D dataset, used by renderers to map features
/// onto screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Grows each side by `fraction` of the span. Spans under 1.0 are padded
    /// as if they were 1.0 so degenerate data still gets a visible margin.
    pub fn padded(&self, fraction: f64) -> Bounds {
        let dx = (self.x_max - self.x_min).max(1.0) * fraction;
        let dy = (self.y_max - self.y_min).max(1.0) * fraction;
        Bounds {
            x_min: self.x_min - dx,
            x_max: self.x_max + dx,
            y_min: self.y_min - dy,
            y_max: self.y_max + dy,
        }
    }
}

/// An ordered, immutable collection of samples sharing one feature width and
/// one label encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    samples: Vec<Sample>,
    feature_dim: usize,
    class_count: usize,
}

impl Dataset {
    /// Builds a dataset from samples whose feature and label widths agree.
    ///
    /// An empty sample list is accepted and yields zero widths.
    pub fn new(samples: Vec<Sample>) -> Result<Dataset> {
        let feature_dim = samples.first().map(|s| s.features.len()).unwrap_or(0);
        let class_count = samples.first().map(|s| s.label.len()).unwrap_or(0);
        Dataset::with_dims(samples, feature_dim, class_count)
    }

    fn with_dims(samples: Vec<Sample>, feature_dim: usize, class_count: usize) -> Result<Dataset> {
        for (i, s) in samples.iter().enumerate() {
            if s.features.len() != feature_dim {
                return Err(PlaygroundError::invalid(format!(
                    "sample {i} has {} features, expected {feature_dim}",
                    s.features.len()
                )));
            }
            if s.label.len() != class_count {
                return Err(PlaygroundError::invalid(format!(
                    "sample {i} has a label of width {}, expected {class_count}",
                    s.label.len()
                )));
            }
        }
        Ok(Dataset { samples, feature_dim, class_count })
    }

    /// Builds a one-hot dataset from feature rows and scalar class indices.
    pub fn from_class_indices(
        features: Vec<Vec<f64>>,
        classes: &[usize],
        class_count: usize,
    ) -> Result<Dataset> {
        if features.len() != classes.len() {
            return Err(PlaygroundError::invalid(format!(
                "{} feature rows but {} class indices",
                features.len(),
                classes.len()
            )));
        }
        let feature_dim = features.first().map(|f| f.len()).unwrap_or(0);
        let mut samples = Vec::with_capacity(features.len());
        for (row, (f, &class)) in features.into_iter().zip(classes).enumerate() {
            if class >= class_count {
                return Err(PlaygroundError::invalid(format!(
                    "row {row}: class {class} is out of range for {class_count} classes"
                )));
            }
            samples.push(Sample { features: f, label: one_hot(class, class_count) });
        }
        Dataset::with_dims(samples, feature_dim, class_count)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn inputs(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(|s| s.features.clone()).collect()
    }

    pub fn targets(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(|s| s.label.clone()).collect()
    }

    /// One-hot labels converted to scalar class indices.
    pub fn class_indices(&self) -> Vec<usize> {
        self.samples.iter().map(Sample::class_index).collect()
    }

    /// New dataset holding the samples at `indices`, in that order.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
            feature_dim: self.feature_dim,
            class_count: self.class_count,
        }
    }

    /// Extent of the first two features, or `None` for empty or
    /// less-than-2-D data.
    pub fn bounding_box(&self) -> Option<Bounds> {
        if self.feature_dim < 2 || self.samples.is_empty() {
            return None;
        }
        let mut b = Bounds {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for s in &self.samples {
            let (x, y) = (s.features[0], s.features[1]);
            b.x_min = b.x_min.min(x);
            b.x_max = b.x_max.max(x);
            b.y_min = b.y_min.min(y);
            b.y_max = b.y_max.max(y);
        }
        Some(b)
    }
}

/// `[0, .., 1, .., 0]` with the 1 at `class`.
pub fn one_hot(class: usize, class_count: usize) -> Vec<f64> {
    let mut v = vec![0.0; class_count];
    if class < class_count {
        v[class] = 1.0;
    }
    v
}

/// Index of the maximum element; 0 for an empty slice.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_round_trips_through_one_hot() {
        let ds = Dataset::from_class_indices(
            vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]],
            &[2, 0, 1],
            3,
        ).unwrap();
        assert_eq!(ds.class_indices(), vec![2, 0, 1]);
        assert_eq!(ds.samples()[0].label, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_ragged_features() {
        let samples = vec![
            Sample { features: vec![0.0, 1.0], label: vec![1.0, 0.0] },
            Sample { features: vec![0.0], label: vec![1.0, 0.0] },
        ];
        assert!(matches!(Dataset::new(samples), Err(PlaygroundError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_out_of_range_class() {
        let err = Dataset::from_class_indices(vec![vec![0.0]], &[3], 2);
        assert!(err.is_err());
    }

    #[test]
    fn bounding_box_covers_points() {
        let ds = Dataset::from_class_indices(
            vec![vec![-1.0, 2.0], vec![3.0, -4.0]],
            &[0, 1],
            2,
        ).unwrap();
        let b = ds.bounding_box().unwrap();
        assert_eq!((b.x_min, b.x_max, b.y_min, b.y_max), (-1.0, 3.0, -4.0, 2.0));
    }

    #[test]
    fn subset_preserves_order() {
        let ds = Dataset::from_class_indices(
            vec![vec![0.0], vec![1.0], vec![2.0]],
            &[0, 1, 0],
            2,
        ).unwrap();
        let sub = ds.subset(&[2, 0]);
        assert_eq!(sub.inputs(), vec![vec![2.0], vec![0.0]]);
        assert_eq!(sub.class_count(), 2);
    }
}
