//! Closed-form samplers for the playground's synthetic 2-D datasets.
//!
//! Every generator labels a point from its pre-noise geometry (or from the
//! cluster/arm it was drawn for), then perturbs each coordinate by an
//! independent `Uniform(-A, A)` offset where `A = noise * scale / 2`. A zero
//! amplitude skips the noise draws entirely, so a noise-free run reproduces the
//! exact shape and consumes only the geometric draws.

use serde::{Serialize, Deserialize};
use std::f64::consts::{PI, SQRT_2};

use crate::dataset::config::GenerationConfig;
use crate::dataset::sample::{one_hot, Dataset, Sample};
use crate::dataset::shape::{Shape, CIRCLE_RADIUS};
use crate::dataset::split::{split, Split};
use crate::error::{PlaygroundError, Result};
use crate::math::random::RandomSource;

/// Default number of Gaussian clusters.
pub const DEFAULT_CLUSTERS: usize = 4;
/// Default number of spiral arms.
pub const DEFAULT_ARMS: usize = 3;

/// Standard deviation of each Gaussian cluster.
pub const CLUSTER_STD_DEV: f64 = 0.5;
/// Distance of each cluster center from the origin; puts 4 clusters on the
/// corners (±2, ±2).
pub const CLUSTER_RING_RADIUS: f64 = 2.0 * SQRT_2;

/// Spiral radius at t = 0.
pub const SPIRAL_INNER_RADIUS: f64 = 0.2;
/// Spiral radius growth per radian.
pub const SPIRAL_GROWTH: f64 = 0.5;

/// A user-placed point for [`from_points`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub class: usize,
}

/// Builds the dataset described by `config`.
///
/// `config.noise` is ignored for `Shape::Gaussian`; cluster spread is fixed.
pub fn generate<R: RandomSource + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Dataset> {
    config.validate()?;
    let noise = config.noise.value();
    let dataset = match config.shape {
        Shape::Circle => generate_circle(config.sample_count, noise, rng)?,
        Shape::Xor => generate_xor(config.sample_count, noise, rng)?,
        Shape::Gaussian => generate_gaussian_clusters(config.sample_count, config.clusters, rng)?,
        Shape::Spiral => generate_spiral(config.sample_count, noise, config.arms, rng)?,
        Shape::Moons => generate_moons(config.sample_count, noise, rng)?,
    };
    tracing::debug!(
        shape = %config.shape,
        requested = config.sample_count,
        produced = dataset.len(),
        noise,
        "generated dataset"
    );
    Ok(dataset)
}

/// [`generate`] followed by [`split`] at `config.test_ratio`.
pub fn generate_split<R: RandomSource + ?Sized>(config: &GenerationConfig, rng: &mut R) -> Result<Split> {
    let dataset = generate(config, rng)?;
    split(&dataset, config.test_ratio, rng)
}

/// Uniform points in a disk of radius 5; class 0 inside radius 2.5.
pub fn generate_circle<R: RandomSource + ?Sized>(count: usize, noise: f64, rng: &mut R) -> Result<Dataset> {
    check_count(count)?;
    let amp = amplitude(Shape::Circle, noise)?;
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let angle = rng.uniform(0.0, 2.0 * PI);
        let r = rng.uniform(0.0, CIRCLE_RADIUS);
        let (x, y) = (r * angle.cos(), r * angle.sin());
        let inside = x.hypot(y) < CIRCLE_RADIUS / 2.0;
        let class = if inside { 0 } else { 1 };
        samples.push(noisy_sample(x, y, amp, class, 2, rng));
    }

    Dataset::new(samples)
}

/// Uniform points on [-1, 1]²; class 1 when x and y fall on opposite sides
/// of zero.
pub fn generate_xor<R: RandomSource + ?Sized>(count: usize, noise: f64, rng: &mut R) -> Result<Dataset> {
    check_count(count)?;
    let amp = amplitude(Shape::Xor, noise)?;
    let mut samples = Vec::with_capacity(count);

    for _ in 0..count {
        let x = rng.uniform(-1.0, 1.0);
        let y = rng.uniform(-1.0, 1.0);
        let class = if (x > 0.0) != (y > 0.0) { 1 } else { 0 };
        samples.push(noisy_sample(x, y, amp, class, 2, rng));
    }

    Dataset::new(samples)
}

/// `count / num_clusters` normal samples around each of `num_clusters`
/// centers spaced evenly on a ring. The remainder is dropped.
pub fn generate_gaussian_clusters<R: RandomSource + ?Sized>(
    count: usize,
    num_clusters: usize,
    rng: &mut R,
) -> Result<Dataset> {
    let per_cluster = per_class(count, num_clusters, "cluster")?;
    let mut samples = Vec::with_capacity(per_cluster * num_clusters);

    for (c, (cx, cy)) in cluster_centers(num_clusters).into_iter().enumerate() {
        for _ in 0..per_cluster {
            let (z1, z2) = rng.normal_pair();
            samples.push(Sample {
                features: vec![cx + z1 * CLUSTER_STD_DEV, cy + z2 * CLUSTER_STD_DEV],
                label: one_hot(c, num_clusters),
            });
        }
    }

    Dataset::new(samples)
}

/// Centers used by [`generate_gaussian_clusters`], in class order.
pub fn cluster_centers(num_clusters: usize) -> Vec<(f64, f64)> {
    let start = -0.75 * PI;
    (0..num_clusters)
        .map(|c| {
            let theta = start + 2.0 * PI * c as f64 / num_clusters as f64;
            (CLUSTER_RING_RADIUS * theta.cos(), CLUSTER_RING_RADIUS * theta.sin())
        })
        .collect()
}

/// `num_arms` interleaved Archimedean arms, `count / num_arms` points each.
///
/// Arm `c` sweeps `t` over [0, 2π) with radius `0.2 + 0.5t`, rotated by
/// `2πc / num_arms`.
pub fn generate_spiral<R: RandomSource + ?Sized>(
    count: usize,
    noise: f64,
    num_arms: usize,
    rng: &mut R,
) -> Result<Dataset> {
    let per_arm = per_class(count, num_arms, "spiral arm")?;
    let amp = amplitude(Shape::Spiral, noise)?;
    let mut samples = Vec::with_capacity(per_arm * num_arms);

    for c in 0..num_arms {
        let offset = 2.0 * PI * c as f64 / num_arms as f64;
        for i in 0..per_arm {
            let t = 2.0 * PI * i as f64 / per_arm as f64;
            let r = SPIRAL_INNER_RADIUS + SPIRAL_GROWTH * t;
            let theta = t + offset;
            samples.push(noisy_sample(r * theta.sin(), r * theta.cos(), amp, c, num_arms, rng));
        }
    }

    Dataset::new(samples)
}

/// Two interleaving half circles, `count / 2` points each.
pub fn generate_moons<R: RandomSource + ?Sized>(count: usize, noise: f64, rng: &mut R) -> Result<Dataset> {
    let per_moon = per_class(count, 2, "moon")?;
    let amp = amplitude(Shape::Moons, noise)?;
    let mut samples = Vec::with_capacity(per_moon * 2);

    for class in 0..2 {
        for _ in 0..per_moon {
            let phi = rng.uniform(0.0, PI);
            let (x, y) = if class == 0 {
                (phi.cos(), phi.sin())
            } else {
                (1.0 - phi.cos(), 0.5 - phi.sin())
            };
            samples.push(noisy_sample(x, y, amp, class, 2, rng));
        }
    }

    Dataset::new(samples)
}

/// Dataset from hand-placed points. Class count is the largest class + 1.
pub fn from_points(points: &[LabeledPoint]) -> Result<Dataset> {
    let class_count = points
        .iter()
        .map(|p| p.class + 1)
        .max()
        .ok_or_else(|| PlaygroundError::invalid("no points provided for custom dataset"))?;

    Dataset::from_class_indices(
        points.iter().map(|p| vec![p.x, p.y]).collect(),
        &points.iter().map(|p| p.class).collect::<Vec<_>>(),
        class_count,
    )
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(PlaygroundError::invalid("sample count must be at least 1"));
    }
    Ok(())
}

fn per_class(count: usize, classes: usize, what: &str) -> Result<usize> {
    check_count(count)?;
    if classes == 0 {
        return Err(PlaygroundError::invalid(format!("{what} count must be at least 1")));
    }
    let per = count / classes;
    if per == 0 {
        return Err(PlaygroundError::invalid(format!(
            "sample count {count} is smaller than {what} count {classes}"
        )));
    }
    Ok(per)
}

/// Per-coordinate noise half-width for `shape` at noise fraction `noise`.
pub(crate) fn amplitude(shape: Shape, noise: f64) -> Result<f64> {
    if !noise.is_finite() || !(0.0..=1.0).contains(&noise) {
        return Err(PlaygroundError::invalid(format!(
            "noise fraction must be within [0, 1], got {noise}"
        )));
    }
    Ok(noise * shape.characteristic_scale() / 2.0)
}

fn jitter<R: RandomSource + ?Sized>(value: f64, amp: f64, rng: &mut R) -> f64 {
    if amp == 0.0 {
        value
    } else {
        value + rng.uniform(-amp, amp)
    }
}

fn noisy_sample<R: RandomSource + ?Sized>(
    x: f64,
    y: f64,
    amp: f64,
    class: usize,
    class_count: usize,
    rng: &mut R,
) -> Sample {
    Sample {
        features: vec![jitter(x, amp, rng), jitter(y, amp, rng)],
        label: one_hot(class, class_count),
    }
}
