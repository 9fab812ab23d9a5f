use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f64::consts::PI;

/// A source of uniform draws on `[0, 1)`.
///
/// Every dataset generator and the splitter take one of these so tests can
/// pin the exact sequence of draws. Any `rand` generator qualifies through the
/// blanket impl below.
pub trait RandomSource {
    /// Next uniform draw on `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw on `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn index(&mut self, bound: usize) -> usize {
        let i = (self.next_unit() * bound as f64) as usize;
        i.min(bound - 1)
    }

    /// Two independent N(0, 1) samples via the Box-Muller transform.
    fn normal_pair(&mut self) -> (f64, f64) {
        // u1 on (0, 1] so ln(u1) is finite.
        let u1 = (1.0 - self.next_unit()).max(f64::MIN_POSITIVE);
        let u2 = self.next_unit();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        (radius * theta.cos(), radius * theta.sin())
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of uniform draws, wrapping around at the end.
///
/// Useful for pinning generator output to exact coordinates, or for replaying
/// a recorded draw sequence. Values are returned as given, so a script may
/// include `1.0` to hit the closed end of a range.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// # Panics
    /// Panics if `draws` is empty.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "ReplaySource needs at least one draw");
        ReplaySource { draws, cursor: 0 }
    }

    /// Number of draws consumed so far (including wrap-arounds).
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn next_unit(&mut self) -> f64 {
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v
    }
}

/// Deterministic generator for reproducible runs.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Non-deterministic generator for production use.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}
