// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Random Normal Source
// ─────────────────────────────────────────────────────────────────────
//! Normal deviates for the Wiener increment dW.
//!
//! `BoxMuller` is the production source; `FixedNormal` replaces it
//! wherever a run has to be reproduced exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of normally distributed samples.
pub trait NormalSource {
    /// One sample from N(mean, stdev²).
    fn sample(&mut self, mean: f64, stdev: f64) -> f64;
}

impl<T: NormalSource + ?Sized> NormalSource for Box<T> {
    fn sample(&mut self, mean: f64, stdev: f64) -> f64 {
        (**self).sample(mean, stdev)
    }
}

/// Box-Muller transform over two uniform draws.
#[derive(Debug, Clone)]
pub struct BoxMuller<R = SmallRng> {
    rng: R,
}

impl BoxMuller<SmallRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_os_rng())
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// `seeded` when a seed is given, `from_entropy` otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> BoxMuller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Standard normal z. Consumes exactly two uniform draws.
    pub fn standard(&mut self) -> f64 {
        // [0, 1) → (0, 1]: keeps ln(u) finite.
        let u = 1.0 - self.rng.random::<f64>();
        let v = self.rng.random::<f64>();
        (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos()
    }
}

impl<R: Rng> NormalSource for BoxMuller<R> {
    fn sample(&mut self, mean: f64, stdev: f64) -> f64 {
        self.standard() * stdev + mean
    }
}

/// Deterministic source that always returns the same z-score.
///
/// `FixedNormal(0.0)` makes every step noise-free regardless of σ.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedNormal(pub f64);

impl NormalSource for FixedNormal {
    fn sample(&mut self, mean: f64, stdev: f64) -> f64 {
        self.0 * stdev + mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = BoxMuller::seeded(42);
        let mut b = BoxMuller::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.sample(0.0, 1.0), b.sample(0.0, 1.0));
        }
    }

    #[test]
    fn test_samples_finite() {
        let mut src = BoxMuller::seeded(7);
        assert!((0..10_000).all(|_| src.standard().is_finite()));
    }

    #[test]
    fn test_consumes_two_uniform_draws() {
        let rng = SmallRng::seed_from_u64(99);
        let mut reference = rng.clone();
        let mut src = BoxMuller::new(rng);
        src.sample(0.0, 1.0);
        let _: f64 = reference.random();
        let _: f64 = reference.random();
        let mut after = src.into_inner();
        assert_eq!(after.random::<u64>(), reference.random::<u64>());
    }

    #[test]
    fn test_moments() {
        let mut src = BoxMuller::seeded(2024);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| src.sample(3.0, 0.5)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 3.0).abs() < 0.02, "mean={mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "stdev={}", var.sqrt());
    }

    #[test]
    fn test_zero_stdev_returns_mean() {
        let mut src = BoxMuller::seeded(1);
        assert_eq!(src.sample(0.25, 0.0), 0.25);
    }

    #[test]
    fn test_fixed_normal() {
        let mut src = FixedNormal(2.0);
        assert_eq!(src.sample(1.0, 0.5), 2.0);
        assert_eq!(FixedNormal::default().sample(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_boxed_source() {
        let mut src: Box<dyn NormalSource + Send> = Box::new(FixedNormal(1.0));
        assert_eq!(src.sample(0.0, 3.0), 3.0);
    }
}
