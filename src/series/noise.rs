//! Bounded random perturbations.
//!
//! All draws go through `Distribution::sample` so callers can pass
//! `&mut dyn RngCore` as well as concrete generators.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use rand_distr::StandardNormal;

/// Closed numeric interval used for clamping derived fields.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Percentages and 0-100 indices.
    pub const INDEX: Bounds = Bounds {
        min: 0.0,
        max: 100.0,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Lower bound only.
    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
        }
    }

    /// Upper bound only.
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Zero-mean Gaussian draw with standard deviation `sigma`.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, sigma: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    z * sigma
}

/// Uniform draw from `[low, high)`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    let u: f64 = Standard.sample(rng);
    low + u * (high - low)
}

/// `center` plus Gaussian noise, clamped to `bounds`.
pub fn bounded<R: Rng + ?Sized>(rng: &mut R, center: f64, sigma: f64, bounds: Bounds) -> f64 {
    bounds.clamp(center + gaussian(rng, sigma))
}
