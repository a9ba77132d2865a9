//! Random sources and sampling helpers.
//!
//! Every stochastic routine in the crate takes an injected `&mut R` with
//! `R: Rng + ?Sized`, so tests pass a [`seeded_rng`] and demos an
//! [`entropy_rng`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Substitute seed used when the caller passes zero.
const FALLBACK_SEED: u64 = 0x9e3779b97f4a7c15;

/// Reproducible RNG (if `seed` is zero, use a fixed value).
pub fn seeded_rng(seed: u64) -> StdRng {
    let seed = if seed == 0 { FALLBACK_SEED } else { seed };
    StdRng::seed_from_u64(seed)
}

/// RNG seeded from the operating system.
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Seeded when `seed` is given, otherwise from entropy.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => seeded_rng(seed),
        None => entropy_rng(),
    }
}

/// Uniform sample in `[min, max)`. Returns `min` for an empty range.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Integer sample in `[min, max)`. Returns `min` for an empty range.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Centered jitter: uniform in `[-spread / 2, spread / 2)`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * spread
}

/// Gaussian sample with the given mean and standard deviation.
///
/// A non-finite or negative `std` degrades to returning `mean`.
pub fn random_normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    match Normal::new(mean, std) {
        Ok(normal) => normal.sample(rng),
        Err(_) => mean,
    }
}
