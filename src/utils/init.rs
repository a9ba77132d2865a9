//! Variance-scaled weight initialisers.
//!
//! Each call returns one sampled scalar from the injected random source.

use rand::Rng;

use crate::error::{PlaygroundError, Result};
use crate::utils::rng::{random_in_range, random_normal};

/// Xavier/Glorot uniform limit: `sqrt(6 / (fan_in + fan_out))`.
pub fn xavier_limit(fan_in: usize, fan_out: usize) -> Result<f64> {
    let fan = fan_in + fan_out;
    if fan == 0 {
        return Err(PlaygroundError::InvalidParameter {
            name: "fan_in + fan_out",
            value: 0.0,
            reason: "must be positive",
        });
    }
    Ok((6.0 / fan as f64).sqrt())
}

/// He normal standard deviation: `sqrt(2 / fan_in)`.
pub fn he_std(fan_in: usize) -> Result<f64> {
    if fan_in == 0 {
        return Err(PlaygroundError::InvalidParameter {
            name: "fan_in",
            value: 0.0,
            reason: "must be positive",
        });
    }
    Ok((2.0 / fan_in as f64).sqrt())
}

/// Samples one weight uniformly from `[-limit, limit)` (Xavier/Glorot).
pub fn xavier_init<R: Rng + ?Sized>(rng: &mut R, fan_in: usize, fan_out: usize) -> Result<f64> {
    let limit = xavier_limit(fan_in, fan_out)?;
    Ok(random_in_range(rng, -limit, limit))
}

/// Samples one weight from `N(0, 2 / fan_in)` (He).
pub fn he_init<R: Rng + ?Sized>(rng: &mut R, fan_in: usize) -> Result<f64> {
    let std = he_std(fan_in)?;
    Ok(random_normal(rng, 0.0, std))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rng::seeded_rng;

    #[test]
    fn test_xavier_within_limit() {
        let mut rng = seeded_rng(42);
        // limit = sqrt(6 / 150) = 0.2
        let limit = (6.0f64 / 150.0).sqrt();
        for _ in 0..1000 {
            let w = xavier_init(&mut rng, 100, 50).unwrap();
            assert!(w >= -limit && w < limit, "weight {} outside Xavier range", w);
        }
    }

    #[test]
    fn test_he_spread() {
        let mut rng = seeded_rng(7);
        let samples: Vec<f64> = (0..20_000).map(|_| he_init(&mut rng, 8).unwrap()).collect();
        let var = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
        // expected variance 2 / 8 = 0.25
        assert!((var - 0.25).abs() < 0.02);
    }

    #[test]
    fn test_zero_fan_rejected() {
        let mut rng = seeded_rng(1);
        assert!(xavier_init(&mut rng, 0, 0).is_err());
        assert!(he_init(&mut rng, 0).is_err());
    }

    #[test]
    fn test_same_seed_same_weight() {
        let a = xavier_init(&mut seeded_rng(9), 4, 4).unwrap();
        let b = xavier_init(&mut seeded_rng(9), 4, 4).unwrap();
        assert_eq!(a, b);
    }
}
