//! Descriptive statistics and small numeric helpers
//!
//! Variance and standard deviation are population statistics (divide by `n`).

use crate::error::{PlaygroundError, Result};

pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(PlaygroundError::EmptyInput("mean"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn variance(values: &[f64]) -> Result<f64> {
    let avg = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    Ok(squared / values.len() as f64)
}

pub fn standard_deviation(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Rescales values linearly onto `[new_min, new_max]`.
///
/// A constant input maps every value to `new_min`.
pub fn min_max_normalize(values: &[f64], new_min: f64, new_max: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return vec![new_min; values.len()];
    }

    values
        .iter()
        .map(|v| new_min + ((v - min) / range) * (new_max - new_min))
        .collect()
}

/// Standardises values to zero mean and unit variance.
///
/// Zero spread maps every value to 0.
pub fn z_score_normalize(values: &[f64]) -> Result<Vec<f64>> {
    let avg = mean(values)?;
    let std = standard_deviation(values)?;
    if std == 0.0 {
        return Ok(vec![0.0; values.len()]);
    }
    Ok(values.iter().map(|v| (v - avg) / std).collect())
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * clamp(t, 0.0, 1.0)
}

/// Maps `value` from `[in_min, in_max]` to `[out_min, out_max]` without clamping.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + ((value - in_min) / (in_max - in_min)) * (out_max - out_min)
}

pub fn approximately(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Half-open sequence `start, start + step, ...` below `end`.
///
/// A non-positive step or a non-finite bound yields an empty sequence.
pub fn range_step(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let count = ((end - start) / step).ceil();
    if !count.is_finite() || count <= 0.0 {
        return Vec::new();
    }
    (0..count as usize)
        .map(|i| start + i as f64 * step)
        .take_while(|&value| value < end)
        .collect()
}
