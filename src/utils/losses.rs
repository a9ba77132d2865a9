//! Loss functions and their gradients with respect to the prediction
//!
//! Pointwise losses are exposed through [`LossKind`]; the vector forms
//! (`mean_squared_error`, `mean_absolute_error`, `categorical_cross_entropy`)
//! average or sum over equally sized slices.
//!
//! Cross-entropy clips predicted probabilities into `[ε, 1 - ε]` with
//! `ε = 1e-15` before taking logarithms or dividing.

use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, Result};

/// Probability clipping bound for cross-entropy losses.
pub const CROSS_ENTROPY_EPSILON: f64 = 1e-15;

/// Default Huber transition point.
pub const DEFAULT_HUBER_DELTA: f64 = 1.0;

fn clip_probability(p: f64) -> f64 {
    p.clamp(CROSS_ENTROPY_EPSILON, 1.0 - CROSS_ENTROPY_EPSILON)
}

/// Pointwise loss catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LossKind {
    /// `½(p - a)²`
    MeanSquaredError,
    /// `|p - a|`
    MeanAbsoluteError,
    /// `-(a·ln p + (1 - a)·ln(1 - p))`
    BinaryCrossEntropy,
    /// Quadratic near zero error, linear beyond `delta`.
    Huber {
        #[serde(default = "default_huber_delta")]
        delta: f64,
    },
}

fn default_huber_delta() -> f64 {
    DEFAULT_HUBER_DELTA
}

impl LossKind {
    pub const ALL: [LossKind; 4] = [
        LossKind::MeanSquaredError,
        LossKind::MeanAbsoluteError,
        LossKind::BinaryCrossEntropy,
        LossKind::Huber {
            delta: DEFAULT_HUBER_DELTA,
        },
    ];

    pub fn loss(&self, predicted: f64, actual: f64) -> f64 {
        match *self {
            LossKind::MeanSquaredError => 0.5 * (predicted - actual).powi(2),
            LossKind::MeanAbsoluteError => (predicted - actual).abs(),
            LossKind::BinaryCrossEntropy => binary_cross_entropy(predicted, actual),
            LossKind::Huber { delta } => huber_loss(predicted, actual, delta),
        }
    }

    /// Derivative of the loss with respect to `predicted`.
    pub fn gradient(&self, predicted: f64, actual: f64) -> f64 {
        match *self {
            LossKind::MeanSquaredError => mse_gradient(predicted, actual),
            // Sub-gradient: the tie `p == a` takes the negative branch.
            LossKind::MeanAbsoluteError => {
                if predicted > actual {
                    1.0
                } else {
                    -1.0
                }
            }
            LossKind::BinaryCrossEntropy => binary_cross_entropy_gradient(predicted, actual),
            LossKind::Huber { delta } => huber_gradient(predicted, actual, delta),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LossKind::MeanSquaredError => "Mean Squared Error",
            LossKind::MeanAbsoluteError => "Mean Absolute Error",
            LossKind::BinaryCrossEntropy => "Cross-Entropy",
            LossKind::Huber { .. } => "Huber Loss",
        }
    }

    pub fn use_case(&self) -> &'static str {
        match self {
            LossKind::MeanSquaredError => "Regression",
            LossKind::MeanAbsoluteError => "Robust Regression",
            LossKind::BinaryCrossEntropy => "Binary Classification",
            LossKind::Huber { .. } => "Robust Regression",
        }
    }
}

/// Gradient of `½(p - a)²`.
pub fn mse_gradient(predicted: f64, actual: f64) -> f64 {
    predicted - actual
}

pub fn binary_cross_entropy(predicted: f64, actual: f64) -> f64 {
    let p = clip_probability(predicted);
    -(actual * p.ln() + (1.0 - actual) * (1.0 - p).ln())
}

/// Gradient of binary cross-entropy: `(p - a) / (p(1 - p))` on the clipped `p`.
pub fn binary_cross_entropy_gradient(predicted: f64, actual: f64) -> f64 {
    let p = clip_probability(predicted);
    (p - actual) / (p * (1.0 - p))
}

pub fn huber_loss(predicted: f64, actual: f64, delta: f64) -> f64 {
    let error = (predicted - actual).abs();
    if error <= delta {
        0.5 * error * error
    } else {
        delta * error - 0.5 * delta * delta
    }
}

pub fn huber_gradient(predicted: f64, actual: f64, delta: f64) -> f64 {
    let error = predicted - actual;
    if error.abs() <= delta {
        error
    } else {
        delta * error.signum()
    }
}

fn check_pair(operation: &'static str, predicted: &[f64], actual: &[f64]) -> Result<()> {
    if predicted.len() != actual.len() {
        return Err(PlaygroundError::dimension(
            operation,
            predicted.len(),
            actual.len(),
        ));
    }
    if predicted.is_empty() {
        return Err(PlaygroundError::EmptyInput(operation));
    }
    Ok(())
}

/// Mean of squared errors over two equally sized slices.
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    check_pair("mean_squared_error", predicted, actual)?;
    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a) * (p - a))
        .sum();
    Ok(total / predicted.len() as f64)
}

pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    check_pair("mean_absolute_error", predicted, actual)?;
    let total: f64 = predicted.iter().zip(actual).map(|(p, a)| (p - a).abs()).sum();
    Ok(total / predicted.len() as f64)
}

/// Categorical cross-entropy against a one-hot (or soft) target.
pub fn categorical_cross_entropy(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    check_pair("categorical_cross_entropy", predicted, actual)?;
    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(&p, &a)| a * clip_probability(p).ln())
        .sum();
    Ok(-total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_mse_pointwise_is_halved() {
        assert!((LossKind::MeanSquaredError.loss(3.0, 1.0) - 2.0).abs() < EPSILON);
        assert_eq!(LossKind::MeanSquaredError.gradient(3.0, 1.0), 2.0);
    }

    #[test]
    fn test_mae_gradient_sign() {
        assert_eq!(LossKind::MeanAbsoluteError.gradient(0.7, 0.2), 1.0);
        assert_eq!(LossKind::MeanAbsoluteError.gradient(0.1, 0.2), -1.0);
        assert_eq!(LossKind::MeanAbsoluteError.gradient(0.2, 0.2), -1.0);
    }

    #[test]
    fn test_bce_clipping_keeps_loss_finite() {
        let loss = binary_cross_entropy(0.0, 1.0);
        assert!(loss.is_finite());
        assert!((loss + CROSS_ENTROPY_EPSILON.ln()).abs() < 1e-9);
        assert!(binary_cross_entropy_gradient(1.0, 0.0).is_finite());
        assert!(binary_cross_entropy_gradient(0.0, 1.0).is_finite());
    }

    #[test]
    fn test_huber_branches() {
        assert!((huber_loss(0.5, 0.0, 1.0) - 0.125).abs() < EPSILON);
        assert!((huber_loss(3.0, 0.0, 1.0) - 2.5).abs() < EPSILON);
        assert_eq!(huber_gradient(3.0, 0.0, 1.0), 1.0);
        assert_eq!(huber_gradient(-3.0, 0.0, 0.5), -0.5);
        assert_eq!(huber_gradient(0.25, 0.0, 0.5), 0.25);
    }

    #[test]
    fn test_vector_mse() {
        let mse = mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
        assert!((mse - 4.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_vector_mismatch_is_error() {
        assert!(matches!(
            mean_absolute_error(&[1.0], &[1.0, 2.0]),
            Err(PlaygroundError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            mean_squared_error(&[], &[]),
            Err(PlaygroundError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_categorical_cross_entropy_one_hot() {
        let loss = categorical_cross_entropy(&[0.7, 0.2, 0.1], &[1.0, 0.0, 0.0]).unwrap();
        assert!((loss + 0.7f64.ln()).abs() < EPSILON);
    }
}
