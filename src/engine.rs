//! Stateless entry points for a rendering layer
//!
//! Each function performs one computation from explicit inputs and returns
//! the result; no state is kept between calls. Engines that own state
//! ([`crate::optimizers::DescentRun`], [`crate::som::SomTrainer`],
//! [`crate::demos::KMeansRun`]) are built on the same functions.

use rand::Rng;

use crate::config::ActivationConfig;
use crate::demos::kmeans::{self, Cluster, DataPoint, KMeansOutcome};
use crate::error::{ensure_positive, PlaygroundError, Result};
use crate::optimizers::{LossSurface, OptimizerKind, OptimizerState};
use crate::som::{self, InputDataset, SomGrid, SomParams, SomStepOutcome};
use crate::utils::{ActivationKind, LossKind, Point2};

pub fn compute_activation(kind: ActivationKind, x: f64) -> f64 {
    kind.apply(x)
}

pub fn compute_activation_derivative(kind: ActivationKind, x: f64) -> f64 {
    kind.derivative(x)
}

pub fn compute_loss(kind: LossKind, predicted: f64, actual: f64) -> f64 {
    kind.loss(predicted, actual)
}

/// Gradient of the loss with respect to `predicted`.
pub fn compute_loss_gradient(kind: LossKind, predicted: f64, actual: f64) -> f64 {
    kind.gradient(predicted, actual)
}

/// Activation catalog with parameters taken from `config`.
pub fn activation_catalog(config: &ActivationConfig) -> [ActivationKind; 5] {
    [
        ActivationKind::Sigmoid,
        ActivationKind::Relu,
        ActivationKind::Tanh,
        ActivationKind::LeakyRelu {
            alpha: config.leaky_relu_alpha,
        },
        ActivationKind::Elu {
            alpha: config.elu_alpha,
        },
    ]
}

/// Loss catalog with parameters taken from `config`.
pub fn loss_catalog(config: &ActivationConfig) -> [LossKind; 4] {
    [
        LossKind::MeanSquaredError,
        LossKind::MeanAbsoluteError,
        LossKind::BinaryCrossEntropy,
        LossKind::Huber {
            delta: config.huber_delta,
        },
    ]
}

/// Result of [`optimizer_step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerStepResult {
    pub point: Point2,
    pub state: OptimizerState,
    /// Loss at the new point
    pub loss: f64,
    /// Gradient norm at the new point
    pub gradient_magnitude: f64,
}

/// One optimizer update on `surface` from `point`.
///
/// `state` is the accumulator returned by the previous call; pass `None` to
/// start with a fresh one.
///
/// # Errors
///
/// `StateMismatch` if `state` belongs to a different optimizer,
/// `InvalidParameter` if `learning_rate` is not a positive finite number.
pub fn optimizer_step(
    kind: OptimizerKind,
    point: Point2,
    surface: LossSurface,
    learning_rate: f64,
    state: Option<&OptimizerState>,
) -> Result<OptimizerStepResult> {
    ensure_positive("learning_rate", learning_rate)?;
    let state = match state {
        Some(state) if state.kind() != kind => {
            return Err(PlaygroundError::StateMismatch {
                expected: kind.name(),
                found: state.kind().name(),
            })
        }
        Some(state) => *state,
        None => OptimizerState::fresh(kind),
    };

    let (next, state) = state.step(point, surface.gradient(point), learning_rate);
    Ok(OptimizerStepResult {
        point: next,
        state,
        loss: surface.value(next),
        gradient_magnitude: surface.gradient(next).magnitude(),
    })
}

/// One SOM training iteration; see [`som::som_training_step`].
pub fn som_training_step<R: Rng + ?Sized>(
    grid: &SomGrid,
    dataset: &InputDataset,
    iteration: usize,
    learning_rate: f64,
    neighborhood_radius: f64,
    max_iterations: usize,
    rng: &mut R,
) -> Result<SomStepOutcome> {
    let params = SomParams {
        learning_rate,
        neighborhood_radius,
        max_iterations,
    };
    params.validate()?;
    som::som_training_step(grid, dataset, iteration, &params, rng)
}

/// One K-means iteration; see [`kmeans::kmeans_step`].
pub fn kmeans_step(points: &[DataPoint], centroids: &[Cluster]) -> KMeansOutcome {
    kmeans::kmeans_step(points, centroids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_step_reports_new_point_metrics() {
        let result = optimizer_step(
            OptimizerKind::Sgd,
            Point2::new(-2.0, 0.0),
            LossSurface::Quadratic,
            0.1,
            None,
        )
        .unwrap();
        assert!((result.point.x + 1.6).abs() < 1e-12);
        assert!((result.loss - 2.56).abs() < 1e-12);
        assert!((result.gradient_magnitude - 3.2).abs() < 1e-12);
    }

    #[test]
    fn test_optimizer_step_state_mismatch() {
        let adam = OptimizerState::fresh(OptimizerKind::Adam);
        let err = optimizer_step(
            OptimizerKind::Momentum,
            Point2::ORIGIN,
            LossSurface::Quadratic,
            0.1,
            Some(&adam),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::StateMismatch {
                expected: "Momentum",
                found: "Adam"
            }
        ));
    }

    #[test]
    fn test_catalogs_use_config() {
        let config = ActivationConfig {
            leaky_relu_alpha: 0.2,
            elu_alpha: 0.5,
            huber_delta: 2.0,
        };
        assert_eq!(
            activation_catalog(&config)[3],
            ActivationKind::LeakyRelu { alpha: 0.2 }
        );
        assert_eq!(loss_catalog(&config)[3], LossKind::Huber { delta: 2.0 });
    }
}
