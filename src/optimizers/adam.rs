//! Adam (Adaptive Moment Estimation) update rule
//!
//! This module provides the scalar Adam rule [`adam_update`] and the
//! two-dimensional [`AdamState`] built from it, which combine momentum and
//! adaptive step sizes with bias correction.

use serde::{Deserialize, Serialize};

use crate::optimizers::UpdateRule;
use crate::utils::Point2;

/// Exponential decay rate for the first moment estimate.
pub const ADAM_BETA1: f64 = 0.9;

/// Exponential decay rate for the second moment estimate.
pub const ADAM_BETA2: f64 = 0.999;

/// Denominator guard.
pub const ADAM_EPSILON: f64 = 1e-8;

/// Moment estimates for a single parameter.
///
/// # Fields
///
/// * `m` - First moment (mean) of gradients
/// * `v` - Second moment (uncentered variance) of gradients
/// * `t` - Number of updates applied so far
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdamMoments {
    pub m: f64,
    pub v: f64,
    pub t: u64,
}

/// Scalar Adam rule with the default hyper-parameters.
///
/// The update rule is:
///
/// ```text
/// t   = t + 1
/// m_t = β1 * m_{t-1} + (1 - β1) * gradient
/// v_t = β2 * v_{t-1} + (1 - β2) * gradient²
/// m_hat = m_t / (1 - β1^t)
/// v_hat = v_t / (1 - β2^t)
/// update = m_hat / (√v_hat + ε)
/// ```
///
/// Returns the next moments and the unscaled update (multiply by the
/// learning rate and subtract from the parameter).
///
/// # Reference
///
/// Kingma, D. P., & Ba, J. (2014). Adam: A method for stochastic optimization.
/// arXiv preprint arXiv:1412.6980.
pub fn adam_update(moments: &AdamMoments, gradient: f64) -> (AdamMoments, f64) {
    let t = moments.t + 1;
    let m = ADAM_BETA1 * moments.m + (1.0 - ADAM_BETA1) * gradient;
    let v = ADAM_BETA2 * moments.v + (1.0 - ADAM_BETA2) * gradient * gradient;

    let exponent = i32::try_from(t).unwrap_or(i32::MAX);
    let bias_correction1 = 1.0 - ADAM_BETA1.powi(exponent);
    let bias_correction2 = 1.0 - ADAM_BETA2.powi(exponent);

    let m_hat = m / bias_correction1;
    let v_hat = v / bias_correction2;

    (AdamMoments { m, v, t }, m_hat / (v_hat.sqrt() + ADAM_EPSILON))
}

/// Adam accumulator for a point in the plane.
///
/// Both axes share the step counter `t`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdamState {
    pub mx: f64,
    pub my: f64,
    pub vx: f64,
    pub vy: f64,
    pub t: u64,
}

impl UpdateRule for AdamState {
    fn apply(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self) {
        let x_moments = AdamMoments {
            m: self.mx,
            v: self.vx,
            t: self.t,
        };
        let y_moments = AdamMoments {
            m: self.my,
            v: self.vy,
            t: self.t,
        };

        let (x_next, ux) = adam_update(&x_moments, gradient.x);
        let (y_next, uy) = adam_update(&y_moments, gradient.y);

        let next = Point2::new(point.x - learning_rate * ux, point.y - learning_rate * uy);
        let state = AdamState {
            mx: x_next.m,
            my: y_next.m,
            vx: x_next.v,
            vy: y_next.v,
            t: x_next.t,
        };
        (next, state)
    }
}
