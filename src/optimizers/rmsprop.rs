//! RMSprop update rule
//!
//! Keeps a running average of squared gradients and divides each step by
//! its square root:
//!
//! ```text
//! s = α * s_prev + (1 - α) * gradient²
//! update = gradient / (√s + ε)
//! point = point - η * update
//! ```
//!
//! with α = 0.9 and ε = 1e-8. The scalar rule [`rmsprop_update`] is applied
//! independently to each axis by [`RmsPropState`].

use serde::{Deserialize, Serialize};

use crate::optimizers::UpdateRule;
use crate::utils::Point2;

/// Decay rate of the squared-gradient average.
pub const RMSPROP_ALPHA: f64 = 0.9;

/// Denominator guard.
pub const RMSPROP_EPSILON: f64 = 1e-8;

/// Squared-gradient running average for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RmsPropAccumulator {
    pub v: f64,
}

/// Scalar RMSprop rule with the default hyper-parameters.
///
/// Returns the next accumulator and the unscaled update (multiply by the
/// learning rate and subtract from the parameter).
pub fn rmsprop_update(accumulator: &RmsPropAccumulator, gradient: f64) -> (RmsPropAccumulator, f64) {
    let v = RMSPROP_ALPHA * accumulator.v + (1.0 - RMSPROP_ALPHA) * gradient * gradient;
    let update = gradient / (v.sqrt() + RMSPROP_EPSILON);
    (RmsPropAccumulator { v }, update)
}

/// Per-axis squared-gradient averages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RmsPropState {
    pub sx: f64,
    pub sy: f64,
}

impl UpdateRule for RmsPropState {
    fn apply(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self) {
        let (ax, ux) = rmsprop_update(&RmsPropAccumulator { v: self.sx }, gradient.x);
        let (ay, uy) = rmsprop_update(&RmsPropAccumulator { v: self.sy }, gradient.y);
        let next = Point2::new(point.x - learning_rate * ux, point.y - learning_rate * uy);
        (next, RmsPropState { sx: ax.v, sy: ay.v })
    }
}
