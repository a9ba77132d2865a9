//! SGD with momentum
//!
//! The velocity accumulates scaled gradients and the point moves by the
//! velocity:
//!
//! ```text
//! v = β * v_prev + η * gradient
//! point = point - v
//! ```
//!
//! with β fixed at 0.9.

use serde::{Deserialize, Serialize};

use crate::optimizers::UpdateRule;
use crate::utils::Point2;

/// Velocity decay factor.
pub const MOMENTUM_BETA: f64 = 0.9;

/// Velocity per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MomentumState {
    pub vx: f64,
    pub vy: f64,
}

impl UpdateRule for MomentumState {
    fn apply(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self) {
        let vx = MOMENTUM_BETA * self.vx + learning_rate * gradient.x;
        let vy = MOMENTUM_BETA * self.vy + learning_rate * gradient.y;
        (Point2::new(point.x - vx, point.y - vy), MomentumState { vx, vy })
    }
}
