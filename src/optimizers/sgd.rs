//! Stochastic Gradient Descent (SGD) update rule
//!
//! Plain gradient descent: `point = point - learning_rate * gradient`.

use serde::{Deserialize, Serialize};

use crate::optimizers::UpdateRule;
use crate::utils::Point2;

/// Stochastic Gradient Descent carries no accumulator.
///
/// `w = w - η * ∇L/∂w`
///
/// # Example
///
/// ```
/// use neural_playground::optimizers::{SgdState, UpdateRule};
/// use neural_playground::utils::Point2;
///
/// let (next, _) = SgdState.apply(Point2::new(1.0, 2.0), Point2::new(0.1, 0.2), 0.1);
/// assert!((next.x - 0.99).abs() < 1e-12);
/// assert!((next.y - 1.98).abs() < 1e-12);
/// ```
///
/// # Limitations
///
/// Vanilla SGD can be slow to converge and oscillates in narrow valleys
/// such as the Rosenbrock function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SgdState;

impl UpdateRule for SgdState {
    fn apply(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self) {
        let next = Point2::new(
            point.x - learning_rate * gradient.x,
            point.y - learning_rate * gradient.y,
        );
        (next, SgdState)
    }
}
