//! Gradient-descent optimizers over two-dimensional loss surfaces
//!
//! This module provides the update rules used by the gradient-descent
//! visualiser and the [`DescentRun`] state machine that drives them.
//!
//! # Overview
//!
//! An optimizer turns `(point, gradient, learning_rate)` into a new point.
//! Plain gradient descent is `point = point - learning_rate * gradient`;
//! Momentum, RMSprop and Adam additionally carry an accumulator across
//! iterations. That accumulator is an explicit [`OptimizerState`] value owned
//! by the caller: every step consumes the previous state and returns the next
//! one, so independent runs never share hidden state.
//!
//! # Available Optimizers
//!
//! - SGD: vanilla gradient descent
//! - Momentum: heavy-ball velocity with β = 0.9
//! - RMSprop: squared-gradient running average with α = 0.9, ε = 1e-8
//! - Adam: bias-corrected moments with β1 = 0.9, β2 = 0.999, ε = 1e-8
//!
//! # Example
//!
//! ```
//! use neural_playground::optimizers::{LossSurface, OptimizerKind, OptimizerState};
//! use neural_playground::utils::Point2;
//!
//! let surface = LossSurface::Quadratic;
//! let mut point = Point2::new(-2.0, 0.0);
//! let mut state = OptimizerState::fresh(OptimizerKind::Adam);
//!
//! for _ in 0..100 {
//!     let gradient = surface.gradient(point);
//!     let (next, next_state) = state.step(point, gradient, 0.1);
//!     point = next;
//!     state = next_state;
//! }
//! assert!(surface.value(point) < 0.001);
//! ```

pub mod adam;
pub mod momentum;
pub mod rmsprop;
pub mod run;
pub mod sgd;
pub mod surface;

use serde::{Deserialize, Serialize};

use crate::utils::Point2;

pub use adam::{adam_update, AdamMoments, AdamState};
pub use momentum::MomentumState;
pub use rmsprop::{rmsprop_update, RmsPropAccumulator, RmsPropState};
pub use run::{DescentRun, RunStatus, TickReport};
pub use sgd::SgdState;
pub use surface::{LossSurface, SurfaceMinimum};

/// Core trait for a single optimizer's update rule.
///
/// Implementors are the per-optimizer accumulator types. The rule is pure:
/// it reads `self` as the previous accumulator and returns the next one
/// alongside the updated point.
pub trait UpdateRule: Sized {
    /// Apply one update.
    ///
    /// # Arguments
    ///
    /// * `point` - Current position
    /// * `gradient` - Loss gradient at `point`
    /// * `learning_rate` - Step size
    ///
    /// # Returns
    ///
    /// The new position and the accumulator to use on the next step.
    fn apply(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self);
}

/// Optimizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Sgd,
    Momentum,
    #[serde(rename = "rmsprop")]
    RmsProp,
    Adam,
}

impl OptimizerKind {
    pub const ALL: [OptimizerKind; 4] = [
        OptimizerKind::Sgd,
        OptimizerKind::Momentum,
        OptimizerKind::RmsProp,
        OptimizerKind::Adam,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OptimizerKind::Sgd => "SGD",
            OptimizerKind::Momentum => "Momentum",
            OptimizerKind::RmsProp => "RMSprop",
            OptimizerKind::Adam => "Adam",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OptimizerKind::Sgd => "Standard Gradient Descent",
            OptimizerKind::Momentum => "SGD with Momentum (β=0.9)",
            OptimizerKind::RmsProp => "RMSprop (α=0.9, ε=1e-8)",
            OptimizerKind::Adam => "Adam Optimizer (β1=0.9, β2=0.999)",
        }
    }
}

/// Accumulator of one optimizer run, tagged by optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerState {
    Sgd(SgdState),
    Momentum(MomentumState),
    #[serde(rename = "rmsprop")]
    RmsProp(RmsPropState),
    Adam(AdamState),
}

impl OptimizerState {
    /// Zeroed accumulator for `kind`.
    pub fn fresh(kind: OptimizerKind) -> Self {
        match kind {
            OptimizerKind::Sgd => OptimizerState::Sgd(SgdState),
            OptimizerKind::Momentum => OptimizerState::Momentum(MomentumState::default()),
            OptimizerKind::RmsProp => OptimizerState::RmsProp(RmsPropState::default()),
            OptimizerKind::Adam => OptimizerState::Adam(AdamState::default()),
        }
    }

    pub fn kind(&self) -> OptimizerKind {
        match self {
            OptimizerState::Sgd(_) => OptimizerKind::Sgd,
            OptimizerState::Momentum(_) => OptimizerKind::Momentum,
            OptimizerState::RmsProp(_) => OptimizerKind::RmsProp,
            OptimizerState::Adam(_) => OptimizerKind::Adam,
        }
    }

    /// Runs the update rule matching this state's optimizer.
    pub fn step(&self, point: Point2, gradient: Point2, learning_rate: f64) -> (Point2, Self) {
        match self {
            OptimizerState::Sgd(s) => {
                let (p, s) = s.apply(point, gradient, learning_rate);
                (p, OptimizerState::Sgd(s))
            }
            OptimizerState::Momentum(s) => {
                let (p, s) = s.apply(point, gradient, learning_rate);
                (p, OptimizerState::Momentum(s))
            }
            OptimizerState::RmsProp(s) => {
                let (p, s) = s.apply(point, gradient, learning_rate);
                (p, OptimizerState::RmsProp(s))
            }
            OptimizerState::Adam(s) => {
                let (p, s) = s.apply(point, gradient, learning_rate);
                (p, OptimizerState::Adam(s))
            }
        }
    }
}
