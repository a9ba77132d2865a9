//! Decay schedules for iteration-dependent parameters
//!
//! The self-organizing map shrinks its learning rate and neighborhood radius
//! over time, and the training-curve simulator shapes its synthetic loss and
//! accuracy with the same exponential law. Schedules are evaluated at an
//! explicit iteration index rather than advanced in place, so the pure SOM
//! step can be replayed for any iteration.

/// A scalar parameter that varies with the iteration index.
///
/// # Example
///
/// ```
/// use neural_playground::utils::schedule::{DecaySchedule, ExponentialDecay};
///
/// let eta = ExponentialDecay::new(0.5, 200.0);
/// assert_eq!(eta.value_at(0), 0.5);
/// assert!(eta.value_at(200) < 0.5);
/// ```
pub trait DecaySchedule {
    /// Value of the parameter at iteration `step` (0-indexed).
    fn value_at(&self, step: usize) -> f64;

    /// Value before any decay.
    fn initial(&self) -> f64 {
        self.value_at(0)
    }
}

/// Exponential decay: `value(t) = initial * exp(-t / time_constant)`.
///
/// # Fields
///
/// * `initial` - Value at iteration 0
/// * `time_constant` - Iterations for the value to fall by a factor of e
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecay {
    initial: f64,
    time_constant: f64,
}

impl ExponentialDecay {
    pub fn new(initial: f64, time_constant: f64) -> Self {
        Self {
            initial,
            time_constant,
        }
    }

    /// Schedule whose time constant is `horizon / divisor`.
    ///
    /// The SOM uses `max_iterations / 5` for the learning rate and
    /// `max_iterations / 3` for the radius.
    pub fn over_horizon(initial: f64, horizon: usize, divisor: f64) -> Self {
        Self::new(initial, horizon as f64 / divisor)
    }

    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Same law evaluated at a fractional time.
    pub fn value_at_time(&self, t: f64) -> f64 {
        if self.time_constant <= 0.0 {
            // Degenerate horizon: decay completes immediately after t = 0.
            return if t <= 0.0 { self.initial } else { 0.0 };
        }
        self.initial * (-t / self.time_constant).exp()
    }
}

impl DecaySchedule for ExponentialDecay {
    fn value_at(&self, step: usize) -> f64 {
        self.value_at_time(step as f64)
    }

    fn initial(&self) -> f64 {
        self.initial
    }
}
