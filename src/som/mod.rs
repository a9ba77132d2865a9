//! Self-organizing map engine
//!
//! A Kohonen map: a 2-D grid of weight vectors trained by competitive
//! learning. Each training step samples one input, finds its best-matching
//! unit (BMU) and pulls every neuron towards the input, weighted by a
//! Gaussian of its grid distance to the BMU. Learning rate and radius decay
//! exponentially with the iteration index:
//!
//! ```text
//! η(t) = η₀ · exp(-t / (max_iterations / 5))
//! σ(t) = σ₀ · exp(-t / (max_iterations / 3))
//! ```
//!
//! [`som_training_step`] is the pure step; [`SomTrainer`] wraps it in the
//! start/stop/tick state machine the visualiser drives.

pub mod dataset;
pub mod grid;
pub mod trainer;

use rand::Rng;

use crate::error::{ensure_positive, PlaygroundError, Result};
use crate::utils::schedule::{DecaySchedule, ExponentialDecay};

pub use dataset::{DatasetKind, InputDataset};
pub use grid::{neighborhood_influence, Neuron, SomBmu, SomGrid};
pub use trainer::{SomTick, SomTrainer, TrainerStatus};

/// Learning-rate decay horizon divisor.
pub const LEARNING_RATE_DIVISOR: f64 = 5.0;

/// Radius decay horizon divisor.
pub const RADIUS_DIVISOR: f64 = 3.0;

/// Training hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SomParams {
    /// Initial learning rate η₀
    pub learning_rate: f64,
    /// Initial neighborhood radius σ₀
    pub neighborhood_radius: f64,
    pub max_iterations: usize,
}

impl Default for SomParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            neighborhood_radius: 3.0,
            max_iterations: 1000,
        }
    }
}

impl SomParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("learning_rate", self.learning_rate)?;
        ensure_positive("neighborhood_radius", self.neighborhood_radius)?;
        if self.max_iterations == 0 {
            return Err(PlaygroundError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn learning_rate_schedule(&self) -> ExponentialDecay {
        ExponentialDecay::over_horizon(self.learning_rate, self.max_iterations, LEARNING_RATE_DIVISOR)
    }

    pub fn radius_schedule(&self) -> ExponentialDecay {
        ExponentialDecay::over_horizon(
            self.neighborhood_radius,
            self.max_iterations,
            RADIUS_DIVISOR,
        )
    }

    /// Decayed `(η, σ)` at `iteration`.
    pub fn decayed(&self, iteration: usize) -> DecayedParameters {
        DecayedParameters {
            learning_rate: self.learning_rate_schedule().value_at(iteration),
            radius: self.radius_schedule().value_at(iteration),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayedParameters {
    pub learning_rate: f64,
    pub radius: f64,
}

/// Result of one successful training step.
#[derive(Debug, Clone, PartialEq)]
pub struct SomStep {
    /// Grid after the update
    pub grid: SomGrid,
    /// BMU found on the grid before the update
    pub bmu: SomBmu,
    /// Index of the sampled input in the dataset
    pub input_index: usize,
    pub parameters: DecayedParameters,
}

impl SomStep {
    /// The sampled input vector.
    pub fn input<'a>(&self, dataset: &'a InputDataset) -> Option<&'a [f64]> {
        dataset.sample(self.input_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SomStepOutcome {
    /// Dataset was empty; nothing changed.
    NoData,
    Trained(SomStep),
}

/// One SOM training iteration.
///
/// Samples an input with replacement, finds its BMU and returns an updated
/// copy of `grid`. `grid` itself is untouched.
///
/// # Errors
///
/// `DimensionMismatch` when the dataset and grid dimensionalities differ.
/// An empty dataset is not an error and yields [`SomStepOutcome::NoData`].
pub fn som_training_step<R: Rng + ?Sized>(
    grid: &SomGrid,
    dataset: &InputDataset,
    iteration: usize,
    params: &SomParams,
    rng: &mut R,
) -> Result<SomStepOutcome> {
    let Some(input_index) = dataset.random_index(rng) else {
        return Ok(SomStepOutcome::NoData);
    };
    if dataset.dimensions() != grid.dimensions() {
        return Err(PlaygroundError::dimension(
            "som_training_step",
            grid.dimensions(),
            dataset.dimensions(),
        ));
    }

    let input = &dataset.samples()[input_index];
    let bmu = grid.find_bmu(input)?;
    let parameters = params.decayed(iteration);

    let mut next = grid.clone();
    next.apply_update(input, (bmu.i, bmu.j), parameters.learning_rate, parameters.radius)?;

    Ok(SomStepOutcome::Trained(SomStep {
        grid: next,
        bmu,
        input_index,
        parameters,
    }))
}
