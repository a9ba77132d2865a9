//! Start/stop/tick driver around [`som_training_step`].

use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::config::{SomConfig, MAX_GRID_SIZE};
use crate::error::{PlaygroundError, Result};
use crate::som::{
    som_training_step, DatasetKind, DecayedParameters, InputDataset, SomBmu, SomGrid, SomParams,
    SomStepOutcome,
};
use crate::utils::rng::rng_from_option;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerStatus {
    Idle,
    Training,
    /// Iteration count exceeded the cap; only `reset` resumes.
    Finished,
}

/// Snapshot returned by [`SomTrainer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SomTick {
    pub status: TrainerStatus,
    pub iteration: usize,
    /// BMU of this tick; `None` if nothing was trained
    pub bmu: Option<SomBmu>,
    /// Dataset index of this tick's input
    pub input_index: Option<usize>,
}

#[derive(Debug)]
pub struct SomTrainer {
    dataset_kind: DatasetKind,
    grid_size: usize,
    params: SomParams,
    grid: SomGrid,
    dataset: InputDataset,
    iteration: usize,
    status: TrainerStatus,
    last_bmu: Option<SomBmu>,
    last_input: Option<usize>,
    rng: StdRng,
}

impl SomTrainer {
    /// Builds an idle trainer with a random grid and freshly generated data.
    pub fn new(config: &SomConfig) -> Result<Self> {
        Self::with_rng(config, rng_from_option(config.seed))
    }

    pub fn with_rng(config: &SomConfig, mut rng: StdRng) -> Result<Self> {
        let params = SomParams {
            learning_rate: config.learning_rate,
            neighborhood_radius: config.neighborhood_radius,
            max_iterations: config.max_iterations,
        };
        params.validate()?;
        check_grid_size(config.grid_size)?;

        let grid = SomGrid::random(&mut rng, config.grid_size, config.dataset.dimensions())?;
        let dataset = config.dataset.generate(&mut rng);
        Ok(Self {
            dataset_kind: config.dataset,
            grid_size: config.grid_size,
            params,
            grid,
            dataset,
            iteration: 0,
            status: TrainerStatus::Idle,
            last_bmu: None,
            last_input: None,
            rng,
        })
    }

    pub fn start(&mut self) {
        match self.status {
            TrainerStatus::Idle => {
                self.status = TrainerStatus::Training;
                debug!(
                    "SOM training {}x{} on {} from iteration {}",
                    self.grid_size,
                    self.grid_size,
                    self.dataset_kind.name(),
                    self.iteration
                );
            }
            TrainerStatus::Training => {}
            TrainerStatus::Finished => debug!("SOM already finished; reset to train again"),
        }
    }

    /// Pauses training, keeping grid and iteration.
    pub fn stop(&mut self) {
        if self.status == TrainerStatus::Training {
            self.status = TrainerStatus::Idle;
        }
    }

    /// Runs one training step while training.
    ///
    /// The grid is replaced only once the step has fully succeeded.
    pub fn tick(&mut self) -> Result<SomTick> {
        if self.status != TrainerStatus::Training {
            return Ok(self.snapshot(None, None));
        }

        let outcome = som_training_step(
            &self.grid,
            &self.dataset,
            self.iteration,
            &self.params,
            &mut self.rng,
        )?;
        let step = match outcome {
            SomStepOutcome::NoData => {
                warn!("SOM tick skipped: {} dataset is empty", self.dataset_kind.name());
                return Ok(self.snapshot(None, None));
            }
            SomStepOutcome::Trained(step) => step,
        };

        self.grid = step.grid;
        self.last_bmu = Some(step.bmu);
        self.last_input = Some(step.input_index);
        self.iteration += 1;

        if self.iteration > self.params.max_iterations {
            self.status = TrainerStatus::Finished;
            info!(
                "SOM finished after {} iterations on {}",
                self.iteration,
                self.dataset_kind.name()
            );
        }
        Ok(self.snapshot(Some(step.bmu), Some(step.input_index)))
    }

    /// Starts if idle and ticks up to `ticks` times or until finished.
    pub fn train_for(&mut self, ticks: usize) -> Result<SomTick> {
        self.start();
        let mut last = self.snapshot(self.last_bmu, self.last_input);
        for _ in 0..ticks {
            if self.status != TrainerStatus::Training {
                break;
            }
            last = self.tick()?;
        }
        Ok(last)
    }

    /// Re-randomises the grid, regenerates the data and rewinds to iteration 0.
    pub fn reset(&mut self) -> Result<()> {
        self.grid = SomGrid::random(&mut self.rng, self.grid_size, self.dataset_kind.dimensions())?;
        self.dataset = self.dataset_kind.generate(&mut self.rng);
        self.iteration = 0;
        self.status = TrainerStatus::Idle;
        self.last_bmu = None;
        self.last_input = None;
        debug!("SOM reset on {}", self.dataset_kind.name());
        Ok(())
    }

    pub fn switch_dataset(&mut self, kind: DatasetKind) -> Result<()> {
        self.dataset_kind = kind;
        self.reset()
    }

    pub fn set_grid_size(&mut self, size: usize) -> Result<()> {
        check_grid_size(size)?;
        self.grid_size = size;
        self.reset()
    }

    /// Changes η₀ for subsequent ticks.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        let params = SomParams {
            learning_rate,
            ..self.params
        };
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Changes σ₀ for subsequent ticks.
    pub fn set_neighborhood_radius(&mut self, radius: f64) -> Result<()> {
        let params = SomParams {
            neighborhood_radius: radius,
            ..self.params
        };
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Decayed η and σ the next tick will use.
    pub fn current_parameters(&self) -> DecayedParameters {
        self.params.decayed(self.iteration)
    }

    pub fn quantization_error(&self) -> Result<f64> {
        self.grid.quantization_error(&self.dataset)
    }

    fn snapshot(&self, bmu: Option<SomBmu>, input_index: Option<usize>) -> SomTick {
        SomTick {
            status: self.status,
            iteration: self.iteration,
            bmu,
            input_index,
        }
    }

    pub fn status(&self) -> TrainerStatus {
        self.status
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn grid(&self) -> &SomGrid {
        &self.grid
    }

    pub fn dataset(&self) -> &InputDataset {
        &self.dataset
    }

    pub fn dataset_kind(&self) -> DatasetKind {
        self.dataset_kind
    }

    pub fn params(&self) -> &SomParams {
        &self.params
    }

    pub fn last_bmu(&self) -> Option<SomBmu> {
        self.last_bmu
    }

    /// Dataset index of the most recent input, for highlighting.
    pub fn last_input(&self) -> Option<usize> {
        self.last_input
    }
}

/// Grid side must lie in `1..=MAX_GRID_SIZE`.
fn check_grid_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_GRID_SIZE {
        return Err(PlaygroundError::InvalidParameter {
            name: "grid_size",
            value: size as f64,
            reason: "must be between 1 and MAX_GRID_SIZE",
        });
    }
    Ok(())
}
