//! Synthetic training-curve simulator
//!
//! Produces plausible loss and accuracy curves without training anything:
//!
//! ```text
//! loss(e)     = max(0.01, 2.5 · exp(-2 · lr · e) + U(-0.05, 0.05))
//! accuracy(e) = clamp(1 - exp(-1.5 · lr · e) + U(-0.025, 0.025), 0.1, 0.98)
//! ```
//!
//! Higher learning rates make both curves settle faster.

use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::TrainingConfig;
use crate::error::{ensure_positive, PlaygroundError, Result};
use crate::utils::rng::{jitter, rng_from_option};
use crate::utils::schedule::ExponentialDecay;

const INITIAL_LOSS: f64 = 2.5;
const LOSS_RATE: f64 = 2.0;
const ACCURACY_RATE: f64 = 1.5;
const LOSS_NOISE: f64 = 0.1;
const ACCURACY_NOISE: f64 = 0.05;

pub const MIN_LOSS: f64 = 0.01;
pub const ACCURACY_RANGE: (f64, f64) = (0.1, 0.98);

/// Noise-free loss at `epoch`.
pub fn expected_loss(learning_rate: f64, epoch: usize) -> f64 {
    ExponentialDecay::new(INITIAL_LOSS, 1.0 / (LOSS_RATE * learning_rate)).value_at_time(epoch as f64)
}

/// Noise-free accuracy at `epoch`.
pub fn expected_accuracy(learning_rate: f64, epoch: usize) -> f64 {
    1.0 - ExponentialDecay::new(1.0, 1.0 / (ACCURACY_RATE * learning_rate))
        .value_at_time(epoch as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub epoch: usize,
    pub loss: f64,
    pub accuracy: f64,
}

/// Draws the noisy sample for `epoch`.
pub fn sample_epoch<R: Rng + ?Sized>(rng: &mut R, learning_rate: f64, epoch: usize) -> TrainingSample {
    let loss = (expected_loss(learning_rate, epoch) + jitter(rng, LOSS_NOISE)).max(MIN_LOSS);
    let accuracy = (expected_accuracy(learning_rate, epoch) + jitter(rng, ACCURACY_NOISE))
        .clamp(ACCURACY_RANGE.0, ACCURACY_RANGE.1);
    TrainingSample {
        epoch,
        loss,
        accuracy,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorStatus {
    Idle,
    Training,
    Finished,
}

#[derive(Debug)]
pub struct TrainingCurveSimulator {
    learning_rate: f64,
    max_epochs: usize,
    history_len: usize,
    epoch: usize,
    history: VecDeque<TrainingSample>,
    status: SimulatorStatus,
    rng: StdRng,
}

impl TrainingCurveSimulator {
    pub fn new(config: &TrainingConfig) -> Result<Self> {
        Self::with_rng(config, rng_from_option(config.seed))
    }

    pub fn with_rng(config: &TrainingConfig, rng: StdRng) -> Result<Self> {
        ensure_positive("learning_rate", config.learning_rate)?;
        for (name, value) in [
            ("max_epochs", config.max_epochs),
            ("history_len", config.history_len),
        ] {
            if value == 0 {
                return Err(PlaygroundError::InvalidParameter {
                    name,
                    value: 0.0,
                    reason: "must be at least 1",
                });
            }
        }
        Ok(Self {
            learning_rate: config.learning_rate,
            max_epochs: config.max_epochs,
            history_len: config.history_len,
            epoch: 0,
            history: VecDeque::with_capacity(config.history_len),
            status: SimulatorStatus::Idle,
            rng,
        })
    }

    pub fn start(&mut self) {
        if self.status == SimulatorStatus::Idle {
            self.status = SimulatorStatus::Training;
            debug!("training simulation from epoch {} at lr {}", self.epoch, self.learning_rate);
        }
    }

    pub fn stop(&mut self) {
        if self.status == SimulatorStatus::Training {
            self.status = SimulatorStatus::Idle;
        }
    }

    /// Advances one epoch while training; returns the new sample.
    pub fn tick(&mut self) -> Option<TrainingSample> {
        if self.status != SimulatorStatus::Training {
            return None;
        }

        self.epoch += 1;
        let sample = sample_epoch(&mut self.rng, self.learning_rate, self.epoch);
        if self.history.len() == self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(sample);

        if self.epoch >= self.max_epochs {
            self.status = SimulatorStatus::Finished;
            info!(
                "training simulation finished at epoch {}: loss {:.4}, accuracy {:.3}",
                self.epoch, sample.loss, sample.accuracy
            );
        }
        Some(sample)
    }

    /// Starts and ticks to the final epoch.
    pub fn run_to_completion(&mut self) -> Option<TrainingSample> {
        self.start();
        let mut last = self.latest();
        while self.status == SimulatorStatus::Training {
            last = self.tick();
        }
        last
    }

    pub fn reset(&mut self) {
        self.epoch = 0;
        self.history.clear();
        self.status = SimulatorStatus::Idle;
    }

    /// Affects epochs simulated from now on.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        ensure_positive("learning_rate", learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn latest(&self) -> Option<TrainingSample> {
        self.history.back().copied()
    }

    /// Most recent samples, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &TrainingSample> {
        self.history.iter()
    }

    pub fn loss_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.loss).collect()
    }

    pub fn accuracy_history(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.accuracy).collect()
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn status(&self) -> SimulatorStatus {
        self.status
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}
