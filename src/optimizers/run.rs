//! Gradient-descent run state machine
//!
//! A [`DescentRun`] walks one optimizer across one [`LossSurface`], one tick
//! at a time. It owns the optimizer accumulator, the optimization path and
//! the iteration counter, and moves through the statuses
//! `Idle → Running → Converged` (or `Diverged` when the loss stops being
//! finite).
//!
//! Invariant: `path().len() == iteration() + 1`; the seed point is always
//! the first path entry.

use log::{debug, info};

use crate::config::DescentConfig;
use crate::error::{ensure_positive, PlaygroundError, Result};
use crate::optimizers::{LossSurface, OptimizerKind, OptimizerState};
use crate::utils::Point2;

/// Seed point restored by [`DescentRun::reset`] unless configured otherwise.
pub const DEFAULT_START: Point2 = Point2::new(-2.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Positioned at a seed point, not advancing.
    Idle,
    /// Advancing one iteration per tick.
    Running,
    /// Loss fell below the threshold or the iteration cap was exceeded.
    Converged,
    /// Loss or position became non-finite.
    Diverged,
}

/// Snapshot returned by every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub status: RunStatus,
    pub point: Point2,
    pub loss: f64,
    pub gradient_magnitude: f64,
    pub iteration: usize,
}

#[derive(Debug, Clone)]
pub struct DescentRun {
    surface: LossSurface,
    optimizer: OptimizerKind,
    learning_rate: f64,
    loss_threshold: f64,
    max_iterations: usize,
    home: Point2,
    point: Point2,
    state: OptimizerState,
    path: Vec<Point2>,
    iteration: usize,
    status: RunStatus,
    final_loss: Option<f64>,
}

impl DescentRun {
    /// Creates an idle run positioned at the configured start point.
    pub fn new(config: &DescentConfig) -> Result<Self> {
        ensure_positive("learning_rate", config.learning_rate)?;
        ensure_positive("loss_threshold", config.loss_threshold)?;
        if config.max_iterations == 0 {
            return Err(PlaygroundError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        let home = Point2::from(config.start);
        if !home.is_finite() {
            return Err(PlaygroundError::InvalidParameter {
                name: "start",
                value: if home.x.is_finite() { home.y } else { home.x },
                reason: "must be finite",
            });
        }

        Ok(Self {
            surface: config.surface,
            optimizer: config.optimizer,
            learning_rate: config.learning_rate,
            loss_threshold: config.loss_threshold,
            max_iterations: config.max_iterations,
            home,
            point: home,
            state: OptimizerState::fresh(config.optimizer),
            path: vec![home],
            iteration: 0,
            status: RunStatus::Idle,
            final_loss: None,
        })
    }

    /// Begins advancing from the current point.
    ///
    /// Clears the path and iteration counter and zeroes the accumulator,
    /// since the current point is the new seed. Starting a running run is a
    /// no-op.
    pub fn start(&mut self) {
        if self.status == RunStatus::Running {
            return;
        }
        self.restart_from(self.point);
        self.status = RunStatus::Running;
        debug!(
            "starting {} on {} from ({:.3}, {:.3}) with lr {}",
            self.optimizer.name(),
            self.surface.name(),
            self.point.x,
            self.point.y,
            self.learning_rate
        );
    }

    /// Advances one iteration when running.
    ///
    /// The loss is evaluated at the current point first; if it is below the
    /// threshold, or the iteration counter already exceeds the cap, the run
    /// converges without moving. Ticks on a run that is not running only
    /// report the current state.
    pub fn tick(&mut self) -> TickReport {
        if self.status != RunStatus::Running {
            return self.report();
        }

        let loss = self.surface.value(self.point);
        if !loss.is_finite() || !self.point.is_finite() {
            self.status = RunStatus::Diverged;
            self.final_loss = Some(loss);
            info!(
                "{} diverged on {} after {} iterations",
                self.optimizer.name(),
                self.surface.name(),
                self.iteration
            );
            return self.report();
        }

        if loss < self.loss_threshold || self.iteration > self.max_iterations {
            self.status = RunStatus::Converged;
            self.final_loss = Some(loss);
            info!(
                "{} converged on {} after {} iterations, loss {:.6}",
                self.optimizer.name(),
                self.surface.name(),
                self.iteration,
                loss
            );
            return self.report();
        }

        let gradient = self.surface.gradient(self.point);
        let (next, state) = self.state.step(self.point, gradient, self.learning_rate);
        self.point = next;
        self.state = state;
        self.path.push(next);
        self.iteration += 1;

        self.report()
    }

    /// Starts if needed and ticks until the run stops.
    pub fn run_to_completion(&mut self) -> TickReport {
        if self.status != RunStatus::Running {
            self.start();
        }
        loop {
            let report = self.tick();
            if report.status != RunStatus::Running {
                return report;
            }
        }
    }

    /// Stops the run and returns to the configured start with a fresh accumulator.
    pub fn reset(&mut self) {
        self.status = RunStatus::Idle;
        self.restart_from(self.home);
        debug!("reset {} run on {}", self.optimizer.name(), self.surface.name());
    }

    /// Moves the seed point. Ignored while running.
    ///
    /// Clears path, iteration counter and the optimizer accumulator.
    /// Returns whether the point was applied.
    pub fn set_start_point(&mut self, point: Point2) -> bool {
        if self.status == RunStatus::Running || !point.is_finite() {
            return false;
        }
        self.status = RunStatus::Idle;
        self.restart_from(point);
        debug!("start point moved to ({:.3}, {:.3})", point.x, point.y);
        true
    }

    /// Switches surface; the run resets.
    pub fn set_surface(&mut self, surface: LossSurface) {
        self.surface = surface;
        self.reset();
    }

    /// Switches optimizer; the run resets.
    pub fn set_optimizer(&mut self, optimizer: OptimizerKind) {
        self.optimizer = optimizer;
        self.reset();
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        ensure_positive("learning_rate", learning_rate)?;
        self.learning_rate = learning_rate;
        Ok(())
    }

    fn restart_from(&mut self, point: Point2) {
        self.point = point;
        self.state = OptimizerState::fresh(self.optimizer);
        self.path.clear();
        self.path.push(point);
        self.iteration = 0;
        self.final_loss = None;
    }

    fn report(&self) -> TickReport {
        TickReport {
            status: self.status,
            point: self.point,
            loss: self.current_loss(),
            gradient_magnitude: self.gradient_magnitude(),
            iteration: self.iteration,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn point(&self) -> Point2 {
        self.point
    }

    pub fn path(&self) -> &[Point2] {
        &self.path
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    pub fn surface(&self) -> LossSurface {
        self.surface
    }

    pub fn optimizer(&self) -> OptimizerKind {
        self.optimizer
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Loss at the run's stopping point, once converged or diverged.
    pub fn final_loss(&self) -> Option<f64> {
        self.final_loss
    }

    pub fn current_loss(&self) -> f64 {
        self.surface.value(self.point)
    }

    pub fn current_gradient(&self) -> Point2 {
        self.surface.gradient(self.point)
    }

    pub fn gradient_magnitude(&self) -> f64 {
        self.current_gradient().magnitude()
    }
}
