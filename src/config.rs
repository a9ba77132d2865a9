//! Configuration structures for the demo engines
//!
//! This module provides the JSON configuration read by the demo binaries and
//! the engine constructors. Every section and every field has a default
//! matching the interactive demos, so an empty object `{}` is a valid
//! configuration.
//!
//! # Example
//!
//! ```json
//! {
//!   "gradient_descent": {
//!     "optimizer": "adam",
//!     "surface": "rosenbrock",
//!     "learning_rate": 0.05,
//!     "start": [-1.5, 2.0]
//!   },
//!   "som": {
//!     "dataset": "iris",
//!     "grid_size": 12,
//!     "seed": 42
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, Result};
use crate::optimizers::{LossSurface, OptimizerKind};
use crate::som::DatasetKind;
use crate::utils::activations::{DEFAULT_ELU_ALPHA, DEFAULT_LEAKY_RELU_ALPHA};
use crate::utils::losses::DEFAULT_HUBER_DELTA;

/// Largest SOM grid side accepted from a config file.
pub const MAX_GRID_SIZE: usize = 64;

/// Top-level configuration, one section per demo engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub gradient_descent: DescentConfig,
    pub som: SomConfig,
    pub kmeans: KMeansConfig,
    pub training: TrainingConfig,
    pub activation: ActivationConfig,
}

/// Gradient-descent visualiser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Update rule: "sgd", "momentum", "rmsprop" or "adam"
    pub optimizer: OptimizerKind,

    /// Loss surface: "quadratic", "rosenbrock", "himmelblau" or "beale"
    pub surface: LossSurface,

    pub learning_rate: f64,

    /// Seed point `[x, y]`, also the position restored on reset
    pub start: [f64; 2],

    /// Run converges once the loss drops below this value
    pub loss_threshold: f64,

    /// Run converges once the iteration count exceeds this value
    pub max_iterations: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerKind::Sgd,
            surface: LossSurface::Quadratic,
            learning_rate: 0.1,
            start: [-2.0, 0.0],
            loss_threshold: 0.001,
            max_iterations: 1000,
        }
    }
}

/// Self-organizing map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SomConfig {
    /// Input data: "colors", "clusters2d" or "iris"
    pub dataset: DatasetKind,

    /// Side of the square neuron grid
    pub grid_size: usize,

    /// Initial learning rate η₀
    pub learning_rate: f64,

    /// Initial neighborhood radius σ₀, in grid units
    pub neighborhood_radius: f64,

    pub max_iterations: usize,

    /// Seed for weights, data and sampling; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetKind::Colors,
            grid_size: 10,
            learning_rate: 0.5,
            neighborhood_radius: 3.0,
            max_iterations: 1000,
            seed: None,
        }
    }
}

/// K-means demonstrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of centroids
    pub clusters: usize,

    /// Points generated around each blob centre
    pub points_per_cluster: usize,

    pub max_iterations: usize,

    /// Stop early once an iteration leaves every assignment unchanged
    pub stop_when_stable: bool,

    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            clusters: 4,
            points_per_cluster: 25,
            max_iterations: 20,
            stop_when_stable: true,
            seed: None,
        }
    }
}

/// Training-curve simulator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub max_epochs: usize,

    /// Number of most recent epochs kept in the history
    pub history_len: usize,

    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            max_epochs: 100,
            history_len: 50,
            seed: None,
        }
    }
}

/// Parameters of the parameterised activation and loss functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    pub leaky_relu_alpha: f64,
    pub elu_alpha: f64,
    pub huber_delta: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            leaky_relu_alpha: DEFAULT_LEAKY_RELU_ALPHA,
            elu_alpha: DEFAULT_ELU_ALPHA,
            huber_delta: DEFAULT_HUBER_DELTA,
        }
    }
}

/// Loads a configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a [`PlaygroundConfig`] and
/// validates every section.
///
/// # Errors
///
/// `Io` if the file cannot be read, `Json` if it is not valid JSON for this
/// schema, `Config` if a value is out of range.
///
/// # Examples
///
/// ```no_run
/// use neural_playground::config::load_config;
///
/// let cfg = load_config("config/default.json").unwrap();
/// assert_eq!(cfg.som.grid_size, 10);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlaygroundConfig> {
    let contents = fs::read_to_string(path)?;
    let config: PlaygroundConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads `path` when given, otherwise returns the defaults.
pub fn load_or_default(path: Option<&str>) -> Result<PlaygroundConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(PlaygroundConfig::default()),
    }
}

fn invalid(message: impl Into<String>) -> PlaygroundError {
    PlaygroundError::Config(message.into())
}

fn require_positive(section: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(format!(
            "{}.{} must be a positive finite number, got {}",
            section, field, value
        )));
    }
    Ok(())
}

fn require_nonzero(section: &str, field: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid(format!("{}.{} must be at least 1", section, field)));
    }
    Ok(())
}

/// Checks every section for out-of-range values.
pub fn validate_config(config: &PlaygroundConfig) -> Result<()> {
    let gd = &config.gradient_descent;
    require_positive("gradient_descent", "learning_rate", gd.learning_rate)?;
    require_positive("gradient_descent", "loss_threshold", gd.loss_threshold)?;
    require_nonzero("gradient_descent", "max_iterations", gd.max_iterations)?;
    if !gd.start.iter().all(|v| v.is_finite()) {
        return Err(invalid("gradient_descent.start must be finite"));
    }

    let som = &config.som;
    require_nonzero("som", "grid_size", som.grid_size)?;
    if som.grid_size > MAX_GRID_SIZE {
        return Err(invalid(format!(
            "som.grid_size must be at most {}, got {}",
            MAX_GRID_SIZE, som.grid_size
        )));
    }
    require_positive("som", "learning_rate", som.learning_rate)?;
    require_positive("som", "neighborhood_radius", som.neighborhood_radius)?;
    require_nonzero("som", "max_iterations", som.max_iterations)?;

    let km = &config.kmeans;
    require_nonzero("kmeans", "clusters", km.clusters)?;
    require_nonzero("kmeans", "max_iterations", km.max_iterations)?;

    let training = &config.training;
    require_positive("training", "learning_rate", training.learning_rate)?;
    require_nonzero("training", "max_epochs", training.max_epochs)?;
    require_nonzero("training", "history_len", training.history_len)?;

    let act = &config.activation;
    if !act.leaky_relu_alpha.is_finite() || act.leaky_relu_alpha < 0.0 {
        return Err(invalid("activation.leaky_relu_alpha must be non-negative"));
    }
    require_positive("activation", "elu_alpha", act.elu_alpha)?;
    require_positive("activation", "huber_delta", act.huber_delta)?;

    Ok(())
}
