//! Neural Playground Library
//!
//! This library provides the numerical engines behind a set of interactive
//! neural-network demos. A rendering layer calls into it one tick at a time
//! and draws whatever state comes back.
//!
//! # Modules
//!
//! - `utils`: Math primitives (activations, losses, matrices, statistics, RNG, initialisers)
//! - `optimizers`: SGD, Momentum, RMSprop and Adam over 2-D loss surfaces, plus the run state machine
//! - `som`: Self-organizing map grid, datasets and trainer
//! - `demos`: Perceptron, K-means and the training-curve simulator
//! - `engine`: Stateless per-call entry points
//! - `config`: JSON configuration structures
//! - `error`: Crate error type

pub mod config;
pub mod demos;
pub mod engine;
pub mod error;
pub mod optimizers;
pub mod som;
pub mod utils;

pub use error::{PlaygroundError, Result};
