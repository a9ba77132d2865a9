//! Shared math primitives for the demo engines
//!
//! This module provides activation and loss functions, matrix/vector
//! operations, statistics, weight initialisers, random sources and decay
//! schedules. Everything here is pure apart from the explicitly injected RNG.

pub mod activations;
pub mod init;
pub mod losses;
pub mod matrix;
pub mod point;
pub mod rng;
pub mod schedule;
pub mod stats;

pub use activations::{softmax, ActivationKind};
pub use losses::LossKind;
pub use matrix::Matrix;
pub use point::Point2;
pub use rng::{entropy_rng, seeded_rng};
