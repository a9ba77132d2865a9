//! Activation functions and their analytic derivatives
//!
//! This module provides the activation catalog used by the neuron demos:
//! - Sigmoid (argument clamped to [-250, 250] before exponentiation)
//! - ReLU, Leaky ReLU, ELU
//! - Tanh
//! - Softmax (vector version with max-subtraction)
//!
//! Every function here is pure. [`ActivationKind`] is the enum dispatch used
//! by the engine facade; the free functions are the building blocks.

use serde::{Deserialize, Serialize};

/// Argument bound applied by [`sigmoid`] before calling `exp`.
pub const SIGMOID_CLAMP: f64 = 250.0;

/// Default negative slope for Leaky ReLU.
pub const DEFAULT_LEAKY_RELU_ALPHA: f64 = 0.01;

/// Default saturation value for ELU.
pub const DEFAULT_ELU_ALPHA: f64 = 1.0;

/// Sigmoid activation function.
///
/// Returns `1 / (1 + exp(-x))` with `x` clamped to `[-250, 250]` so the
/// exponential never overflows.
pub fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
    1.0 / (1.0 + (-clamped).exp())
}

/// Sigmoid derivative evaluated at the pre-activation `x`.
///
/// Returns `σ(x) * (1 - σ(x))`.
pub fn sigmoid_derivative(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

/// ReLU activation: `max(0, x)`.
pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// ReLU derivative: 1 for `x > 0`, otherwise 0 (including at zero).
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Leaky ReLU: `x` for positive inputs, `alpha * x` otherwise.
pub fn leaky_relu(x: f64, alpha: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        alpha * x
    }
}

pub fn leaky_relu_derivative(x: f64, alpha: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        alpha
    }
}

/// Hyperbolic tangent, output in (-1, 1).
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Tanh derivative: `1 - tanh²(x)`.
pub fn tanh_derivative(x: f64) -> f64 {
    let t = x.tanh();
    1.0 - t * t
}

/// ELU activation: `x` for positive inputs, `alpha * (e^x - 1)` otherwise.
pub fn elu(x: f64, alpha: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        alpha * (x.exp() - 1.0)
    }
}

pub fn elu_derivative(x: f64, alpha: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        alpha * x.exp()
    }
}

/// Softmax over a vector.
///
/// Subtracts the maximum element before exponentiating, so large logits
/// stay finite and the result is invariant to a constant shift of the input.
/// An empty slice yields an empty vector.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|&v| (v - max_value).exp()).collect();
    let sum: f64 = exps.iter().sum();
    let inv_sum = 1.0 / sum;

    exps.into_iter().map(|e| e * inv_sum).collect()
}

/// Activation catalog with compile-time exhaustive dispatch.
///
/// Parameterised variants carry their own slope (`alpha`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivationKind {
    Sigmoid,
    Relu,
    Tanh,
    LeakyRelu {
        #[serde(default = "default_leaky_alpha")]
        alpha: f64,
    },
    Elu {
        #[serde(default = "default_elu_alpha")]
        alpha: f64,
    },
}

fn default_leaky_alpha() -> f64 {
    DEFAULT_LEAKY_RELU_ALPHA
}

fn default_elu_alpha() -> f64 {
    DEFAULT_ELU_ALPHA
}

impl ActivationKind {
    /// Every activation with its default parameters, in display order.
    pub const ALL: [ActivationKind; 5] = [
        ActivationKind::Sigmoid,
        ActivationKind::Relu,
        ActivationKind::Tanh,
        ActivationKind::LeakyRelu {
            alpha: DEFAULT_LEAKY_RELU_ALPHA,
        },
        ActivationKind::Elu {
            alpha: DEFAULT_ELU_ALPHA,
        },
    ];

    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            ActivationKind::Sigmoid => sigmoid(x),
            ActivationKind::Relu => relu(x),
            ActivationKind::Tanh => tanh(x),
            ActivationKind::LeakyRelu { alpha } => leaky_relu(x, alpha),
            ActivationKind::Elu { alpha } => elu(x, alpha),
        }
    }

    pub fn derivative(&self, x: f64) -> f64 {
        match *self {
            ActivationKind::Sigmoid => sigmoid_derivative(x),
            ActivationKind::Relu => relu_derivative(x),
            ActivationKind::Tanh => tanh_derivative(x),
            ActivationKind::LeakyRelu { alpha } => leaky_relu_derivative(x, alpha),
            ActivationKind::Elu { alpha } => elu_derivative(x, alpha),
        }
    }

    /// Output range `[lo, hi]` shown when plotting over x ∈ [-6, 6].
    ///
    /// Unbounded activations report the range reached on that window.
    pub fn output_range(&self) -> (f64, f64) {
        match self {
            ActivationKind::Sigmoid => (0.0, 1.0),
            ActivationKind::Relu => (0.0, 6.0),
            ActivationKind::Tanh => (-1.0, 1.0),
            ActivationKind::LeakyRelu { .. } => (-0.3, 6.0),
            ActivationKind::Elu { .. } => (-1.0, 6.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::Sigmoid => "Sigmoid",
            ActivationKind::Relu => "ReLU",
            ActivationKind::Tanh => "Tanh",
            ActivationKind::LeakyRelu { .. } => "Leaky ReLU",
            ActivationKind::Elu { .. } => "ELU",
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            ActivationKind::Sigmoid => "σ(x) = 1 / (1 + e^(-x))",
            ActivationKind::Relu => "f(x) = max(0, x)",
            ActivationKind::Tanh => "tanh(x) = (e^x - e^(-x)) / (e^x + e^(-x))",
            ActivationKind::LeakyRelu { .. } => "f(x) = x if x > 0, else αx",
            ActivationKind::Elu { .. } => "f(x) = x if x > 0, else α(e^x - 1)",
        }
    }

    /// Samples `(x, f(x))` pairs on `count` evenly spaced points of `[x_min, x_max]`.
    ///
    /// This is the curve a plotting layer draws.
    pub fn sample_curve(&self, x_min: f64, x_max: f64, count: usize) -> Vec<(f64, f64)> {
        crate::utils::stats::linspace(x_min, x_max, count)
            .into_iter()
            .map(|x| (x, self.apply(x)))
            .collect()
    }
}
