//! Single-neuron perceptron
//!
//! This module provides a [`Perceptron`]: one neuron computing
//! `output = activation(Σ wᵢxᵢ + b)`, with a one-sample backpropagation
//! update for the backprop walkthrough.

use rand::Rng;

use crate::error::{ensure_positive, PlaygroundError, Result};
use crate::utils::init::xavier_init;
use crate::utils::matrix::dot;
use crate::utils::rng::random_in_range;
use crate::utils::{ActivationKind, LossKind};

/// Manual weight and bias adjustments are clamped to `[-WEIGHT_LIMIT, WEIGHT_LIMIT]`.
pub const WEIGHT_LIMIT: f64 = 2.0;

/// Pre- and post-activation values of one forward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronOutput {
    /// Weighted sum plus bias
    pub sum: f64,
    /// `activation(sum)`
    pub output: f64,
}

/// A single neuron with weights, a bias and an activation function.
///
/// # Fields
///
/// * `weights` - One weight per input
/// * `bias` - Added to the weighted sum
/// * `activation` - Non-linearity applied to the sum
///
/// # Example
///
/// ```
/// use neural_playground::demos::Perceptron;
///
/// let neuron = Perceptron::demo();
/// let out = neuron.forward(&[1.0, 0.5]).unwrap();
/// assert!((out.sum - 1.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    weights: Vec<f64>,
    bias: f64,
    activation: ActivationKind,
}

impl Perceptron {
    pub fn new(weights: Vec<f64>, bias: f64, activation: ActivationKind) -> Result<Self> {
        if weights.is_empty() {
            return Err(PlaygroundError::EmptyInput("perceptron weights"));
        }
        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    /// Two-input sigmoid neuron with weights `[0.7, 0.4]` and bias 0.2.
    pub fn demo() -> Self {
        Self {
            weights: vec![0.7, 0.4],
            bias: 0.2,
            activation: ActivationKind::Sigmoid,
        }
    }

    /// Xavier-initialised weights (fan-out 1) and zero bias.
    pub fn with_xavier<R: Rng + ?Sized>(
        rng: &mut R,
        inputs: usize,
        activation: ActivationKind,
    ) -> Result<Self> {
        let weights = (0..inputs)
            .map(|_| xavier_init(rng, inputs, 1))
            .collect::<Result<Vec<_>>>()?;
        Self::new(weights, 0.0, activation)
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> ActivationKind {
        self.activation
    }

    pub fn set_activation(&mut self, activation: ActivationKind) {
        self.activation = activation;
    }

    /// `Σ wᵢxᵢ + b`
    pub fn weighted_sum(&self, inputs: &[f64]) -> Result<f64> {
        Ok(dot(&self.weights, inputs)? + self.bias)
    }

    pub fn forward(&self, inputs: &[f64]) -> Result<NeuronOutput> {
        let sum = self.weighted_sum(inputs)?;
        Ok(NeuronOutput {
            sum,
            output: self.activation.apply(sum),
        })
    }

    /// One gradient-descent update on a single sample.
    ///
    /// Applies the chain rule `∂L/∂wᵢ = L'(y, t) · f'(z) · xᵢ` (and the same
    /// without `xᵢ` for the bias), then returns the loss measured before the
    /// update.
    pub fn train_step(
        &mut self,
        inputs: &[f64],
        target: f64,
        loss: LossKind,
        learning_rate: f64,
    ) -> Result<f64> {
        ensure_positive("learning_rate", learning_rate)?;
        let NeuronOutput { sum, output } = self.forward(inputs)?;

        let loss_value = loss.loss(output, target);
        let delta = loss.gradient(output, target) * self.activation.derivative(sum);

        for (w, &x) in self.weights.iter_mut().zip(inputs) {
            *w -= learning_rate * delta * x;
        }
        self.bias -= learning_rate * delta;
        Ok(loss_value)
    }

    /// Adds `delta` to one weight, clamped to ±[`WEIGHT_LIMIT`].
    pub fn nudge_weight(&mut self, index: usize, delta: f64) -> Result<f64> {
        let len = self.weights.len();
        let weight = self
            .weights
            .get_mut(index)
            .ok_or_else(|| PlaygroundError::dimension("nudge_weight index", len, index))?;
        *weight = (*weight + delta).clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
        Ok(*weight)
    }

    pub fn nudge_bias(&mut self, delta: f64) -> f64 {
        self.bias = (self.bias + delta).clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
        self.bias
    }

    /// Redraws every weight and the bias uniformly from `[-1, 1)`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for w in &mut self.weights {
            *w = random_in_range(rng, -1.0, 1.0);
        }
        self.bias = random_in_range(rng, -1.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::seeded_rng;

    #[test]
    fn test_demo_forward() {
        let neuron = Perceptron::demo();
        let out = neuron.forward(&[0.5, -1.0]).unwrap();
        // 0.35 - 0.4 + 0.2
        assert!((out.sum - 0.15).abs() < 1e-12);
        assert!((out.output - 1.0 / (1.0 + (-0.15f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_input_length_mismatch() {
        let neuron = Perceptron::demo();
        assert!(matches!(
            neuron.forward(&[1.0, 2.0, 3.0]),
            Err(PlaygroundError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_xavier_initialization() {
        let mut rng = seeded_rng(42);
        let neuron = Perceptron::with_xavier(&mut rng, 10, ActivationKind::Tanh).unwrap();
        let limit = (6.0f64 / 11.0).sqrt();
        assert_eq!(neuron.input_size(), 10);
        assert!(neuron.weights().iter().all(|w| w.abs() <= limit));
        assert_eq!(neuron.bias(), 0.0);
    }

    #[test]
    fn test_deterministic_initialization() {
        let a = Perceptron::with_xavier(&mut seeded_rng(42), 5, ActivationKind::Relu).unwrap();
        let b = Perceptron::with_xavier(&mut seeded_rng(42), 5, ActivationKind::Relu).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_train_step_reduces_loss() {
        let mut neuron = Perceptron::demo();
        let inputs = [1.0, 1.0];
        let first = neuron.train_step(&inputs, 0.0, LossKind::MeanSquaredError, 0.5).unwrap();
        let second = neuron.train_step(&inputs, 0.0, LossKind::MeanSquaredError, 0.5).unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_nudges_are_clamped() {
        let mut neuron = Perceptron::demo();
        assert_eq!(neuron.nudge_weight(0, 5.0).unwrap(), WEIGHT_LIMIT);
        assert_eq!(neuron.nudge_bias(-10.0), -WEIGHT_LIMIT);
        assert!(neuron.nudge_weight(2, 0.1).is_err());
    }

    #[test]
    fn test_randomize_range() {
        let mut neuron = Perceptron::demo();
        neuron.randomize(&mut seeded_rng(8));
        assert!(neuron.weights().iter().all(|w| (-1.0..1.0).contains(w)));
        assert!((-1.0..1.0).contains(&neuron.bias()));
    }
}
