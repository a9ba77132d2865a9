//! Neuron grid of a self-organizing map
//!
//! Neurons are stored row-major: the neuron at grid coordinates `(i, j)`
//! lives at index `i * cols + j`, and every scan (BMU search, update,
//! rendering) visits them in that order.

use rand::Rng;

use crate::error::{PlaygroundError, Result};
use crate::som::InputDataset;
use crate::utils::matrix::euclidean_distance;

/// One map unit: a weight vector pinned to integer grid coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    pub i: usize,
    pub j: usize,
    pub weights: Vec<f64>,
}

/// Best-matching unit for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SomBmu {
    pub i: usize,
    pub j: usize,
    /// Euclidean distance in weight space
    pub distance: f64,
}

/// Gaussian neighborhood weight between two grid positions.
///
/// `h = exp(-d² / (2σ²))` with `d` the Euclidean distance between grid
/// coordinates. A non-positive radius degenerates to a unit impulse at the
/// BMU.
pub fn neighborhood_influence(bmu: (usize, usize), neuron: (usize, usize), radius: f64) -> f64 {
    let di = bmu.0 as f64 - neuron.0 as f64;
    let dj = bmu.1 as f64 - neuron.1 as f64;
    let dist_sq = di * di + dj * dj;
    if radius <= 0.0 {
        return if dist_sq == 0.0 { 1.0 } else { 0.0 };
    }
    (-dist_sq / (2.0 * radius * radius)).exp()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SomGrid {
    rows: usize,
    cols: usize,
    dimensions: usize,
    neurons: Vec<Neuron>,
}

impl SomGrid {
    /// Square grid with weights drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: usize, dimensions: usize) -> Result<Self> {
        Self::random_rect(rng, size, size, dimensions)
    }

    pub fn random_rect<R: Rng + ?Sized>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        dimensions: usize,
    ) -> Result<Self> {
        check_shape(rows, cols, dimensions)?;
        let mut neurons = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let weights = (0..dimensions).map(|_| rng.gen::<f64>()).collect();
                neurons.push(Neuron { i, j, weights });
            }
        }
        Ok(Self {
            rows,
            cols,
            dimensions,
            neurons,
        })
    }

    /// Grid from explicit weight vectors, listed row-major.
    pub fn from_weights(rows: usize, cols: usize, weights: Vec<Vec<f64>>) -> Result<Self> {
        let dimensions = weights.first().map(Vec::len).unwrap_or(0);
        check_shape(rows, cols, dimensions)?;
        if weights.len() != rows * cols {
            return Err(PlaygroundError::dimension("som grid", rows * cols, weights.len()));
        }
        if let Some(bad) = weights.iter().find(|w| w.len() != dimensions) {
            return Err(PlaygroundError::dimension("som neuron weights", dimensions, bad.len()));
        }

        let neurons = weights
            .into_iter()
            .enumerate()
            .map(|(index, weights)| Neuron {
                i: index / cols,
                j: index % cols,
                weights,
            })
            .collect();
        Ok(Self {
            rows,
            cols,
            dimensions,
            neurons,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, i: usize, j: usize) -> Option<&Neuron> {
        if i < self.rows && j < self.cols {
            self.neurons.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// Neuron closest to `input` in weight space.
    ///
    /// Ties go to the first neuron in row-major order.
    pub fn find_bmu(&self, input: &[f64]) -> Result<SomBmu> {
        if input.len() != self.dimensions {
            return Err(PlaygroundError::dimension("find_bmu", self.dimensions, input.len()));
        }

        let mut best = SomBmu {
            i: 0,
            j: 0,
            distance: f64::INFINITY,
        };
        for neuron in &self.neurons {
            let distance = euclidean_distance(input, &neuron.weights)?;
            if distance < best.distance {
                best = SomBmu {
                    i: neuron.i,
                    j: neuron.j,
                    distance,
                };
            }
        }
        Ok(best)
    }

    /// Pulls every neuron towards `input`:
    /// `w += learning_rate · h(bmu, n) · (input - w)`.
    pub fn apply_update(
        &mut self,
        input: &[f64],
        bmu: (usize, usize),
        learning_rate: f64,
        radius: f64,
    ) -> Result<()> {
        if input.len() != self.dimensions {
            return Err(PlaygroundError::dimension("som update", self.dimensions, input.len()));
        }
        for neuron in &mut self.neurons {
            let influence = neighborhood_influence(bmu, (neuron.i, neuron.j), radius);
            let rate = learning_rate * influence;
            for (w, &x) in neuron.weights.iter_mut().zip(input) {
                *w += rate * (x - *w);
            }
        }
        Ok(())
    }

    /// Mean weight-space distance from each sample to its BMU.
    pub fn quantization_error(&self, dataset: &InputDataset) -> Result<f64> {
        if dataset.is_empty() {
            return Err(PlaygroundError::EmptyInput("quantization error dataset"));
        }
        let mut total = 0.0;
        for sample in dataset.samples() {
            total += self.find_bmu(sample)?.distance;
        }
        Ok(total / dataset.len() as f64)
    }
}

fn check_shape(rows: usize, cols: usize, dimensions: usize) -> Result<()> {
    for (name, value) in [("rows", rows), ("cols", cols), ("dimensions", dimensions)] {
        if value == 0 {
            return Err(PlaygroundError::InvalidParameter {
                name,
                value: 0.0,
                reason: "must be at least 1",
            });
        }
    }
    if rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(dimensions))
        .is_none()
    {
        return Err(PlaygroundError::InvalidParameter {
            name: "rows * cols * dimensions",
            value: rows as f64 * cols as f64 * dimensions as f64,
            reason: "grid size overflows",
        });
    }
    Ok(())
}
