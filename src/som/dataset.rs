//! Synthetic input datasets for the self-organizing map.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, Result};
use crate::utils::rng::jitter;

const COLOR_CENTRES: [[f64; 3]; 9] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0],
    [0.5, 0.5, 0.5],
    [0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0],
];
const COLOR_POINTS_PER_CENTRE: usize = 20;
const COLOR_SPREAD: f64 = 0.3;

const CLUSTER_CENTRES: [[f64; 2]; 5] = [[-2.0, -2.0], [2.0, 2.0], [-2.0, 2.0], [2.0, -2.0], [0.0, 0.0]];
const CLUSTER_POINTS_PER_CENTRE: usize = 30;
const CLUSTER_SPREAD: f64 = 2.0;

// Setosa-, versicolor- and virginica-like class means.
const IRIS_CENTRES: [[f64; 4]; 3] = [
    [5.1, 3.5, 1.4, 0.2],
    [6.2, 2.8, 4.3, 1.3],
    [7.3, 3.0, 6.3, 1.8],
];
const IRIS_POINTS_PER_CENTRE: usize = 50;
const IRIS_SPREAD: [f64; 4] = [1.5, 1.0, 2.0, 0.8];

/// Dataset selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// RGB colours around primaries, secondaries and greys (3-D).
    Colors,
    /// Five Gaussian-ish blobs in the plane (2-D).
    #[serde(rename = "clusters2d")]
    Clusters2d,
    /// Three iris-like classes (4-D).
    Iris,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [DatasetKind::Colors, DatasetKind::Clusters2d, DatasetKind::Iris];

    pub fn dimensions(&self) -> usize {
        match self {
            DatasetKind::Colors => 3,
            DatasetKind::Clusters2d => 2,
            DatasetKind::Iris => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Colors => "RGB Colors",
            DatasetKind::Clusters2d => "2D Clusters",
            DatasetKind::Iris => "Iris-like Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DatasetKind::Colors => "Learn color clustering in RGB space",
            DatasetKind::Clusters2d => "Simple 2D clustering problem",
            DatasetKind::Iris => "Multi-dimensional classification data",
        }
    }

    /// Generates a fresh sample set.
    ///
    /// Samples are grouped by centre, in centre order. Colour channels are
    /// clamped to `[0, 1]` and iris measurements floored at 0.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> InputDataset {
        let samples = match self {
            DatasetKind::Colors => jittered(rng, &COLOR_CENTRES, COLOR_POINTS_PER_CENTRE, |rng, _, c| {
                (c + jitter(rng, COLOR_SPREAD)).clamp(0.0, 1.0)
            }),
            DatasetKind::Clusters2d => {
                jittered(rng, &CLUSTER_CENTRES, CLUSTER_POINTS_PER_CENTRE, |rng, _, c| {
                    c + jitter(rng, CLUSTER_SPREAD)
                })
            }
            DatasetKind::Iris => jittered(rng, &IRIS_CENTRES, IRIS_POINTS_PER_CENTRE, |rng, d, c| {
                (c + jitter(rng, IRIS_SPREAD[d])).max(0.0)
            }),
        };
        InputDataset {
            dimensions: self.dimensions(),
            samples,
        }
    }
}

fn jittered<R, const D: usize, F>(
    rng: &mut R,
    centres: &[[f64; D]],
    per_centre: usize,
    mut sample: F,
) -> Vec<Vec<f64>>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R, usize, f64) -> f64,
{
    let mut samples = Vec::with_capacity(centres.len() * per_centre);
    for centre in centres {
        for _ in 0..per_centre {
            samples.push(
                centre
                    .iter()
                    .enumerate()
                    .map(|(d, &c)| sample(rng, d, c))
                    .collect(),
            );
        }
    }
    samples
}

/// Ordered, fixed-dimensionality input vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDataset {
    dimensions: usize,
    samples: Vec<Vec<f64>>,
}

impl InputDataset {
    /// Wraps `samples`, checking every sample has `dimensions` entries.
    pub fn new(dimensions: usize, samples: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(bad) = samples.iter().find(|s| s.len() != dimensions) {
            return Err(PlaygroundError::dimension("input dataset", dimensions, bad.len()));
        }
        Ok(Self {
            dimensions,
            samples,
        })
    }

    pub fn empty(dimensions: usize) -> Self {
        Self {
            dimensions,
            samples: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> Option<&[f64]> {
        self.samples.get(index).map(Vec::as_slice)
    }

    /// Uniformly drawn sample index (with replacement); `None` when empty.
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.samples.is_empty() {
            None
        } else {
            Some(rng.gen_range(0..self.samples.len()))
        }
    }
}
