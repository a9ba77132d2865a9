//! Small closed-form demonstrators
//!
//! - `perceptron`: single neuron forward pass and one-sample backprop
//! - `kmeans`: Lloyd's algorithm on generated 2-D blobs
//! - `training_curve`: synthetic loss/accuracy curves

pub mod kmeans;
pub mod perceptron;
pub mod training_curve;

pub use kmeans::{
    generate_blobs, inertia, kmeans_step, random_centroids, Cluster, DataPoint, KMeansOutcome,
    KMeansRun, KMeansStatus, KMeansStep, KMeansTick,
};
pub use perceptron::{NeuronOutput, Perceptron};
pub use training_curve::{SimulatorStatus, TrainingCurveSimulator, TrainingSample};
