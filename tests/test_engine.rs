//! Tests for the stateless engine facade
//!
//! Each facade call is checked against the module it delegates to, and a
//! full descent is replayed through `optimizer_step` alone.

use approx::assert_relative_eq;
use neural_playground::config::ActivationConfig;
use neural_playground::demos::kmeans::{generate_blobs, random_centroids, KMeansOutcome};
use neural_playground::engine::{
    activation_catalog, compute_activation, compute_activation_derivative, compute_loss,
    compute_loss_gradient, kmeans_step, loss_catalog, optimizer_step, som_training_step,
};
use neural_playground::optimizers::{LossSurface, OptimizerKind, OptimizerState};
use neural_playground::som::{DatasetKind, InputDataset, SomGrid, SomStepOutcome};
use neural_playground::utils::{seeded_rng, ActivationKind, LossKind, Point2};
use neural_playground::PlaygroundError;

// ============================================================================
// Function Catalog Tests
// ============================================================================

mod catalog_tests {
    use super::*;

    #[test]
    fn test_compute_activation() {
        assert_eq!(compute_activation(ActivationKind::Sigmoid, 0.0), 0.5);
        assert_eq!(compute_activation(ActivationKind::Relu, -1.0), 0.0);
        assert_eq!(compute_activation_derivative(ActivationKind::Tanh, 0.0), 1.0);
    }

    #[test]
    fn test_compute_loss() {
        assert_relative_eq!(
            compute_loss(LossKind::MeanSquaredError, 3.0, 1.0),
            2.0,
            epsilon = 1e-12
        );
        assert_eq!(compute_loss_gradient(LossKind::MeanAbsoluteError, 0.0, 1.0), -1.0);
    }

    #[test]
    fn test_default_catalogs() {
        let config = ActivationConfig::default();
        let activations = activation_catalog(&config);
        assert_eq!(activations, ActivationKind::ALL);
        let losses = loss_catalog(&config);
        assert_eq!(losses, LossKind::ALL);
    }
}

// ============================================================================
// Optimizer Step Tests
// ============================================================================

mod optimizer_step_tests {
    use super::*;

    #[test]
    fn test_replayed_adam_descent_converges() {
        let surface = LossSurface::Quadratic;
        let mut point = Point2::new(-2.0, 0.0);
        let mut state: Option<OptimizerState> = None;
        let mut iterations = 0;
        while surface.value(point) >= 0.001 && iterations < 1000 {
            let result = optimizer_step(OptimizerKind::Adam, point, surface, 0.1, state.as_ref()).unwrap();
            point = result.point;
            state = Some(result.state);
            iterations += 1;
        }
        assert!(surface.value(point) < 0.001);
        assert!(iterations < 1000);
    }

    #[test]
    fn test_invalid_learning_rate() {
        for lr in [0.0, -0.5, f64::NAN] {
            let err = optimizer_step(
                OptimizerKind::Sgd,
                Point2::ORIGIN,
                LossSurface::Quadratic,
                lr,
                None,
            )
            .unwrap_err();
            assert!(matches!(err, PlaygroundError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_sgd_at_minimum_stays_put() {
        let result = optimizer_step(
            OptimizerKind::Sgd,
            Point2::new(1.0, 1.0),
            LossSurface::Rosenbrock,
            0.01,
            None,
        )
        .unwrap();
        assert_eq!(result.point, Point2::new(1.0, 1.0));
        assert_eq!(result.loss, 0.0);
        assert_eq!(result.gradient_magnitude, 0.0);
    }
}

// ============================================================================
// SOM and K-means Step Tests
// ============================================================================

mod step_tests {
    use super::*;

    #[test]
    fn test_som_step_validates_parameters() {
        let mut rng = seeded_rng(2);
        let grid = SomGrid::random(&mut rng, 3, 3).unwrap();
        let data = DatasetKind::Colors.generate(&mut rng);
        assert!(som_training_step(&grid, &data, 0, 0.0, 3.0, 1000, &mut rng).is_err());
        assert!(som_training_step(&grid, &data, 0, 0.5, -1.0, 1000, &mut rng).is_err());
        assert!(som_training_step(&grid, &data, 0, 0.5, 3.0, 0, &mut rng).is_err());

        let outcome = som_training_step(&grid, &data, 0, 0.5, 3.0, 1000, &mut rng).unwrap();
        assert!(matches!(outcome, SomStepOutcome::Trained(_)));
    }

    #[test]
    fn test_som_step_empty_dataset() {
        let mut rng = seeded_rng(2);
        let grid = SomGrid::random(&mut rng, 3, 3).unwrap();
        let outcome =
            som_training_step(&grid, &InputDataset::empty(3), 0, 0.5, 3.0, 1000, &mut rng).unwrap();
        assert_eq!(outcome, SomStepOutcome::NoData);
    }

    #[test]
    fn test_kmeans_step_delegates() {
        let mut rng = seeded_rng(6);
        let points = generate_blobs(&mut rng, 10);
        let centroids = random_centroids(&mut rng, 4);
        let outcome = kmeans_step(&points, &centroids);
        let KMeansOutcome::Stepped(step) = outcome else {
            panic!("expected a step");
        };
        assert_eq!(step.points.len(), 40);
        assert_eq!(step.changed, 40);
    }
}
