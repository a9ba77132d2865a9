//! Tests for the self-organizing map engine
//!
//! This file tests:
//! - Best-matching unit search and tie-breaking
//! - Neighborhood-weighted updates
//! - The pure training step and its decay schedules
//! - The SomTrainer start/stop/tick state machine

use approx::assert_relative_eq;
use neural_playground::config::SomConfig;
use neural_playground::som::{
    neighborhood_influence, som_training_step, DatasetKind, InputDataset, SomGrid, SomParams,
    SomStepOutcome, SomTrainer, TrainerStatus,
};
use neural_playground::utils::seeded_rng;
use neural_playground::PlaygroundError;

fn two_neuron_grid() -> SomGrid {
    SomGrid::from_weights(1, 2, vec![vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap()
}

fn seeded_config(dataset: DatasetKind, grid_size: usize, max_iterations: usize) -> SomConfig {
    SomConfig {
        dataset,
        grid_size,
        max_iterations,
        seed: Some(42),
        ..SomConfig::default()
    }
}

// ============================================================================
// Grid Tests
// ============================================================================

mod grid_tests {
    use super::*;

    #[test]
    fn test_bmu_is_nearest_neuron() {
        let bmu = two_neuron_grid().find_bmu(&[0.1, 0.1]).unwrap();
        assert_eq!((bmu.i, bmu.j), (0, 0));
        assert_relative_eq!(bmu.distance, 0.02f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_bmu_tie_goes_to_first_neuron() {
        let bmu = two_neuron_grid().find_bmu(&[0.5, 0.5]).unwrap();
        assert_eq!((bmu.i, bmu.j), (0, 0));
    }

    #[test]
    fn test_bmu_dimension_mismatch() {
        let err = two_neuron_grid().find_bmu(&[0.1, 0.1, 0.1]).unwrap_err();
        assert!(matches!(err, PlaygroundError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_update_moves_bmu_closer() {
        let mut grid = two_neuron_grid();
        let input = [0.1, 0.1];
        let before = grid.find_bmu(&input).unwrap();
        grid.apply_update(&input, (before.i, before.j), 0.5, 1.0).unwrap();
        let after = grid.find_bmu(&input).unwrap();
        assert_eq!((after.i, after.j), (before.i, before.j));
        assert!(after.distance < before.distance);
        assert_relative_eq!(after.distance, before.distance * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_update_weights_by_grid_distance() {
        let mut grid = two_neuron_grid();
        grid.apply_update(&[0.0, 0.0], (0, 0), 1.0, 1.0).unwrap();
        let far = &grid.neuron(0, 1).unwrap().weights;
        // h = exp(-1 / 2) for the neighbour one cell away
        let expected = 1.0 - (-0.5f64).exp();
        assert_relative_eq!(far[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_neighborhood_influence() {
        assert_eq!(neighborhood_influence((2, 2), (2, 2), 3.0), 1.0);
        assert!(neighborhood_influence((0, 0), (5, 5), 1.0) < 1e-5);
        assert_eq!(neighborhood_influence((0, 0), (0, 1), 0.0), 0.0);
    }

    #[test]
    fn test_row_major_layout() {
        let mut rng = seeded_rng(3);
        let grid = SomGrid::random_rect(&mut rng, 2, 3, 4).unwrap();
        assert_eq!(grid.neurons().len(), 6);
        let n = &grid.neurons()[4];
        assert_eq!((n.i, n.j), (1, 1));
        assert!(grid
            .neurons()
            .iter()
            .all(|n| n.weights.iter().all(|&w| (0.0..1.0).contains(&w))));
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        let mut rng = seeded_rng(3);
        assert!(SomGrid::random(&mut rng, 0, 3).is_err());
    }
}

// ============================================================================
// Dataset Tests
// ============================================================================

mod dataset_tests {
    use super::*;

    #[test]
    fn test_dataset_sizes_and_ranges() {
        let mut rng = seeded_rng(11);
        let colors = DatasetKind::Colors.generate(&mut rng);
        assert_eq!(colors.len(), 180);
        assert!(colors
            .samples()
            .iter()
            .all(|s| s.len() == 3 && s.iter().all(|&c| (0.0..=1.0).contains(&c))));

        assert_eq!(DatasetKind::Clusters2d.generate(&mut rng).len(), 150);

        let iris = DatasetKind::Iris.generate(&mut rng);
        assert_eq!(iris.len(), 150);
        assert!(iris.samples().iter().flatten().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_ragged_dataset_rejected() {
        assert!(InputDataset::new(2, vec![vec![0.0, 1.0], vec![0.5]]).is_err());
    }
}

// ============================================================================
// Training Step Tests
// ============================================================================

mod step_tests {
    use super::*;

    #[test]
    fn test_step_leaves_input_grid_untouched() {
        let grid = two_neuron_grid();
        let data = InputDataset::new(2, vec![vec![0.1, 0.1]]).unwrap();
        let mut rng = seeded_rng(5);
        let outcome = som_training_step(&grid, &data, 0, &SomParams::default(), &mut rng).unwrap();

        let SomStepOutcome::Trained(step) = outcome else {
            panic!("expected a trained step");
        };
        assert_eq!(grid, two_neuron_grid());
        assert_eq!(step.input_index, 0);
        assert_eq!((step.bmu.i, step.bmu.j), (0, 0));
        assert_eq!(step.parameters.learning_rate, 0.5);
        assert_eq!(step.input(&data), Some(&[0.1, 0.1][..]));
        assert_ne!(step.grid, grid);
    }

    #[test]
    fn test_step_dimension_mismatch() {
        let data = InputDataset::new(3, vec![vec![0.1, 0.1, 0.1]]).unwrap();
        let mut rng = seeded_rng(5);
        let result = som_training_step(&two_neuron_grid(), &data, 0, &SomParams::default(), &mut rng);
        assert!(result.is_err());
    }

    #[test]
    fn test_same_seed_same_step() {
        let mut rng = seeded_rng(1);
        let grid = SomGrid::random(&mut rng, 4, 3).unwrap();
        let data = DatasetKind::Colors.generate(&mut rng);
        let params = SomParams::default();

        let a = som_training_step(&grid, &data, 7, &params, &mut seeded_rng(99)).unwrap();
        let b = som_training_step(&grid, &data, 7, &params, &mut seeded_rng(99)).unwrap();
        assert_eq!(a, b);
    }
}

// ============================================================================
// Trainer Tests
// ============================================================================

mod trainer_tests {
    use super::*;

    #[test]
    fn test_quantization_error_decreases() {
        let mut trainer = SomTrainer::new(&seeded_config(DatasetKind::Iris, 5, 300)).unwrap();
        let before = trainer.quantization_error().unwrap();
        trainer.train_for(1000).unwrap();
        let after = trainer.quantization_error().unwrap();
        assert!(after < before, "{after} !< {before}");
    }

    #[test]
    fn test_finishes_after_cap() {
        let mut trainer = SomTrainer::new(&seeded_config(DatasetKind::Colors, 4, 20)).unwrap();
        let tick = trainer.train_for(100).unwrap();
        assert_eq!(tick.status, TrainerStatus::Finished);
        assert_eq!(trainer.iteration(), 21);

        // Finished trainers ignore start until reset
        trainer.start();
        assert_eq!(trainer.status(), TrainerStatus::Finished);
        trainer.reset().unwrap();
        assert_eq!(trainer.status(), TrainerStatus::Idle);
        assert_eq!(trainer.iteration(), 0);
    }

    #[test]
    fn test_stop_pauses_without_losing_progress() {
        let mut trainer = SomTrainer::new(&seeded_config(DatasetKind::Colors, 4, 100)).unwrap();
        trainer.train_for(5).unwrap();
        trainer.stop();
        let grid = trainer.grid().clone();
        let tick = trainer.tick().unwrap();
        assert_eq!(tick.iteration, 5);
        assert_eq!(tick.bmu, None);
        assert_eq!(trainer.grid(), &grid);
    }

    #[test]
    fn test_switch_dataset_changes_dimensions() {
        let mut trainer = SomTrainer::new(&seeded_config(DatasetKind::Colors, 4, 100)).unwrap();
        trainer.switch_dataset(DatasetKind::Iris).unwrap();
        assert_eq!(trainer.grid().dimensions(), 4);
        assert_eq!(trainer.dataset().dimensions(), 4);
        assert_eq!(trainer.dataset_kind(), DatasetKind::Iris);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut trainer = SomTrainer::new(&seeded_config(DatasetKind::Colors, 4, 100)).unwrap();
        assert!(trainer.set_learning_rate(-0.1).is_err());
        assert!(trainer.set_neighborhood_radius(0.0).is_err());
        assert!(trainer.set_grid_size(0).is_err());
        assert_eq!(trainer.params().learning_rate, 0.5);
    }

    #[test]
    fn test_seeded_trainers_agree() {
        let config = seeded_config(DatasetKind::Clusters2d, 5, 50);
        let mut a = SomTrainer::new(&config).unwrap();
        let mut b = SomTrainer::new(&config).unwrap();
        a.train_for(30).unwrap();
        b.train_for(30).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.last_bmu(), b.last_bmu());
    }
}
