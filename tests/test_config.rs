//! Tests for configuration loading
//!
//! This file tests the config module including:
//! - Loading the bundled JSON config files
//! - Defaults for missing sections and fields
//! - Handling missing files and invalid JSON
//! - Range validation of loaded values

use neural_playground::config::{load_config, load_or_default, PlaygroundConfig, MAX_GRID_SIZE};
use neural_playground::optimizers::{LossSurface, OptimizerKind};
use neural_playground::som::DatasetKind;
use neural_playground::PlaygroundError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// Bundled Config Tests
// ============================================================================

mod bundled_config_tests {
    use super::*;

    #[test]
    fn test_default_config_matches_defaults() {
        let config = load_config("config/default.json").expect("Failed to load default config");
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn test_rosenbrock_adam_config() {
        let config = load_config("config/rosenbrock_adam.json").unwrap();
        let gd = &config.gradient_descent;
        assert_eq!(gd.optimizer, OptimizerKind::Adam);
        assert_eq!(gd.surface, LossSurface::Rosenbrock);
        assert_eq!(gd.start, [-1.5, 2.0]);
        // Omitted field keeps its default
        assert_eq!(gd.loss_threshold, 0.001);
        assert_eq!(config.som, PlaygroundConfig::default().som);
    }

    #[test]
    fn test_som_iris_config() {
        let config = load_config("config/som_iris.json").unwrap();
        assert_eq!(config.som.dataset, DatasetKind::Iris);
        assert_eq!(config.som.grid_size, 12);
        assert_eq!(config.som.seed, Some(42));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(load_or_default(None).unwrap(), PlaygroundConfig::default());
    }
}

// ============================================================================
// Parsing Tests
// ============================================================================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_empty_object() {
        let file = write_config("{}");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn test_enum_names() {
        let file = write_config(
            r#"{
  "gradient_descent": {"optimizer": "rmsprop", "surface": "himmelblau"},
  "som": {"dataset": "clusters2d"}
}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.gradient_descent.optimizer, OptimizerKind::RmsProp);
        assert_eq!(config.gradient_descent.surface, LossSurface::Himmelblau);
        assert_eq!(config.som.dataset, DatasetKind::Clusters2d);
    }

    #[test]
    fn test_config_clone_and_debug() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.clone(), config);
        assert!(format!("{:?}", config).contains("gradient_descent"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = load_config("nonexistent_config.json");
        assert!(matches!(result, Err(PlaygroundError::Io(_))));
    }

    #[test]
    fn test_invalid_json_syntax() {
        let file = write_config(
            r#"{
  "som": {"grid_size": 10
"#,
        );
        assert!(matches!(load_config(file.path()), Err(PlaygroundError::Json(_))));
    }

    #[test]
    fn test_unknown_optimizer() {
        let file = write_config(r#"{"gradient_descent": {"optimizer": "lbfgs"}}"#);
        assert!(matches!(load_config(file.path()), Err(PlaygroundError::Json(_))));
    }

    #[test]
    fn test_wrong_field_type() {
        let file = write_config(r#"{"kmeans": {"clusters": "four"}}"#);
        assert!(matches!(load_config(file.path()), Err(PlaygroundError::Json(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = write_config("");
        assert!(load_config(file.path()).is_err());
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    fn rejected(contents: &str) -> String {
        let file = write_config(contents);
        match load_config(file.path()) {
            Err(PlaygroundError::Config(message)) => message,
            other => panic!("expected a Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_learning_rate() {
        let message = rejected(r#"{"gradient_descent": {"learning_rate": 0.0}}"#);
        assert!(message.contains("gradient_descent.learning_rate"));
    }

    #[test]
    fn test_grid_size_bounds() {
        assert!(rejected(r#"{"som": {"grid_size": 0}}"#).contains("som.grid_size"));
        let too_big = format!(r#"{{"som": {{"grid_size": {}}}}}"#, MAX_GRID_SIZE + 1);
        assert!(rejected(&too_big).contains("at most"));
    }

    #[test]
    fn test_zero_history() {
        assert!(rejected(r#"{"training": {"history_len": 0}}"#).contains("training.history_len"));
    }

    #[test]
    fn test_negative_huber_delta() {
        assert!(rejected(r#"{"activation": {"huber_delta": -1.0}}"#).contains("huber_delta"));
    }
}
