//! Error type shared by every engine in the crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        operation: &'static str,
        expected: String,
        found: String,
    },

    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Optimizer state mismatch: expected {expected} state, found {found}")]
    StateMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

impl PlaygroundError {
    pub(crate) fn dimension(
        operation: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        PlaygroundError::DimensionMismatch {
            operation,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Rejects non-finite or non-positive values for parameters that must be > 0.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PlaygroundError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(PlaygroundError::InvalidParameter {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_message() {
        let err = PlaygroundError::dimension("dot", 3, 2);
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in dot: expected 3, found 2"
        );
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("learning_rate", 0.1).is_ok());
        assert!(ensure_positive("learning_rate", 0.0).is_err());
        assert!(ensure_positive("learning_rate", -1.0).is_err());
        assert!(ensure_positive("learning_rate", f64::NAN).is_err());
        assert!(ensure_positive("learning_rate", f64::INFINITY).is_err());
    }
}
