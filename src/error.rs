//! Error types for the DLM component framework

use thiserror::Error;

/// Result type alias for component operations
pub type Result<T> = std::result::Result<T, ComponentError>;

/// Main error type for DLM regression components
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Empty feature matrix: {0}")]
    EmptyMatrix(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },
}

impl From<ndarray::ShapeError> for ComponentError {
    fn from(err: ndarray::ShapeError) -> Self {
        ComponentError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}
