//! Model-related error types

use thiserror::Error;

use stacks_core::data::DataError;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by the computation layer
///
/// Degenerate numerics (zero variance, singular systems) are not errors:
/// they surface as NaN or infinite values in the returned results.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Data-related error
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Fewer observations than the computation needs
    #[error("Not enough data for {operation}: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Computation that was attempted
        operation: &'static str,
        /// Minimum number of observations
        required: usize,
        /// Observations supplied
        actual: usize,
    },

    /// Invalid algorithm parameters
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },
}

impl ModelError {
    /// Create an insufficient data error
    pub fn insufficient(operation: &'static str, required: usize, actual: usize) -> Self {
        ModelError::InsufficientData {
            operation,
            required,
            actual,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ModelError::InvalidConfig {
            message: message.into(),
        }
    }

    /// True when the caller should render "not enough data" rather than an error
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, ModelError::InsufficientData { .. })
    }
}
