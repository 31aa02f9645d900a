//! Core data structures for Stacks
//!
//! A [`Dataset`] is an ordered sequence of flat [`Record`]s as delivered by the
//! catalogue API or an in-memory fixture. Computations never consume records
//! directly; they consume one of the projections defined here:
//! a [`FieldVector`] for single-field statistics, [`Points`] for geometric
//! algorithms, [`Observation`]s for regression and a [`TimeSeries`] for
//! forecasting.

mod builder;
mod dataset;
mod field;
mod points;
mod record;
mod series;
mod value;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::DatasetBuilder;
pub use dataset::Dataset;
pub use field::FieldVector;
pub use points::{FieldBounds, Observation, Points};
pub use record::Record;
pub use series::TimeSeries;
pub use value::Value;

// Type aliases for common use cases
pub type FloatArray = ndarray::Array1<f64>;
pub type Matrix = ndarray::Array2<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Field '{field}' not found. Available fields: {available:?}")]
    FieldNotFound {
        field: String,
        available: Vec<String>,
    },

    #[error("Field '{field}' holds non-numeric value {value} at row {row}")]
    NonNumericData {
        field: String,
        row: usize,
        value: String,
    },

    #[error("Missing value for field '{field}' at row {row}")]
    MissingData { field: String, row: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DataError {
    /// Create a field not found error
    pub fn field_not_found(field: &str, available: &[&str]) -> Self {
        DataError::FieldNotFound {
            field: field.to_string(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
