use crate::data::DataError;

#[derive(thiserror::Error, Debug)]
pub enum StacksError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration, import and export
pub type Result<T> = std::result::Result<T, StacksError>;
