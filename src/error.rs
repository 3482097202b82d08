//! Error types for the iris-knn pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, KnnError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum KnnError {
    #[error("invalid test fraction: {value} (must be strictly between 0 and 1)")]
    InvalidFraction { value: f64 },

    #[error("{subject} has {count} samples, needs at least {needed}")]
    InsufficientSamples {
        subject: String,
        count: usize,
        needed: usize,
    },

    #[error("invalid k: {k} (must be in 1..={n_train})")]
    InvalidK { k: usize, n_train: usize },

    #[error("model not fitted")]
    NotFitted,

    #[error("invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("data error: {0}")]
    Data(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
