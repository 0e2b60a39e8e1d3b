//! Error types for the pareto-select library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum ParetoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Ratio undefined for total {total}: total must be greater than zero")]
    DivisionUndefined { total: f64 },

    #[error("Malformed record at position {position}: {reason}")]
    MalformedRecord { position: usize, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParetoError {
    /// Whether a caller may skip past this error and continue the batch.
    pub fn is_per_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ParetoError>;
