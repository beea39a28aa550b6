//! Error types for Registro
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Registro error types
#[derive(Error, Debug)]
pub enum Error {
    /// Requested label column absent from the test CSV (configuration error)
    #[error("Label column '{0}' not found in CSV")]
    LabelColumn(String),

    /// Feature cell that does not parse as a number
    #[error("Row {row}, column '{column}': '{value}' is not a numeric feature")]
    FeatureParse {
        /// 1-based data row index
        row: usize,
        /// Column header
        column: String,
        /// Offending cell content
        value: String,
    },

    /// Model loading or prediction failure
    #[error("Model error: {0}")]
    Model(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
