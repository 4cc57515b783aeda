//! Error types for table preprocessing.

use polars::prelude::PolarsError;

/// Result type for preprocessing operations
pub type PrepResult<T> = Result<T, PrepError>;

/// Error type for preprocessing operations
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' is not a text column (found {dtype})")]
    NonTextColumn { column: String, dtype: String },

    #[error("Null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Column '{column}' cannot be read as {dtype}: {reason}")]
    InvalidCast {
        column: String,
        dtype: String,
        reason: String,
    },

    #[error("Invalid value in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("Data validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
