//! Error types for the validator

use thiserror::Error;

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating a page
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the page failed; the whole run is aborted
    #[error("Evaluation failed: {0}")]
    EvaluationFailure(String),

    /// The page is not one this validator applies to
    #[error("Not an applicable page: {0}")]
    NoApplicablePage(String),

    /// Writing the history list failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export could not be produced or written
    #[error("Export failed: {0}")]
    Export(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A heuristic pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
