//! Error types for the Guichet pipeline.
//!
//! This module defines a unified error enum that covers all error categories
//! in the workspace: configuration, I/O, the generation backend, translation,
//! the document store and the pipeline itself.

use thiserror::Error;

/// Unified error type for the Guichet pipeline.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Errors are represented and propagated rather than panicked on; the
/// fail-open components (translation, generation, orchestration) absorb
/// them into degraded-but-valid values at their boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation backend errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Translation resource errors
    #[error("Translation error: {0}")]
    Translation(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(String),

    /// Pipeline orchestration errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
