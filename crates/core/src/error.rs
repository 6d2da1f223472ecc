//! Error types for promptdeck.
//!
//! This module defines the unified error enum covering every failure the
//! resolver can surface: invalid input, prompt lookup misses, missing
//! template variables, upstream store failures, and configuration errors.

use thiserror::Error;

/// Unified error type for promptdeck.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Errors are propagated, never swallowed or retried here; retries belong
/// to the caller or to the store service itself.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed caller input (empty prompt name, empty label, bad --var)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No prompt matches the requested name/label pair
    #[error("Prompt not found: '{name}' with label '{label}'")]
    NotFound { name: String, label: String },

    /// The template declares placeholders the caller did not supply
    #[error("Missing variables for prompt '{}': {}", .name, .missing.join(", "))]
    MissingVariables { name: String, missing: Vec<String> },

    /// The prompt store could not be reached or rejected the call
    #[error("Prompt store unavailable: {0}")]
    Upstream(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template compilation errors
    #[error("Template error: {0}")]
    Template(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
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
