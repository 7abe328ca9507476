//! Centralized error types for the insight core.

use thiserror::Error;

/// Main error type for insight core operations.
///
/// Scoring never produces one of these: classifier and generator failures
/// collapse into fallback results. Errors are reserved for rejecting bad input
/// before any scoring runs and for configuration problems.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Invalid state transition: cannot move from '{from}' to '{to}'")]
    InvalidStateTransition { from: String, to: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),
}

/// Result type for insight core operations.
pub type ExtractorResult<T> = Result<T, ExtractorError>;

impl ExtractorError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an unknown-variant error for an enum parsed from text.
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
