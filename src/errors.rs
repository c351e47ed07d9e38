/*!
 * Error types for the tosrt application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised when a transcript object does not match the expected schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// The input text is not valid JSON
    #[error("Failed to parse transcript JSON: {0}")]
    Json(String),

    /// A required field is absent
    #[error("Missing required field '{field}' in {location}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
        /// Where the field was expected, e.g. `chunks[3]`
        location: String,
    },

    /// A field is present but has the wrong type or arity
    #[error("Invalid value at {location}: {reason}")]
    InvalidShape {
        /// Path of the offending value
        location: String,
        /// What was expected
        reason: String,
    },

    /// A chunk timestamp was rejected by the timestamp policy
    #[error("Invalid timestamp in chunks[{chunk}]: {reason}")]
    InvalidTimestamp {
        /// Zero-based position of the chunk
        chunk: usize,
        /// Why the timestamp was rejected
        reason: String,
    },
}

impl From<serde_json::Error> for TranscriptError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript validation or conversion
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl AppError {
    /// True when the failure came from the input object rather than the filesystem
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Transcript(_))
    }
}
