//! Domain error types
//!
//! This module defines the error hierarchy for Veil. Every error that can
//! reach a caller identifies the offending value (category token, span index,
//! file path) so the run can be corrected without guesswork.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the library. CLI commands
/// wrap it in `anyhow` at the outermost layer only.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An explicit category token that is not part of the taxonomy
    #[error("Unknown category '{token}'. Run `veil categories` to list valid categories")]
    UnknownCategory {
        /// The normalized token as supplied by the caller
        token: String,
    },

    /// More than one category selection mode was supplied for a single run
    #[error("Conflicting category selection: only one of {} may be used", .0.join(", "))]
    ConflictingSelection(Vec<String>),

    /// The resolved category set is empty
    #[error("Category selection is empty: at least one category must be active")]
    EmptySelection,

    /// A detected span violates the offset contract
    #[error("Invalid span #{index}: {reason}")]
    InvalidSpan {
        /// Position of the span in the list handed to the redactor
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Detector failures (pattern compilation, unreadable span files)
    #[error("Detection error: {0}")]
    Detection(String),

    /// Document collaborator failures (unknown text unit, unreadable file)
    #[error("Document error: {0}")]
    Document(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl VeilError {
    /// Builds an [`VeilError::InvalidSpan`] for the span at `index`
    pub fn invalid_span(index: usize, reason: impl Into<String>) -> Self {
        VeilError::InvalidSpan {
            index,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by run configuration rather than input data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            VeilError::Configuration(_)
                | VeilError::UnknownCategory { .. }
                | VeilError::ConflictingSelection(_)
                | VeilError::EmptySelection
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VeilError {
    fn from(err: serde_json::Error) -> Self {
        VeilError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
