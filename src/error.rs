//! Custom error types for periodbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Reasons a transfer code was rejected on import
///
/// Each variant maps to a distinct message the user can act on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportError {
    /// Input has the length of a reference code, which cannot be decoded
    #[error("This looks like a reference code. Scan the QR code or ask the sender for the full transfer code.")]
    NeedsFullCode,

    /// Input is not valid base64, or does not decode to JSON text
    #[error("Invalid transfer code. Please check it and try again.")]
    InvalidEncoding,

    /// Input decodes to JSON that does not describe an expense dataset
    #[error("Invalid transfer code format: no expense list found.")]
    InvalidStructure,
}

/// The main error type for periodbook operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Transfer code import errors
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for periodbook operations
pub type TrackerResult<T> = Result<T, TrackerError>;
