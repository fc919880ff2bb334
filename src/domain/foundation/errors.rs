//! Error types for value object construction.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValueError {
    /// Creates an empty field error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValueError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValueError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
