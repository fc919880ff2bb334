//! Error types for tuple decoding and validation.

use thiserror::Error;

/// Structural reasons a record is rejected.
///
/// Record-local: the decoder logs the reason and drops the record, the rest
/// of the payload is still processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("tuple text is empty")]
    Empty,

    #[error("tuple text too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("tuple text contains invalid character encoding at char {position}")]
    InvalidEncoding { position: usize },

    #[error("tuple has {actual} fields, at least {min} required")]
    TooFewFields { min: usize, actual: usize },

    #[error("field {index} contains invalid character encoding")]
    InvalidFieldEncoding { index: usize },

    #[error("unknown tuple kind: {0}")]
    UnknownKind(String),

    #[error("tuple name is empty")]
    EmptyName,

    #[error("{kind} tuple is missing required field '{field}'")]
    MissingField { kind: &'static str, field: &'static str },
}

/// Reasons a metadata field is discarded.
///
/// Field-local: the record is kept with empty metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("metadata is empty")]
    Empty,

    #[error("metadata too large: {actual} bytes exceeds maximum of {max} bytes")]
    TooLarge { max: usize, actual: usize },

    #[error("metadata is not a JSON object literal")]
    NotAnObject,

    #[error("metadata JSON parse error: {0}")]
    ParseError(String),
}
