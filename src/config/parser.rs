//! Annotation parser configuration

use serde::Deserialize;

use crate::domain::annotation::{
    Delimiters, ParserLimits, DEFAULT_COMPLETION_MARKER, DEFAULT_RECORD_DELIMITER,
    DEFAULT_TUPLE_DELIMITER,
};

use super::error::ValidationError;

/// Delimiters and size limits for decoding model output
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_record_delimiter")]
    pub record_delimiter: String,

    #[serde(default = "default_tuple_delimiter")]
    pub tuple_delimiter: String,

    #[serde(default = "default_completion_marker")]
    pub completion_marker: String,

    /// Maximum bytes in one record
    #[serde(default = "default_max_tuple_length")]
    pub max_tuple_length: usize,

    /// Maximum bytes of the metadata JSON field
    #[serde(default = "default_max_metadata_bytes")]
    pub max_metadata_bytes: usize,

    /// Metadata entries kept after truncation
    #[serde(default = "default_max_metadata_fields")]
    pub max_metadata_fields: usize,
}

impl ParserConfig {
    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(
            self.record_delimiter.clone(),
            self.tuple_delimiter.clone(),
            self.completion_marker.clone(),
        )
    }

    pub fn limits(&self) -> ParserLimits {
        ParserLimits {
            max_tuple_length: self.max_tuple_length,
            max_metadata_bytes: self.max_metadata_bytes,
            max_metadata_fields: self.max_metadata_fields,
        }
    }

    /// Validate parser configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.record_delimiter.is_empty() {
            return Err(ValidationError::EmptyDelimiter("record_delimiter"));
        }
        if self.tuple_delimiter.is_empty() {
            return Err(ValidationError::EmptyDelimiter("tuple_delimiter"));
        }
        if self.completion_marker.is_empty() {
            return Err(ValidationError::EmptyDelimiter("completion_marker"));
        }
        if self.record_delimiter == self.tuple_delimiter {
            return Err(ValidationError::ConflictingDelimiters);
        }
        if self.max_tuple_length == 0 {
            return Err(ValidationError::ZeroLimit("parser.max_tuple_length"));
        }
        if self.max_metadata_bytes == 0 {
            return Err(ValidationError::ZeroLimit("parser.max_metadata_bytes"));
        }
        if self.max_metadata_fields == 0 {
            return Err(ValidationError::ZeroLimit("parser.max_metadata_fields"));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            record_delimiter: default_record_delimiter(),
            tuple_delimiter: default_tuple_delimiter(),
            completion_marker: default_completion_marker(),
            max_tuple_length: default_max_tuple_length(),
            max_metadata_bytes: default_max_metadata_bytes(),
            max_metadata_fields: default_max_metadata_fields(),
        }
    }
}

fn default_record_delimiter() -> String {
    DEFAULT_RECORD_DELIMITER.to_string()
}

fn default_tuple_delimiter() -> String {
    DEFAULT_TUPLE_DELIMITER.to_string()
}

fn default_completion_marker() -> String {
    DEFAULT_COMPLETION_MARKER.to_string()
}

fn default_max_tuple_length() -> usize {
    ParserLimits::default().max_tuple_length
}

fn default_max_metadata_bytes() -> usize {
    ParserLimits::default().max_metadata_bytes
}

fn default_max_metadata_fields() -> usize {
    ParserLimits::default().max_metadata_fields
}
