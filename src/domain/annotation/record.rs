//! Decoded records: one tuple line split into raw fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The four kinds of observation a model may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TupleKind {
    Intent,
    Entity,
    Language,
    Sentiment,
}

impl TupleKind {
    /// The literal used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TupleKind::Intent => "intent",
            TupleKind::Entity => "entity",
            TupleKind::Language => "language",
            TupleKind::Sentiment => "sentiment",
        }
    }

    /// Index of the optional trailing metadata field.
    pub fn metadata_index(&self) -> usize {
        match self {
            TupleKind::Sentiment => 3,
            TupleKind::Intent | TupleKind::Entity | TupleKind::Language => 4,
        }
    }
}

impl fmt::Display for TupleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TupleKind {
    type Err = ValidationError;

    /// Kind literals are matched case-insensitively; models are inconsistent
    /// about capitalisation even when the prompt is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intent" => Ok(TupleKind::Intent),
            "entity" => Ok(TupleKind::Entity),
            "language" => Ok(TupleKind::Language),
            "sentiment" => Ok(TupleKind::Sentiment),
            _ => Err(ValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// One structurally valid tuple, still untyped.
///
/// `fields` holds every delimiter-separated field including the kind and
/// name, trimmed. `raw_text` is the segment as it appeared in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub kind: TupleKind,
    pub fields: Vec<String>,
    pub raw_text: String,
}

impl Record {
    /// The name field (second position).
    pub fn name(&self) -> &str {
        self.fields.get(1).map(String::as_str).unwrap_or_default()
    }

    /// Field at `index`, counted from the first field after kind and name.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index + 2).map(String::as_str)
    }

    /// The optional trailing metadata field for this record's kind.
    pub fn metadata_field(&self) -> Option<&str> {
        self.fields
            .get(self.kind.metadata_index())
            .map(String::as_str)
    }
}
