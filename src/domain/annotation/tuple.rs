//! Typed projections of validated records.

use serde::{Deserialize, Serialize};

use super::{Metadata, TupleKind};

/// A detected user intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    pub confidence: f64,
    /// Ranking weight supplied by the model.
    pub priority: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A detected entity span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_type: String,
    pub value: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A detected language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Lowercase language identifier, e.g. `eng` or `tha`.
    pub code: String,
    pub confidence: f64,
    pub is_primary: bool,
    #[serde(default)]
    pub metadata: Metadata,
}

/// The overall sentiment of a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// A validated tuple of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTuple {
    Intent(Intent),
    Entity(Entity),
    Language(Language),
    Sentiment(Sentiment),
}

impl ParsedTuple {
    /// The kind this tuple was parsed as.
    pub fn kind(&self) -> TupleKind {
        match self {
            ParsedTuple::Intent(_) => TupleKind::Intent,
            ParsedTuple::Entity(_) => TupleKind::Entity,
            ParsedTuple::Language(_) => TupleKind::Language,
            ParsedTuple::Sentiment(_) => TupleKind::Sentiment,
        }
    }

    /// Name field: intent name, entity type, language code or sentiment label.
    pub fn name(&self) -> &str {
        match self {
            ParsedTuple::Intent(i) => &i.name,
            ParsedTuple::Entity(e) => &e.entity_type,
            ParsedTuple::Language(l) => &l.code,
            ParsedTuple::Sentiment(s) => &s.label,
        }
    }

    /// Model confidence in [0, 1].
    pub fn confidence(&self) -> f64 {
        match self {
            ParsedTuple::Intent(i) => i.confidence,
            ParsedTuple::Entity(e) => e.confidence,
            ParsedTuple::Language(l) => l.confidence,
            ParsedTuple::Sentiment(s) => s.confidence,
        }
    }

    /// Decoded metadata, empty when absent or malformed.
    pub fn metadata(&self) -> &Metadata {
        match self {
            ParsedTuple::Intent(i) => &i.metadata,
            ParsedTuple::Entity(e) => &e.metadata,
            ParsedTuple::Language(l) => &l.metadata,
            ParsedTuple::Sentiment(s) => &s.metadata,
        }
    }
}
