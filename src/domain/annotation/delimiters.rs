//! Wire delimiters shared with the prompt.

use serde::{Deserialize, Serialize};

/// Default separator between tuples.
pub const DEFAULT_RECORD_DELIMITER: &str = "##";
/// Default separator between fields within a tuple.
pub const DEFAULT_TUPLE_DELIMITER: &str = "<||>";
/// Default end-of-payload sentinel.
pub const DEFAULT_COMPLETION_MARKER: &str = "<|COMPLETE|>";

/// Delimiter set used to split a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub record: String,
    pub tuple: String,
    pub completion_marker: String,
}

impl Delimiters {
    /// Creates a custom delimiter set.
    pub fn new(
        record: impl Into<String>,
        tuple: impl Into<String>,
        completion_marker: impl Into<String>,
    ) -> Self {
        Self {
            record: record.into(),
            tuple: tuple.into(),
            completion_marker: completion_marker.into(),
        }
    }

    /// Delimiters to actually split `payload` with.
    ///
    /// Models sometimes ignore the delimiters requested in the prompt and
    /// emit the defaults they were trained on, so each configured delimiter
    /// absent from the payload is replaced by its default literal.
    pub fn effective_for(&self, payload: &str) -> Delimiters {
        let pick = |configured: &str, default: &str| {
            if !configured.is_empty() && payload.contains(configured) {
                configured.to_string()
            } else {
                default.to_string()
            }
        };

        Delimiters {
            record: pick(&self.record, DEFAULT_RECORD_DELIMITER),
            tuple: pick(&self.tuple, DEFAULT_TUPLE_DELIMITER),
            completion_marker: pick(&self.completion_marker, DEFAULT_COMPLETION_MARKER),
        }
    }

    /// Whether `segment` is a completion marker (configured or default).
    pub fn is_completion_marker(&self, segment: &str) -> bool {
        segment == self.completion_marker || segment == DEFAULT_COMPLETION_MARKER
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(
            DEFAULT_RECORD_DELIMITER,
            DEFAULT_TUPLE_DELIMITER,
            DEFAULT_COMPLETION_MARKER,
        )
    }
}
