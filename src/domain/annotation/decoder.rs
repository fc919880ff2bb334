//! Tuple decoder: payload text to structurally valid records.

use tracing::{debug, warn};

use super::{check_structure, Delimiters, ParserLimits, Record, ValidationError};

/// A segment dropped during decoding, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub raw_text: String,
    pub reason: ValidationError,
}

/// Result of decoding one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Records that passed every structural check, in payload order.
    pub records: Vec<Record>,
    /// Segments dropped with the reason they were dropped.
    pub rejected: Vec<RejectedRecord>,
    /// Non-empty, non-marker segments seen.
    pub segment_count: usize,
}

/// Splits a payload into records.
///
/// Segments are separated by the record delimiter, trimmed, and dropped when
/// empty or equal to the completion marker. A single enclosing parenthesis
/// pair is stripped before the fields are split. Segments failing a
/// structural check are logged and dropped; decoding never aborts.
pub fn decode(payload: &str, delimiters: &Delimiters, limits: &ParserLimits) -> DecodeOutcome {
    let effective = delimiters.effective_for(payload);
    if effective != *delimiters {
        debug!(
            record = %effective.record,
            tuple = %effective.tuple,
            "Configured delimiters absent from payload, using defaults"
        );
    }

    let mut outcome = DecodeOutcome::default();

    for segment in payload.split(effective.record.as_str()) {
        let segment = strip_completion_marker(segment.trim(), &effective);
        if segment.is_empty() || effective.is_completion_marker(segment) {
            continue;
        }
        outcome.segment_count += 1;

        let body = strip_parentheses(segment);
        match check_structure(body, &effective.tuple, limits) {
            Ok(record) => outcome.records.push(record),
            Err(reason) => {
                warn!(%reason, record = %segment, "Dropping malformed tuple");
                outcome.rejected.push(RejectedRecord {
                    raw_text: segment.to_string(),
                    reason,
                });
            }
        }
    }

    outcome
}

/// Removes a completion marker glued to the end of the final segment.
fn strip_completion_marker<'a>(segment: &'a str, delimiters: &Delimiters) -> &'a str {
    if delimiters.is_completion_marker(segment) {
        return segment;
    }
    [
        delimiters.completion_marker.as_str(),
        super::DEFAULT_COMPLETION_MARKER,
    ]
    .iter()
    .filter(|marker| !marker.is_empty())
    .find_map(|marker| segment.strip_suffix(marker))
    .map(str::trim_end)
    .unwrap_or(segment)
}

/// Strips one enclosing `(` `)` pair, if both are present.
fn strip_parentheses(segment: &str) -> &str {
    segment
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(segment)
}
