//! Bounded decoding of the optional trailing metadata field.

use std::collections::BTreeMap;

use super::{MetadataError, ParserLimits};

/// Decoded metadata, ordered by key.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Decodes a metadata field into at most `limits.max_metadata_fields` entries.
///
/// The field must be a JSON object literal no larger than
/// `limits.max_metadata_bytes`. Objects with more entries than allowed are
/// truncated, keeping the lexicographically smallest keys so the retained
/// subset does not depend on the order the model emitted them in.
pub fn decode_metadata(raw: &str, limits: &ParserLimits) -> Result<Metadata, MetadataError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MetadataError::Empty);
    }
    if trimmed.len() > limits.max_metadata_bytes {
        return Err(MetadataError::TooLarge {
            max: limits.max_metadata_bytes,
            actual: trimmed.len(),
        });
    }
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return Err(MetadataError::NotAnObject);
    }

    let value: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| MetadataError::ParseError(e.to_string()))?;

    let serde_json::Value::Object(object) = value else {
        return Err(MetadataError::NotAnObject);
    };

    let sorted: Metadata = object.into_iter().collect();
    if sorted.len() > limits.max_metadata_fields {
        tracing::warn!(
            fields = sorted.len(),
            max = limits.max_metadata_fields,
            "Truncating metadata to first fields by key order"
        );
        return Ok(sorted
            .into_iter()
            .take(limits.max_metadata_fields)
            .collect());
    }

    Ok(sorted)
}
