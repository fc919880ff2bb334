//! Record validators.
//!
//! [`check_structure`] applies the structural checks that decide whether a
//! segment becomes a [`Record`] at all. [`validate`] types a record per kind.
//! Numbers that fail to parse and metadata that fails to decode degrade to
//! zero / empty with a warning; they never reject the record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    decode_metadata, Entity, Intent, Language, Metadata, ParsedTuple, Record, Sentiment,
    TupleKind, ValidationError,
};

/// Minimum number of delimiter-separated fields in any tuple.
pub const MIN_FIELDS: usize = 4;

/// Size bounds applied while validating model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserLimits {
    /// Maximum tuple text length in bytes.
    pub max_tuple_length: usize,
    /// Maximum metadata field length in bytes.
    pub max_metadata_bytes: usize,
    /// Maximum number of decoded metadata entries kept.
    pub max_metadata_fields: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_tuple_length: 2048,
            max_metadata_bytes: 4096,
            max_metadata_fields: 50,
        }
    }
}

/// Runs the structural checks on one segment and splits it into a record.
///
/// `text` is the segment after trimming and parenthesis stripping. Checks
/// run in a fixed order and the first failure is returned.
pub fn check_structure(
    text: &str,
    tuple_delimiter: &str,
    limits: &ParserLimits,
) -> Result<Record, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.len() > limits.max_tuple_length {
        return Err(ValidationError::TooLong {
            max: limits.max_tuple_length,
            actual: text.len(),
        });
    }
    if let Some(position) = text.chars().position(is_invalid_char) {
        return Err(ValidationError::InvalidEncoding { position });
    }

    let fields: Vec<String> = text
        .split(tuple_delimiter)
        .map(|f| f.trim().to_string())
        .collect();
    if fields.len() < MIN_FIELDS {
        return Err(ValidationError::TooFewFields {
            min: MIN_FIELDS,
            actual: fields.len(),
        });
    }
    if let Some(index) = fields
        .iter()
        .position(|f| f.chars().any(|c| c.is_control() && c != '\t'))
    {
        return Err(ValidationError::InvalidFieldEncoding { index });
    }

    let kind: TupleKind = fields[0].parse()?;
    if fields[1].is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(Record {
        kind,
        fields,
        raw_text: text.to_string(),
    })
}

/// Types a structurally valid record according to its kind.
pub fn validate(record: &Record, limits: &ParserLimits) -> Result<ParsedTuple, ValidationError> {
    if record.name().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let metadata = record_metadata(record, limits);

    let tuple = match record.kind {
        TupleKind::Intent => ParsedTuple::Intent(Intent {
            name: record.name().to_string(),
            confidence: confidence(required(record, 0, "confidence")?, record),
            priority: priority(required(record, 1, "priority")?, record),
            metadata,
        }),
        TupleKind::Entity => ParsedTuple::Entity(Entity {
            entity_type: record.name().to_string(),
            value: required(record, 0, "value")?.to_string(),
            confidence: confidence(required(record, 1, "confidence")?, record),
            metadata,
        }),
        TupleKind::Language => ParsedTuple::Language(Language {
            code: record.name().trim().to_lowercase(),
            confidence: confidence(required(record, 0, "confidence")?, record),
            is_primary: required(record, 1, "primary")? == "1",
            metadata,
        }),
        TupleKind::Sentiment => ParsedTuple::Sentiment(Sentiment {
            label: record.name().to_string(),
            confidence: confidence(required(record, 0, "confidence")?, record),
            metadata,
        }),
    };

    Ok(tuple)
}

/// Replacement characters come from lossy decoding upstream; NUL never
/// appears in legitimate model text.
fn is_invalid_char(c: char) -> bool {
    c == char::REPLACEMENT_CHARACTER || c == '\0'
}

fn required<'a>(
    record: &'a Record,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    record.field(index).ok_or(ValidationError::MissingField {
        kind: record.kind.as_str(),
        field,
    })
}

/// Parses a finite float, defaulting to zero.
fn number(raw: &str, field: &'static str, record: &Record) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(
                field,
                value = raw,
                record = %record.raw_text,
                "Unparseable number in tuple, defaulting to 0"
            );
            0.0
        }
    }
}

/// Parses a confidence and clamps it into [0, 1].
fn confidence(raw: &str, record: &Record) -> f64 {
    let value = number(raw, "confidence", record);
    if !(0.0..=1.0).contains(&value) {
        warn!(
            value,
            record = %record.raw_text,
            "Confidence outside [0, 1], clamping"
        );
        return value.clamp(0.0, 1.0);
    }
    value
}

/// Parses a priority and raises negatives to zero.
fn priority(raw: &str, record: &Record) -> f64 {
    let value = number(raw, "priority", record);
    if value < 0.0 {
        warn!(
            value,
            record = %record.raw_text,
            "Negative priority, clamping to 0"
        );
        return 0.0;
    }
    value
}

fn record_metadata(record: &Record, limits: &ParserLimits) -> Metadata {
    let Some(raw) = record.metadata_field() else {
        return Metadata::new();
    };

    decode_metadata(raw, limits).unwrap_or_else(|err| {
        warn!(
            reason = %err,
            record = %record.raw_text,
            "Discarding tuple metadata"
        );
        Metadata::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DELIM: &str = "<||>";

    fn parse(text: &str) -> Result<ParsedTuple, ValidationError> {
        let limits = ParserLimits::default();
        let record = check_structure(text, DELIM, &limits)?;
        validate(&record, &limits)
    }

    mod structure {
        use super::*;

        #[test]
        fn rejects_empty_text() {
            let result = check_structure("  ", DELIM, &ParserLimits::default());
            assert_eq!(result, Err(ValidationError::Empty));
        }

        #[test]
        fn rejects_text_over_max_length() {
            let limits = ParserLimits {
                max_tuple_length: 32,
                ..ParserLimits::default()
            };
            let text = format!("intent<||>{}<||>0.9<||>0.5", "x".repeat(40));
            assert!(matches!(
                check_structure(&text, DELIM, &limits),
                Err(ValidationError::TooLong { max: 32, .. })
            ));
        }

        #[test]
        fn rejects_replacement_characters() {
            let text = "intent<||>gr\u{FFFD}et<||>0.9<||>0.5";
            assert!(matches!(
                check_structure(text, DELIM, &ParserLimits::default()),
                Err(ValidationError::InvalidEncoding { position: 12 })
            ));
        }

        #[test]
        fn rejects_too_few_fields() {
            let result = check_structure("intent<||>greet<||>0.9", DELIM, &ParserLimits::default());
            assert_eq!(
                result,
                Err(ValidationError::TooFewFields { min: 4, actual: 3 })
            );
        }

        #[test]
        fn rejects_control_characters_in_fields() {
            let text = "entity<||>city<||>Bang\u{7}kok<||>0.9";
            assert_eq!(
                check_structure(text, DELIM, &ParserLimits::default()),
                Err(ValidationError::InvalidFieldEncoding { index: 2 })
            );
        }

        #[test]
        fn rejects_unknown_kind() {
            let result = check_structure("emotion<||>joy<||>0.9<||>{}", DELIM, &ParserLimits::default());
            assert!(matches!(result, Err(ValidationError::UnknownKind(_))));
        }

        #[test]
        fn rejects_empty_name() {
            let result = check_structure("intent<||> <||>0.9<||>0.5", DELIM, &ParserLimits::default());
            assert_eq!(result, Err(ValidationError::EmptyName));
        }

        #[test]
        fn trims_fields() {
            let record =
                check_structure(" intent <||> greet <||> 0.9 <||> 0.5 ", DELIM, &ParserLimits::default())
                    .unwrap();
            assert_eq!(record.fields, vec!["intent", "greet", "0.9", "0.5"]);
        }
    }

    mod per_kind {
        use super::*;

        #[test]
        fn parses_intent() {
            let tuple = parse(r#"intent<||>book_flight<||>0.92<||>0.8<||>{"channel": "line"}"#).unwrap();
            let ParsedTuple::Intent(intent) = tuple else {
                panic!("expected intent");
            };
            assert_eq!(intent.name, "book_flight");
            assert_eq!(intent.confidence, 0.92);
            assert_eq!(intent.priority, 0.8);
            assert_eq!(intent.metadata["channel"], json!("line"));
        }

        #[test]
        fn parses_entity_value_verbatim() {
            let tuple = parse("entity<||>city<||>New York<||>0.75").unwrap();
            let ParsedTuple::Entity(entity) = tuple else {
                panic!("expected entity");
            };
            assert_eq!(entity.entity_type, "city");
            assert_eq!(entity.value, "New York");
            assert_eq!(entity.confidence, 0.75);
            assert!(entity.metadata.is_empty());
        }

        #[test]
        fn parses_language_primary_flag() {
            let ParsedTuple::Language(primary) = parse("language<||>ENG<||>0.5<||>1").unwrap() else {
                panic!("expected language");
            };
            assert_eq!(primary.code, "eng");
            assert!(primary.is_primary);

            let ParsedTuple::Language(secondary) = parse("language<||>tha<||>0.85<||>true").unwrap()
            else {
                panic!("expected language");
            };
            assert!(!secondary.is_primary);
        }

        #[test]
        fn parses_sentiment_with_metadata() {
            let ParsedTuple::Sentiment(sentiment) =
                parse(r#"sentiment<||>negative<||>0.66<||>{"reason": "late delivery"}"#).unwrap()
            else {
                panic!("expected sentiment");
            };
            assert_eq!(sentiment.label, "negative");
            assert_eq!(sentiment.confidence, 0.66);
            assert_eq!(sentiment.metadata.len(), 1);
        }
    }

    mod soft_errors {
        use super::*;

        #[test]
        fn unparseable_numbers_default_to_zero() {
            let ParsedTuple::Intent(intent) = parse("intent<||>greet<||>high<||>n/a").unwrap() else {
                panic!("expected intent");
            };
            assert_eq!(intent.confidence, 0.0);
            assert_eq!(intent.priority, 0.0);
        }

        #[test]
        fn non_finite_numbers_default_to_zero() {
            let ParsedTuple::Intent(intent) = parse("intent<||>greet<||>NaN<||>inf").unwrap() else {
                panic!("expected intent");
            };
            assert_eq!(intent.confidence, 0.0);
            assert_eq!(intent.priority, 0.0);
        }

        #[test]
        fn out_of_range_confidence_is_clamped() {
            let ParsedTuple::Intent(intent) = parse("intent<||>greet<||>1.7<||>3.5").unwrap() else {
                panic!("expected intent");
            };
            assert_eq!(intent.confidence, 1.0);
            assert_eq!(intent.priority, 3.5);
        }

        #[test]
        fn negative_priority_is_raised_to_zero() {
            let ParsedTuple::Intent(intent) = parse("intent<||>greet<||>0.4<||>-2.5").unwrap() else {
                panic!("expected intent");
            };
            assert_eq!(intent.confidence, 0.4);
            assert_eq!(intent.priority, 0.0);
        }

        #[test]
        fn malformed_metadata_keeps_record() {
            let ParsedTuple::Entity(entity) = parse("entity<||>city<||>Paris<||>0.9<||>{oops").unwrap()
            else {
                panic!("expected entity");
            };
            assert_eq!(entity.value, "Paris");
            assert!(entity.metadata.is_empty());
        }

        #[test]
        fn empty_metadata_field_keeps_record() {
            let tuple = parse("entity<||>city<||>Paris<||>0.9<||>").unwrap();
            assert!(tuple.metadata().is_empty());
        }
    }

    #[test]
    fn hand_built_record_missing_fields_is_rejected() {
        let record = Record {
            kind: TupleKind::Intent,
            fields: vec!["intent".into(), "greet".into(), "0.9".into()],
            raw_text: "intent<||>greet<||>0.9".into(),
        };
        assert_eq!(
            validate(&record, &ParserLimits::default()),
            Err(ValidationError::MissingField {
                kind: "intent",
                field: "priority"
            })
        );
    }
}
