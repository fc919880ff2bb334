//! Parsing facade: payload text in, structured result out.

use tracing::{debug, warn};

use super::{assemble, decode, validate, Delimiters, ParserLimits, StructuredResult};

/// Parses model payloads with a fixed delimiter set and limits.
///
/// Constructed once and shared; parsing is pure and never fails.
#[derive(Debug, Clone, Default)]
pub struct AnnotationParser {
    delimiters: Delimiters,
    limits: ParserLimits,
}

impl AnnotationParser {
    /// Creates a parser with the given delimiters and limits.
    pub fn new(delimiters: Delimiters, limits: ParserLimits) -> Self {
        Self { delimiters, limits }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn limits(&self) -> &ParserLimits {
        &self.limits
    }

    /// Decodes, validates and assembles one payload.
    pub fn parse(&self, payload: &str) -> StructuredResult {
        let outcome = decode(payload, &self.delimiters, &self.limits);
        let mut dropped = outcome.rejected.len();

        let mut tuples = Vec::with_capacity(outcome.records.len());
        for record in &outcome.records {
            match validate(record, &self.limits) {
                Ok(tuple) => tuples.push(tuple),
                Err(reason) => {
                    warn!(%reason, record = %record.raw_text, "Dropping invalid tuple");
                    dropped += 1;
                }
            }
        }

        let result = assemble(tuples, dropped, outcome.segment_count);
        debug!(
            segments = result.raw_record_count,
            kept = result.tuple_count(),
            dropped,
            primary_intent = %result.primary_intent,
            importance = result.importance_score,
            "Parsed model payload"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::ParsingStatus;

    const PAYLOAD: &str = concat!(
        "(intent<||>track_order<||>0.9<||>0.8<||>{\"order_ref\": \"A-1029\"})##\n",
        "(intent<||>complain<||>0.3<||>0.5)##\n",
        "(entity<||>order_id<||>A-1029<||>0.95<||>{})##\n",
        "(language<||>tha<||>0.85<||>0)##\n",
        "(language<||>eng<||>0.5<||>1)##\n",
        "(sentiment<||>negative<||>0.7<||>{\"cause\": \"delay\"})##\n",
        "<|COMPLETE|>"
    );

    #[test]
    fn parses_full_payload() {
        let result = AnnotationParser::default().parse(PAYLOAD);

        assert_eq!(result.parsing_status, ParsingStatus::Clean);
        assert_eq!(result.raw_record_count, 6);
        assert_eq!(result.tuple_count(), 6);
        assert_eq!(result.primary_intent, "track_order");
        assert_eq!(result.primary_language, "eng");
        assert_eq!(result.entities[0].value, "A-1029");
        assert_eq!(result.sentiment.as_ref().unwrap().label, "negative");
        assert!((result.importance_score - 0.724_390_243_9).abs() < 1e-9);
    }

    #[test]
    fn malformed_record_is_isolated() {
        let payload = PAYLOAD.replace(
            "(intent<||>complain<||>0.3<||>0.5)",
            "(intent<||>complain)",
        );
        let result = AnnotationParser::default().parse(&payload);

        assert_eq!(result.parsing_status, ParsingStatus::Partial { dropped: 1 });
        assert_eq!(result.raw_record_count, 6);
        assert_eq!(result.tuple_count(), 5);
        assert_eq!(result.intents.len(), 1);
    }

    #[test]
    fn unstructured_reply_yields_empty_result() {
        let result = AnnotationParser::default().parse("Sure! Here is my analysis: the user is happy.");

        assert_eq!(result.tuple_count(), 0);
        assert_eq!(result.primary_intent, "");
        assert_eq!(result.importance_score, 0.0);
        assert!(!result.parsing_status.is_clean());
    }
}
