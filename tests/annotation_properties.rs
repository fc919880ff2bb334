//! Property tests for the annotation parser.
//!
//! Decoding is total: arbitrary text never panics, and well-formed payloads
//! keep one tuple per segment.

use proptest::prelude::*;
use serde_json::{Map, Value};

use turn_annotator::domain::annotation::{
    decode, AnnotationParser, Delimiters, ParserLimits, ParsingStatus,
};

fn decode_default(payload: &str) -> turn_annotator::domain::annotation::DecodeOutcome {
    decode(payload, &Delimiters::default(), &ParserLimits::default())
}

fn name() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

fn unit() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

/// One well-formed record of any kind.
fn record() -> impl Strategy<Value = String> {
    prop_oneof![
        (name(), unit(), unit()).prop_map(|(n, c, p)| format!("(intent<||>{n}<||>{c:.3}<||>{p:.3}<||>{{}})")),
        (name(), name(), unit())
            .prop_map(|(t, v, c)| format!("(entity<||>{t}<||>{v}<||>{c:.3}<||>{{}})")),
        (name(), unit(), any::<bool>()).prop_map(|(code, c, primary)| {
            format!("(language<||>{code}<||>{c:.3}<||>{}<||>{{}})", u8::from(primary))
        }),
        (name(), unit()).prop_map(|(l, c)| format!("(sentiment<||>{l}<||>{c:.3}<||>{{}})")),
    ]
}

proptest! {
    #[test]
    fn decode_never_panics(payload in any::<String>()) {
        let outcome = decode_default(&payload);
        prop_assert_eq!(outcome.records.len() + outcome.rejected.len(), outcome.segment_count);
    }

    #[test]
    fn parse_never_panics_on_delimiter_soup(payload in "[()#<|>a-z0-9.{}\" -]{0,200}") {
        let result = AnnotationParser::default().parse(&payload);
        prop_assert!((0.0..=1.0).contains(&result.importance_score));
    }

    #[test]
    fn importance_stays_in_unit_range_for_signed_numbers(
        pairs in prop::collection::vec((-5.0f64..5.0, -1.0e6f64..1.0e6), 1..10),
    ) {
        let payload = pairs
            .iter()
            .enumerate()
            .map(|(n, (c, p))| format!("(intent<||>i{n}<||>{c:.3}<||>{p:.3}<||>{{}})"))
            .collect::<Vec<_>>()
            .join("##");

        let result = AnnotationParser::default().parse(&payload);

        prop_assert_eq!(result.intents.len(), pairs.len());
        prop_assert!((0.0..=1.0).contains(&result.importance_score));
    }

    #[test]
    fn well_formed_payload_keeps_every_segment(records in prop::collection::vec(record(), 1..12)) {
        let payload = format!("{}##<|COMPLETE|>", records.join("##"));

        let outcome = decode_default(&payload);
        prop_assert_eq!(outcome.segment_count, records.len());
        prop_assert_eq!(outcome.records.len(), records.len());

        let result = AnnotationParser::default().parse(&payload);
        prop_assert_eq!(result.raw_record_count, records.len());
        prop_assert_eq!(result.parsing_status, ParsingStatus::Clean);
    }

    #[test]
    fn one_malformed_record_is_isolated(
        records in prop::collection::vec(record(), 1..8),
        position in any::<prop::sample::Index>(),
    ) {
        let mut segments = records.clone();
        let at = position.index(segments.len() + 1);
        segments.insert(at, "(intent<||>only_two_fields)".to_string());
        let payload = segments.join("##");

        let result = AnnotationParser::default().parse(&payload);

        prop_assert_eq!(result.raw_record_count, records.len() + 1);
        prop_assert_eq!(result.parsing_status, ParsingStatus::Partial { dropped: 1 });
    }

    #[test]
    fn oversized_metadata_is_truncated_not_dropped(fields in 51usize..120) {
        let object: Map<String, Value> = (0..fields)
            .map(|i| (format!("k{i:03}"), Value::from(i)))
            .collect();
        let payload = format!(
            "(intent<||>order<||>0.9<||>0.5<||>{})",
            Value::Object(object)
        );
        let limits = ParserLimits {
            max_metadata_bytes: 8192,
            ..ParserLimits::default()
        };

        let result = AnnotationParser::new(Delimiters::default(), limits).parse(&payload);

        prop_assert_eq!(result.intents.len(), 1);
        prop_assert_eq!(result.intents[0].metadata.len(), 50);
        prop_assert!(result.intents[0].metadata.contains_key("k000"));
        prop_assert!(!result.intents[0].metadata.contains_key("k050"));
    }
}

#[test]
fn importance_matches_closed_form() {
    let payload = "(intent<||>a<||>0.9<||>0.8<||>{})##(intent<||>b<||>0.3<||>0.5<||>{})";
    let result = AnnotationParser::default().parse(payload);

    let expected = (0.9 * 0.87 + 0.3 * 0.36) / (0.87 + 0.36);
    assert!((result.importance_score - expected).abs() < 1e-12);
    assert!((result.importance_score - 0.724_390_243_9).abs() < 1e-9);
    assert_eq!(result.primary_intent, "a");
}

#[test]
fn negative_priorities_keep_importance_in_unit_range() {
    let parser = AnnotationParser::default();

    let result = parser.parse("(intent<||>a<||>1<||>-2<||>{})##(intent<||>b<||>0<||>-0.3<||>{})");
    assert_eq!(result.intents[0].priority, 0.0);
    assert!((result.importance_score - 1.0).abs() < 1e-12);

    let result = parser.parse("(intent<||>a<||>0.2<||>5<||>{})##(intent<||>b<||>1<||>-4.9<||>{})");
    let expected = (0.2 * 1.64 + 1.0 * 0.7) / (1.64 + 0.7);
    assert!((result.importance_score - expected).abs() < 1e-12);
}

#[test]
fn explicit_primary_language_beats_confidence() {
    let payload = "(language<||>tha<||>0.85<||>0<||>{})##(language<||>eng<||>0.5<||>1<||>{})";
    let result = AnnotationParser::default().parse(payload);

    assert_eq!(result.primary_language, "eng");
}
