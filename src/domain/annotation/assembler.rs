//! Response assembler: validated tuples to one structured result.

use serde::{Deserialize, Serialize};

use super::{Entity, Intent, Language, ParsedTuple, Sentiment};
use crate::domain::foundation::{Timestamp, TurnId};

/// Weight of confidence in an intent's importance weight.
const CONFIDENCE_WEIGHT: f64 = 0.7;
/// Weight of priority in an intent's importance weight.
const PRIORITY_WEIGHT: f64 = 0.3;

/// Whether every record in the payload survived parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParsingStatus {
    /// Every non-empty segment produced a tuple.
    Clean,
    /// Some segments were dropped as malformed.
    Partial { dropped: usize },
}

impl ParsingStatus {
    fn from_dropped(dropped: usize) -> Self {
        if dropped == 0 {
            ParsingStatus::Clean
        } else {
            ParsingStatus::Partial { dropped }
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, ParsingStatus::Clean)
    }
}

/// Structured annotation of one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResult {
    pub intents: Vec<Intent>,
    pub entities: Vec<Entity>,
    pub languages: Vec<Language>,
    /// Last sentiment tuple seen, if any.
    pub sentiment: Option<Sentiment>,
    /// Name of the highest-confidence intent, empty when there are none.
    pub primary_intent: String,
    /// Code of the primary language, empty when there are none.
    pub primary_language: String,
    /// Confidence-weighted importance of the turn's intents, in [0, 1].
    pub importance_score: f64,
    pub parsing_status: ParsingStatus,
    /// Non-empty, non-marker segments in the payload.
    pub raw_record_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_id: Option<TurnId>,
    pub parsed_at: Timestamp,
}

impl StructuredResult {
    /// Attaches the turn this result belongs to.
    pub fn with_turn_id(mut self, turn_id: TurnId) -> Self {
        self.turn_id = Some(turn_id);
        self
    }

    /// Number of tuples kept.
    pub fn tuple_count(&self) -> usize {
        self.intents.len()
            + self.entities.len()
            + self.languages.len()
            + usize::from(self.sentiment.is_some())
    }
}

/// Folds validated tuples into a [`StructuredResult`].
///
/// `dropped` is the number of segments rejected upstream and
/// `raw_record_count` the number of segments considered.
pub fn assemble(
    tuples: Vec<ParsedTuple>,
    dropped: usize,
    raw_record_count: usize,
) -> StructuredResult {
    let mut intents = Vec::new();
    let mut entities = Vec::new();
    let mut languages = Vec::new();
    let mut sentiment = None;

    for tuple in tuples {
        match tuple {
            ParsedTuple::Intent(i) => intents.push(i),
            ParsedTuple::Entity(e) => entities.push(e),
            ParsedTuple::Language(l) => languages.push(l),
            ParsedTuple::Sentiment(s) => sentiment = Some(s),
        }
    }

    StructuredResult {
        primary_intent: primary_intent(&intents),
        primary_language: primary_language(&languages),
        importance_score: importance_score(&intents),
        intents,
        entities,
        languages,
        sentiment,
        parsing_status: ParsingStatus::from_dropped(dropped),
        raw_record_count,
        turn_id: None,
        parsed_at: Timestamp::now(),
    }
}

/// Weighted importance over all intents.
///
/// Each intent weighs `0.7 * confidence + 0.3 * priority` and contributes
/// `confidence * weight`; the score is the sum of contributions over the sum
/// of weights, or 0 when the weights do not sum to a positive value.
///
/// Validated intents carry confidence in [0, 1] and non-negative priority,
/// so the score is a weighted mean of confidences. Rounding is clamped and
/// an overflowed sum of huge priorities scores 0.
pub fn importance_score(intents: &[Intent]) -> f64 {
    let (score_sum, weight_sum) = intents.iter().fold((0.0, 0.0), |(score, weight), i| {
        let w = CONFIDENCE_WEIGHT * i.confidence + PRIORITY_WEIGHT * i.priority;
        (score + i.confidence * w, weight + w)
    });

    let score = score_sum / weight_sum;
    if weight_sum > 0.0 && score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// First intent with the strictly highest confidence.
fn primary_intent(intents: &[Intent]) -> String {
    first_max_by_confidence(intents.iter().map(|i| (i.confidence, i.name.as_str())))
}

/// First language flagged primary, else the highest-confidence language.
fn primary_language(languages: &[Language]) -> String {
    if let Some(flagged) = languages.iter().find(|l| l.is_primary) {
        return flagged.code.clone();
    }
    first_max_by_confidence(languages.iter().map(|l| (l.confidence, l.code.as_str())))
}

fn first_max_by_confidence<'a>(items: impl Iterator<Item = (f64, &'a str)>) -> String {
    let mut best: Option<(f64, &str)> = None;
    for (confidence, name) in items {
        match best {
            Some((top, _)) if confidence <= top => {}
            _ => best = Some((confidence, name)),
        }
    }
    best.map(|(_, name)| name.to_string()).unwrap_or_default()
}
