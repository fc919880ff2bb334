//! Annotation domain module.
//!
//! Turns the delimited tuple payload produced by a language model into
//! typed intent, entity, language and sentiment records, and derives the
//! summary signals (primary intent, primary language, importance score).
//!
//! The pipeline is pure and never fails as a whole: malformed records are
//! dropped with a warning, malformed numbers and metadata are defaulted.

mod assembler;
mod decoder;
mod delimiters;
mod errors;
mod metadata;
mod parser;
mod record;
mod tuple;
mod validator;

pub use assembler::{assemble, importance_score, ParsingStatus, StructuredResult};
pub use decoder::{decode, DecodeOutcome, RejectedRecord};
pub use delimiters::{
    Delimiters, DEFAULT_COMPLETION_MARKER, DEFAULT_RECORD_DELIMITER, DEFAULT_TUPLE_DELIMITER,
};
pub use errors::{MetadataError, ValidationError};
pub use metadata::{decode_metadata, Metadata};
pub use parser::AnnotationParser;
pub use record::{Record, TupleKind};
pub use tuple::{Entity, Intent, Language, ParsedTuple, Sentiment};
pub use validator::{check_structure, validate, ParserLimits};
