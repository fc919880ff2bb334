//! Turn Annotator - structured annotation of conversational turns
//!
//! This crate parses a language model's tuple-formatted annotations of a
//! customer message (intents, entities, languages, sentiment) into a typed
//! result, and keeps a TTL-bounded, per-customer conversation history from
//! which bounded prompt contexts are rendered.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
