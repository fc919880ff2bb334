//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, value errors)
//! - `annotation` - Tuple decoding, validation and response assembly
//! - `conversation` - Messages, histories and context strategies

pub mod annotation;
pub mod conversation;
pub mod foundation;
