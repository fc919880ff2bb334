//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the annotation domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValueError;
pub use ids::{CustomerId, TurnId};
pub use timestamp::Timestamp;
