//! Application layer - orchestration over the domain and ports.
//!
//! - `ConversationManager` - per-customer history, context rendering, staged turns
//! - `TurnAnalyzer` - history + completion + parsing for one customer message
//! - `KeyedLocks` - per-customer serialization of read-modify-write cycles

mod conversation_manager;
mod keyed_locks;
mod turn_analyzer;

pub use conversation_manager::{
    ConversationError, ConversationManager, ConversationSettings, PendingTurn,
};
pub use keyed_locks::{KeyGuard, KeyedLocks};
pub use turn_analyzer::{AnalyzeTurnError, TurnAnalyzer};
