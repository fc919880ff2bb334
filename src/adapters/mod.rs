//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Conversation stores (Redis, in-memory)
//! - `ai` - Completion providers (mock)

pub mod ai;
pub mod storage;

pub use ai::MockCompletionProvider;
pub use storage::{InMemoryConversationStore, RedisConversationStore};
