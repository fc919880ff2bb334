//! Storage Adapters
//!
//! Implementations of the ConversationStore port.
//!
//! ## Available Adapters
//!
//! - **RedisConversationStore** - Redis keys with native expiry (production)
//! - **InMemoryConversationStore** - Process-local map with emulated expiry (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryConversationStore, RedisConversationStore};
//!
//! // Production: Redis
//! let store = RedisConversationStore::connect(&config.redis).await?;
//!
//! // Testing: in-memory storage
//! let store = InMemoryConversationStore::new();
//! ```

mod in_memory_conversation_store;
mod redis_conversation_store;

pub use in_memory_conversation_store::InMemoryConversationStore;
pub use redis_conversation_store::RedisConversationStore;
