//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationStore` - TTL-bounded key-value storage for histories
//! - `CompletionProvider` - Model producing tuple-formatted annotations

mod completion_provider;
mod conversation_store;

pub use completion_provider::{CompletionError, CompletionProvider, CompletionRequest};
pub use conversation_store::{ConversationStore, StoreError};
