//! Conversation Store Port - TTL-bounded key-value persistence for histories.
//!
//! The store is deliberately dumb: opaque string values under string keys,
//! each with an expiry. Serialization of [`ConversationHistory`] happens in
//! the application layer, so the same port can be backed by Redis in
//! production and by an in-memory map in tests.
//!
//! [`ConversationHistory`]: crate::domain::conversation::ConversationHistory

use std::time::Duration;

use async_trait::async_trait;

/// Errors from conversation store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store is unreachable or rejected the command.
    #[error("Store connection error: {0}")]
    Connection(String),

    /// The command did not complete within the configured timeout.
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection(message.into())
    }
}

/// Port for the TTL-bounded conversation store.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value and
    /// resetting its time to live.
    async fn set_with_ttl(&self, key: &str, value: String, ttl: Duration)
        -> Result<(), StoreError>;

    /// Resets the time to live of an existing key.
    ///
    /// Returns `false` when the key does not exist.
    async fn refresh_ttl(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
