//! Redis-backed conversation store for production deployments.
//!
//! Each history is a single string value under `conversation:{customer_id}`
//! with a Redis expiry. Writes use `SET ... EX`, sliding refreshes use
//! `EXPIRE`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use secrecy::ExposeSecret;
use tokio::time::timeout;

use crate::config::RedisConfig;
use crate::ports::{ConversationStore, StoreError};

/// Redis conversation store over a multiplexed connection.
///
/// Cloning is cheap: clones share the underlying connection.
#[derive(Clone)]
pub struct RedisConversationStore {
    conn: MultiplexedConnection,
    timeout: Duration,
}

impl RedisConversationStore {
    /// Wrap an existing connection.
    pub fn new(conn: MultiplexedConnection, timeout: Duration) -> Self {
        Self { conn, timeout }
    }

    /// Open a connection using `config.url`, bounded by `config.timeout()`.
    pub async fn connect(config: &RedisConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.expose_secret().as_str())
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let conn = timeout(config.timeout(), client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| StoreError::Timeout(config.timeout()))?
            .map_err(|e| StoreError::connection(e.to_string()))?;

        tracing::info!(timeout_secs = config.timeout_secs, "Connected to Redis conversation store");
        Ok(Self::new(conn, config.timeout()))
    }

    /// Run one command under the configured timeout.
    async fn run<T, F>(&self, command: F) -> Result<T, StoreError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        timeout(self.timeout, command)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
            .map_err(|e| StoreError::connection(e.to_string()))
    }
}

/// Redis expiries are whole seconds; never round a positive TTL down to zero.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl ConversationStore for RedisConversationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = self.run(conn.get(key)).await?;
        tracing::debug!(key, found = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let secs = ttl_secs(ttl);
        self.run(conn.set_ex::<_, _, ()>(key, value, secs)).await?;
        tracing::debug!(key, ttl_secs = secs, "Redis SET EX");
        Ok(())
    }

    async fn refresh_ttl(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let secs = ttl_secs(ttl);
        let refreshed: bool = self.run(conn.expire(key, secs as i64)).await?;
        tracing::debug!(key, ttl_secs = secs, refreshed, "Redis EXPIRE");
        Ok(refreshed)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        self.run(conn.del::<_, ()>(key)).await?;
        tracing::debug!(key, "Redis DEL");
        Ok(())
    }
}

impl std::fmt::Debug for RedisConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConversationStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
