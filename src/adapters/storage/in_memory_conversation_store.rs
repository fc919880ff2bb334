//! In-Memory Conversation Store Adapter
//!
//! Emulates Redis expiry semantics in process. Useful for tests and local
//! development. Also offers fault and latency injection so tests can drive
//! store failures and interleavings deterministically.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{sleep, Instant};

use crate::ports::{ConversationStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory TTL store
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    read_delay: Arc<RwLock<Duration>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every `get` after the value has been read.
    ///
    /// Widens the window between a read and the caller's write so that
    /// concurrent read-modify-write cycles interleave.
    pub async fn set_read_delay(&self, delay: Duration) {
        *self.read_delay.write().await = delay;
    }

    /// Make `get` and `refresh_ttl` fail with a connection error
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `set_with_ttl` and `delete` fail with a connection error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set_with_ttl` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Remaining time to live of a live key
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.expires_at - now)
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|e| e.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::connection(format!("injected {op} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::check(&self.fail_reads, "read")?;

        let now = Instant::now();
        let value = {
            let mut entries = self.entries.write().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
                Some(_) => {
                    entries.remove(key);
                    None
                }
                None => None,
            }
        };

        let delay = *self.read_delay.read().await;
        if !delay.is_zero() {
            sleep(delay).await;
        }
        Ok(value)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        Self::check(&self.fail_writes, "write")?;

        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn refresh_ttl(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        Self::check(&self.fail_reads, "refresh")?;

        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            Some(entry) if entry.is_live(now) => {
                entry.expires_at = now + ttl;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        Self::check(&self.fail_writes, "delete")?;

        self.entries.write().await.remove(key);
        Ok(())
    }
}
