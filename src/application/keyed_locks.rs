//! Per-key async mutexes.
//!
//! Serializes read-modify-write cycles on the same conversation key while
//! letting different keys proceed concurrently. Entries are held weakly and
//! pruned once no guard or waiter references them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard for one key; the key is unlocked when it is dropped.
pub type KeyGuard = OwnedMutexGuard<()>;

#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Weak<AsyncMutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until `key` is free and locks it.
    pub async fn lock(&self, key: &str) -> KeyGuard {
        self.mutex_for(key).lock_owned().await
    }

    /// Number of keys currently locked or awaited.
    pub fn active_keys(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.values().filter(|w| w.strong_count() > 0).count()
    }

    fn mutex_for(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, weak| weak.strong_count() > 0);

        if let Some(existing) = locks.get(key).and_then(Weak::upgrade) {
            return existing;
        }
        let mutex = Arc::new(AsyncMutex::new(()));
        locks.insert(key.to_string(), Arc::downgrade(&mutex));
        mutex
    }
}
