//! Conversation manager: per-customer history with sliding expiry.
//!
//! Every operation is a load/mutate/persist cycle against a
//! [`ConversationStore`]. Loads refresh the key's TTL, so active
//! conversations never expire mid-use and idle ones are reclaimed whole.
//!
//! # Concurrency
//!
//! With `serialize_per_customer` enabled (the default), the whole cycle runs
//! under a per-customer async mutex, so concurrent turns for one customer
//! cannot lose each other's appends. Disabling it restores plain get/set
//! semantics where the last writer wins.
//!
//! # Cancellation
//!
//! [`ConversationManager::begin_turn`] stages the user message in memory and
//! only [`PendingTurn::commit`] writes, persisting the user message and the
//! reply in one store call. Dropping a pending turn (including by cancelling
//! the future that owns it) leaves the stored history untouched.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ConversationConfig;
use crate::domain::conversation::{
    compose_prompt, ContextStrategy, ConversationHistory, Message, RecentTurnsStrategy,
};
use crate::domain::foundation::{CustomerId, ValueError};
use crate::ports::{ConversationStore, StoreError};

use super::keyed_locks::{KeyGuard, KeyedLocks};

/// Errors from conversation manager operations.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// Empty message content or malformed identifier.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueError),

    /// The store was unreachable or rejected the command.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored value is not a valid history document.
    #[error("Stored history under {key} is corrupt: {reason}")]
    CorruptHistory { key: String, reason: String },

    #[error("Failed to serialize history: {0}")]
    Serialization(String),
}

/// Runtime settings for [`ConversationManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationSettings {
    /// Idle lifetime of a history.
    pub ttl: Duration,
    /// Messages rendered by the default context strategy.
    pub max_turns: usize,
    /// Hold a per-customer lock across load/append/persist.
    pub serialize_per_customer: bool,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self::from(&ConversationConfig::default())
    }
}

impl From<&ConversationConfig> for ConversationSettings {
    fn from(config: &ConversationConfig) -> Self {
        Self {
            ttl: config.ttl(),
            max_turns: config.max_turns,
            serialize_per_customer: config.serialize_per_customer,
        }
    }
}

/// Orchestrates history persistence and context rendering.
pub struct ConversationManager {
    store: Arc<dyn ConversationStore>,
    strategy: Arc<dyn ContextStrategy>,
    settings: ConversationSettings,
    locks: KeyedLocks,
}

impl ConversationManager {
    /// Creates a manager rendering context with
    /// `RecentTurnsStrategy::new(settings.max_turns)`.
    pub fn new(store: Arc<dyn ConversationStore>, settings: ConversationSettings) -> Self {
        Self {
            store,
            strategy: Arc::new(RecentTurnsStrategy::new(settings.max_turns)),
            settings,
            locks: KeyedLocks::new(),
        }
    }

    /// Replaces the default context strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn ContextStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.settings
    }

    /// Appends a user message and returns the composite prompt: the
    /// rendered history (including the new message) followed by the quoted
    /// message under analysis.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn record_and_build_context(
        &self,
        customer_id: &CustomerId,
        text: &str,
    ) -> Result<String, ConversationError> {
        let message = Message::user(text)?;
        let key = customer_id.storage_key();
        let _guard = self.guard(&key).await;

        let mut history = self.load(&key).await?;
        history.push(message);
        self.persist(&key, &history).await?;

        let context = self.strategy.build_context(history.messages());
        Ok(compose_prompt(&context, text))
    }

    /// Appends an assistant message.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn record_reply(
        &self,
        customer_id: &CustomerId,
        text: &str,
    ) -> Result<(), ConversationError> {
        let message = Message::assistant(text)?;
        let key = customer_id.storage_key();
        let _guard = self.guard(&key).await;

        let mut history = self.load(&key).await?;
        history.push(message);
        self.persist(&key, &history).await
    }

    /// Read-only snapshot of the history. Refreshes its TTL.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn get_history(
        &self,
        customer_id: &CustomerId,
    ) -> Result<ConversationHistory, ConversationError> {
        self.load(&customer_id.storage_key()).await
    }

    /// Renders the stored history with the default strategy, without
    /// appending anything.
    pub async fn build_context(&self, customer_id: &CustomerId) -> Result<String, ConversationError> {
        self.build_context_with(customer_id, self.strategy.as_ref()).await
    }

    /// Renders the stored history with a caller-chosen strategy, without
    /// appending anything.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn build_context_with(
        &self,
        customer_id: &CustomerId,
        strategy: &dyn ContextStrategy,
    ) -> Result<String, ConversationError> {
        let history = self.load(&customer_id.storage_key()).await?;
        Ok(strategy.build_context(history.messages()))
    }

    /// Deletes the customer's history.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn clear_history(&self, customer_id: &CustomerId) -> Result<(), ConversationError> {
        let key = customer_id.storage_key();
        let _guard = self.guard(&key).await;
        self.store.delete(&key).await?;
        info!("Cleared conversation history");
        Ok(())
    }

    /// Stages a user message and renders the prompt for it with the default
    /// strategy. Nothing is written until [`PendingTurn::commit`].
    pub async fn begin_turn(
        &self,
        customer_id: &CustomerId,
        text: &str,
    ) -> Result<PendingTurn<'_>, ConversationError> {
        self.begin_turn_with(customer_id, text, self.strategy.as_ref())
            .await
    }

    /// Like [`begin_turn`](Self::begin_turn) with a caller-chosen strategy.
    ///
    /// When serialization is enabled the customer stays locked until the
    /// returned turn is committed or dropped.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn begin_turn_with(
        &self,
        customer_id: &CustomerId,
        text: &str,
        strategy: &dyn ContextStrategy,
    ) -> Result<PendingTurn<'_>, ConversationError> {
        let message = Message::user(text)?;
        let key = customer_id.storage_key();
        let guard = self.guard(&key).await;

        let mut history = self.load(&key).await?;
        history.push(message);
        let prompt = compose_prompt(&strategy.build_context(history.messages()), text);

        Ok(PendingTurn {
            manager: self,
            key,
            history,
            prompt,
            _guard: guard,
        })
    }

    async fn guard(&self, key: &str) -> Option<KeyGuard> {
        if self.settings.serialize_per_customer {
            Some(self.locks.lock(key).await)
        } else {
            None
        }
    }

    async fn load(&self, key: &str) -> Result<ConversationHistory, ConversationError> {
        let Some(raw) = self.store.get(key).await? else {
            debug!(key, "No stored history");
            return Ok(ConversationHistory::new());
        };

        let history: ConversationHistory =
            serde_json::from_str(&raw).map_err(|e| ConversationError::CorruptHistory {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        // Sliding expiry: every read counts as activity.
        self.store.refresh_ttl(key, self.settings.ttl).await?;

        let stats = history.stats();
        debug!(
            key,
            messages = stats.total_messages,
            user = stats.user_messages,
            assistant = stats.assistant_messages,
            "Loaded history"
        );
        Ok(history)
    }

    async fn persist(
        &self,
        key: &str,
        history: &ConversationHistory,
    ) -> Result<(), ConversationError> {
        let raw = serde_json::to_string(history)
            .map_err(|e| ConversationError::Serialization(e.to_string()))?;
        self.store
            .set_with_ttl(key, raw, self.settings.ttl)
            .await?;
        debug!(key, messages = history.len(), "Persisted history");
        Ok(())
    }
}

impl std::fmt::Debug for ConversationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationManager")
            .field("strategy", &self.strategy)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// A user turn staged in memory, awaiting the model's reply.
pub struct PendingTurn<'a> {
    manager: &'a ConversationManager,
    key: String,
    history: ConversationHistory,
    prompt: String,
    _guard: Option<KeyGuard>,
}

impl PendingTurn<'_> {
    /// Composite prompt for the staged message.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// History as it will be stored, minus the reply.
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Appends `reply` and persists user message and reply together.
    pub async fn commit(mut self, reply: &str) -> Result<ConversationHistory, ConversationError> {
        self.history.push(Message::assistant(reply)?);
        self.manager.persist(&self.key, &self.history).await?;
        Ok(self.history)
    }
}

impl std::fmt::Debug for PendingTurn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTurn")
            .field("key", &self.key)
            .field("messages", &self.history.len())
            .field("locked", &self._guard.is_some())
            .finish_non_exhaustive()
    }
}
