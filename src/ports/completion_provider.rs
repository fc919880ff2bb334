//! Completion Provider Port - the model that produces annotation payloads.
//!
//! Given a system prompt and a composite prompt (history block plus the
//! quoted current turn), a provider returns the raw tuple-formatted text.
//! Parsing that text is the annotation domain's job, not the provider's.

use std::time::Duration;

use async_trait::async_trait;

/// Request for a single completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Instructions describing the tuple output format.
    pub system_prompt: String,
    /// Context block followed by the current message.
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
        }
    }
}

/// Errors from completion providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion provider unavailable: {0}")]
    Unavailable(String),

    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("Completion provider returned an empty response")]
    EmptyResponse,
}

impl CompletionError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        CompletionError::Unavailable(message.into())
    }

    /// Whether retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CompletionError::Unavailable(_) | CompletionError::Timeout(_))
    }
}

/// Port for completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produces the raw annotation payload for `request`.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
