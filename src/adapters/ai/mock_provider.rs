//! Mock completion provider for testing.
//!
//! Provides a configurable implementation of the CompletionProvider port,
//! allowing tests and the CLI to run without a real model.
//!
//! # Features
//!
//! - Pre-configured responses
//! - Simulated delays for timeout and cancellation testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_response("(intent<||>greeting<||>0.9<||>0.5<||>{})##<|COMPLETE|>")
//!     .with_delay(Duration::from_millis(100));
//!
//! let payload = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{CompletionError, CompletionProvider, CompletionRequest};

/// Payload returned once the queue is exhausted.
pub const DEFAULT_MOCK_PAYLOAD: &str =
    "(intent<||>general_inquiry<||>0.5<||>0.5<||>{})##(language<||>en<||>0.9<||>1<||>{})##<|COMPLETE|>";

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(CompletionError),
}

/// Mock completion provider.
///
/// Configurable to return specific payloads, simulate delays, or inject errors.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCompletionProvider {
    /// Creates a new mock provider with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, payload: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(payload.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: CompletionError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_MOCK_PAYLOAD.to_string()))
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(payload) if payload.trim().is_empty() => {
                Err(CompletionError::EmptyResponse)
            }
            MockResponse::Success(payload) => Ok(payload),
            MockResponse::Error(err) => Err(err),
        }
    }
}
