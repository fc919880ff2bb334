//! Completion Provider Adapters.
//!
//! Implementations of the CompletionProvider port.
//!
//! - `MockCompletionProvider` - Configurable mock for tests and offline runs

mod mock_provider;

pub use mock_provider::{MockCompletionProvider, MockResponse, DEFAULT_MOCK_PAYLOAD};
