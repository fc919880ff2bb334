//! Turn analysis: one customer message in, one structured annotation out.
//!
//! Ties the conversation manager, the completion provider and the parser
//! together. The user message and the model's reply are persisted together
//! only after the reply arrives, so a failed or cancelled analysis leaves
//! the customer's history as it was.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::annotation::{AnnotationParser, StructuredResult};
use crate::domain::conversation::{ContextStrategy, RecentTurnsStrategy};
use crate::domain::foundation::{CustomerId, TurnId};
use crate::ports::{CompletionError, CompletionProvider, CompletionRequest};

use super::conversation_manager::{ConversationError, ConversationManager};

/// Errors that can occur when analyzing a turn.
#[derive(Debug, Error)]
pub enum AnalyzeTurnError {
    #[error(transparent)]
    Conversation(#[from] ConversationError),

    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Handler for single-turn analysis.
pub struct TurnAnalyzer {
    manager: Arc<ConversationManager>,
    provider: Arc<dyn CompletionProvider>,
    parser: AnnotationParser,
    system_prompt: String,
    strategy: Option<Arc<dyn ContextStrategy>>,
}

impl TurnAnalyzer {
    /// Creates a new analyzer with the given dependencies.
    pub fn new(
        manager: Arc<ConversationManager>,
        provider: Arc<dyn CompletionProvider>,
        parser: AnnotationParser,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            manager,
            provider,
            parser,
            system_prompt: system_prompt.into(),
            strategy: None,
        }
    }

    /// Builds an analyzer from configuration: the configured parser and
    /// system prompt, with prompts bounded to `analysis_max_turns` messages.
    pub fn from_config(
        manager: Arc<ConversationManager>,
        provider: Arc<dyn CompletionProvider>,
        config: &AppConfig,
    ) -> Self {
        let parser = AnnotationParser::new(config.parser.delimiters(), config.parser.limits());
        let strategy = RecentTurnsStrategy::new(config.conversation.analysis_max_turns);

        Self::new(
            manager,
            provider,
            parser,
            config.conversation.system_prompt.clone(),
        )
        .with_strategy(Arc::new(strategy))
    }

    /// Renders analysis prompts with `strategy` instead of the manager's
    /// default.
    pub fn with_strategy(mut self, strategy: Arc<dyn ContextStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Analyzes `text` in the context of the customer's history.
    ///
    /// On success the history gains the user message and the raw model
    /// reply. On any error, or if the returned future is dropped before
    /// completion, the history is unchanged.
    #[tracing::instrument(
        skip_all,
        fields(customer_id = %customer_id, turn_id = tracing::field::Empty)
    )]
    pub async fn analyze_turn(
        &self,
        customer_id: &CustomerId,
        text: &str,
    ) -> Result<StructuredResult, AnalyzeTurnError> {
        let turn_id = TurnId::new();
        tracing::Span::current().record("turn_id", tracing::field::display(&turn_id));

        let pending = match &self.strategy {
            Some(strategy) => {
                self.manager
                    .begin_turn_with(customer_id, text, strategy.as_ref())
                    .await?
            }
            None => self.manager.begin_turn(customer_id, text).await?,
        };

        let request = CompletionRequest::new(self.system_prompt.clone(), pending.prompt());
        let payload = self.provider.complete(request).await?;
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(CompletionError::EmptyResponse.into());
        }

        let result = self.parser.parse(payload).with_turn_id(turn_id);
        pending.commit(payload).await?;

        info!(
            primary_intent = %result.primary_intent,
            primary_language = %result.primary_language,
            importance = result.importance_score,
            clean = result.parsing_status.is_clean(),
            "Analyzed turn"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for TurnAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnAnalyzer")
            .field("manager", &self.manager)
            .field("parser", &self.parser)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
