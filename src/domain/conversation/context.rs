//! Context strategies: bounded textual views of a conversation history.
//!
//! A strategy turns the ordered history into the context block handed to
//! the model. Different downstream consumers can use different strategies
//! (e.g. a shorter window for a cheaper classification call).

use std::fmt::Debug;

use super::Message;

/// Opens the rendered history block.
pub const HISTORY_START: &str = "<conversation_history>";
/// Closes the rendered history block.
pub const HISTORY_END: &str = "</conversation_history>";
/// Heading of the block quoting the turn under analysis.
pub const CURRENT_MESSAGE_HEADING: &str = "Current message to analyze:";

/// Policy producing a bounded context block from a history.
pub trait ContextStrategy: Debug + Send + Sync {
    /// Renders `history` (oldest first) into a context block.
    fn build_context(&self, history: &[Message]) -> String;
}

/// Keeps the `max_turns` most recent messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentTurnsStrategy {
    max_turns: usize,
}

impl RecentTurnsStrategy {
    pub fn new(max_turns: usize) -> Self {
        Self { max_turns }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }
}

impl ContextStrategy for RecentTurnsStrategy {
    fn build_context(&self, history: &[Message]) -> String {
        build_context(history, self.max_turns)
    }
}

/// Renders the last `max_turns` messages as role-tagged lines between the
/// history markers, in chronological order.
pub fn build_context(history: &[Message], max_turns: usize) -> String {
    let start = history.len().saturating_sub(max_turns);

    let mut out = String::from(HISTORY_START);
    out.push('\n');
    for message in &history[start..] {
        out.push_str(message.role().context_tag());
        out.push('(');
        out.push_str(message.content());
        out.push_str(")\n");
    }
    out.push_str(HISTORY_END);
    out
}

/// Composite prompt: the context block followed by the quoted current turn.
///
/// The model must see the history and the literal text under analysis as
/// structurally distinct parts.
pub fn compose_prompt(context: &str, current_message: &str) -> String {
    format!(
        "{}\n\n{}\n\"\"\"\n{}\n\"\"\"",
        context, CURRENT_MESSAGE_HEADING, current_message
    )
}
