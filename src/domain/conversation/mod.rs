//! Conversation domain module.
//!
//! Messages, per-customer histories, and the strategies that render a
//! bounded context block from a history.

mod context;
mod history;
mod message;

pub use context::{
    build_context, compose_prompt, ContextStrategy, RecentTurnsStrategy, CURRENT_MESSAGE_HEADING,
    HISTORY_END, HISTORY_START,
};
pub use history::{ConversationHistory, HistoryStats};
pub use message::{Message, Role};
