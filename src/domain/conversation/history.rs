//! Per-customer conversation history.

use serde::{Deserialize, Serialize};

use super::Message;

/// Ordered, append-only message history for one customer.
///
/// Serialized as `{"messages": [...]}`, the value stored under the
/// customer's conversation key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    #[serde(default)]
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Message counts and size, for diagnostics.
    pub fn stats(&self) -> HistoryStats {
        let user_messages = self.messages.iter().filter(|m| m.is_user()).count();
        HistoryStats {
            total_messages: self.messages.len(),
            user_messages,
            assistant_messages: self.messages.len() - user_messages,
            total_characters: self.messages.iter().map(|m| m.content().chars().count()).sum(),
        }
    }
}

/// Statistics about a conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub total_characters: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(count: usize) -> ConversationHistory {
        let mut h = ConversationHistory::new();
        for i in 0..count {
            let msg = if i % 2 == 0 {
                Message::user(format!("question {i}"))
            } else {
                Message::assistant(format!("answer {i}"))
            };
            h.push(msg.unwrap());
        }
        h
    }

    #[test]
    fn push_appends_in_order() {
        let h = history(3);
        let contents: Vec<_> = h.messages().iter().map(Message::content).collect();
        assert_eq!(contents, vec!["question 0", "answer 1", "question 2"]);
    }

    #[test]
    fn recent_takes_tail() {
        let h = history(5);
        let tail = h.recent(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content(), "answer 3");
        assert_eq!(tail[1].content(), "question 4");
    }

    #[test]
    fn recent_with_large_n_returns_all() {
        let h = history(3);
        assert_eq!(h.recent(10).len(), 3);
        assert!(ConversationHistory::new().recent(4).is_empty());
    }

    #[test]
    fn deserializes_stored_json() {
        let json = r#"{"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#;
        let h: ConversationHistory = serde_json::from_str(json).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(serde_json::to_string(&h).unwrap(), json);
    }

    #[test]
    fn missing_messages_array_is_empty_history() {
        let h: ConversationHistory = serde_json::from_str("{}").unwrap();
        assert!(h.is_empty());
    }

    #[test]
    fn stats_count_roles() {
        let stats = history(5).stats();
        assert_eq!(stats.total_messages, 5);
        assert_eq!(stats.user_messages, 3);
        assert_eq!(stats.assistant_messages, 2);
        assert!(stats.total_characters > 0);
    }
}
