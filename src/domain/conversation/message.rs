//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges. On the wire
//! they are `{"role": "...", "content": "..."}`; ordering is the order of
//! appends to the history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValueError;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Customer input.
    User,
    /// Model reply.
    Assistant,
}

impl Role {
    /// Tag used when rendering the message into a context block.
    pub fn context_tag(&self) -> &'static str {
        match self {
            Role::User => "UserMessage",
            Role::Assistant => "AssistantMessage",
        }
    }
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `content` is never empty or whitespace only, including when loaded
///   from storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMessage")]
pub struct Message {
    role: Role,
    content: String,
}

/// Unchecked wire form of [`Message`].
#[derive(Deserialize)]
struct StoredMessage {
    role: Role,
    content: String,
}

impl TryFrom<StoredMessage> for Message {
    type Error = ValueError;

    fn try_from(stored: StoredMessage) -> Result<Self, Self::Error> {
        Self::new(stored.role, stored.content)
    }
}

impl Message {
    /// Creates a new message with the given role and content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace only
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, ValueError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValueError::empty_field("content"));
        }
        Ok(Self { role, content })
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(Role::Assistant, content)
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
