//! Conversation memory configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Instructions sent with every annotation request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You annotate the current customer message of a conversation.
Emit one tuple per finding, separated by ##, with fields separated by <||>:
(intent<||>name<||>confidence<||>priority<||>metadata_json)
(entity<||>type<||>value<||>confidence<||>metadata_json)
(language<||>code<||>confidence<||>is_primary<||>metadata_json)
(sentiment<||>label<||>confidence<||>metadata_json)
Confidence and priority are numbers between 0 and 1; is_primary is 1 or 0.
Finish with <|COMPLETE|>.";

/// Conversation memory and context-window configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Idle lifetime of a customer's history in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Messages kept in the context handed to the annotation model
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Messages kept in the shorter context used for turn analysis
    #[serde(default = "default_analysis_max_turns")]
    pub analysis_max_turns: usize,

    /// Serialize load/append/persist per customer
    #[serde(default = "default_serialize")]
    pub serialize_per_customer: bool,

    /// System prompt for the completion provider
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl ConversationConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate conversation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl);
        }
        if self.max_turns == 0 {
            return Err(ValidationError::ZeroLimit("conversation.max_turns"));
        }
        if self.analysis_max_turns == 0 {
            return Err(ValidationError::ZeroLimit("conversation.analysis_max_turns"));
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CONVERSATION__SYSTEM_PROMPT"));
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_turns: default_max_turns(),
            analysis_max_turns: default_analysis_max_turns(),
            serialize_per_customer: default_serialize(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_turns() -> usize {
    10
}

fn default_analysis_max_turns() -> usize {
    4
}

fn default_serialize() -> bool {
    true
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}
