//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValueError;

/// Prefix of every conversation key in the store.
const CONVERSATION_KEY_PREFIX: &str = "conversation:";

/// Identifier of the customer a conversation belongs to.
///
/// Opaque to the domain: chat platforms hand us their own user ids, so any
/// non-empty string without whitespace is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a CustomerId, rejecting empty or whitespace-bearing input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValueError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValueError::empty_field("customer_id"));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValueError::invalid_format(
                "customer_id",
                "must not contain whitespace",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which this customer's history is stored.
    pub fn storage_key(&self) -> String {
        format!("{}{}", CONVERSATION_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CustomerId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerId> for String {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}

/// Unique identifier for one analyzed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TurnId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_accepts_platform_ids() {
        let id = CustomerId::new("U4af4980629").unwrap();
        assert_eq!(id.as_str(), "U4af4980629");
    }

    #[test]
    fn customer_id_rejects_empty() {
        assert!(matches!(
            CustomerId::new("   "),
            Err(ValueError::EmptyField { .. })
        ));
    }

    #[test]
    fn customer_id_rejects_whitespace() {
        assert!(matches!(
            CustomerId::new("cust 42"),
            Err(ValueError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn storage_key_uses_conversation_prefix() {
        let id: CustomerId = "cust-42".parse().unwrap();
        assert_eq!(id.storage_key(), "conversation:cust-42");
    }

    #[test]
    fn customer_id_serde_validates() {
        let ok: CustomerId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(ok.to_string(), "abc");
        assert!(serde_json::from_str::<CustomerId>("\"\"").is_err());
    }

    #[test]
    fn turn_ids_are_unique() {
        assert_ne!(TurnId::new(), TurnId::new());
    }
}
