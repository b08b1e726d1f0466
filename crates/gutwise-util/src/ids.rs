//! Strongly-typed identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a recurring prompt (e.g. `checkin`, `notify_prompt`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(String);

impl PromptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PromptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PromptId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Key under which a value lives in a key-value store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Conventional key for one field of a prompt's state:
    /// `gutwise.<prompt>.<field>`
    pub fn for_prompt(prompt: &PromptId, field: &str) -> Self {
        Self(format!("gutwise.{}.{}", prompt.as_str(), field))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoreKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_id_equality() {
        let id1 = PromptId::new("checkin");
        let id2 = PromptId::new("checkin");
        let id3 = PromptId::new("notify_prompt");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn store_key_for_prompt() {
        let key = StoreKey::for_prompt(&PromptId::new("checkin"), "last_shown");
        assert_eq!(key.as_str(), "gutwise.checkin.last_shown");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = PromptId::new("checkin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"checkin\"");
        let parsed: PromptId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
