//! Process-local stores

use gutwise_util::StoreKey;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use crate::{KeyValueStore, StoreError, StoreResult};

/// In-memory store. State lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> StoreResult<Option<String>> {
        let values = self.values.lock()?;
        Ok(values.get(key.as_str()).cloned())
    }

    fn set(&self, key: &StoreKey, value: &str) -> StoreResult<()> {
        let mut values = self.values.lock()?;
        values.insert(key.as_str().to_string(), value.to_string());
        debug!(key = %key, "Value stored");
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> StoreResult<()> {
        let mut values = self.values.lock()?;
        values.remove(key.as_str());
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.values.lock().is_ok()
    }
}

/// Store whose medium is gone (storage disabled, quota exceeded, private
/// browsing). Every call fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &StoreKey) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn set(&self, _key: &StoreKey, _value: &str) -> StoreResult<()> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn remove(&self, _key: &StoreKey) -> StoreResult<()> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }

    fn is_healthy(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let key = StoreKey::new("gutwise.checkin.last_shown");

        assert!(store.get(&key).unwrap().is_none());

        store.set(&key, "1000").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("1000"));

        // Same value twice is a no-op
        store.set(&key, "1000").unwrap();
        assert_eq!(store.len(), 1);

        store.set(&key, "2000").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("2000"));

        store.remove(&key).unwrap();
        assert!(store.get(&key).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_remove_missing_key() {
        let store = MemoryStore::new();
        assert!(store.remove(&StoreKey::new("nope")).is_ok());
        assert!(store.is_healthy());
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let store = UnavailableStore::new("storage disabled");
        let key = StoreKey::new("k");

        assert!(matches!(store.get(&key), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.set(&key, "v"), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.remove(&key), Err(StoreError::Unavailable(_))));
        assert!(!store.is_healthy());
    }
}
