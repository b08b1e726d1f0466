//! Store trait definitions

use gutwise_util::StoreKey;

use crate::StoreResult;

/// String key-value store, the shape of a browser's `localStorage`.
///
/// Missing keys are not errors: `get` yields `Ok(None)` and `remove` of a
/// missing key is `Ok(())`. Writing the same value twice leaves the store
/// unchanged.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &StoreKey) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &StoreKey, value: &str) -> StoreResult<()>;

    /// Delete `key`
    fn remove(&self, key: &StoreKey) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
