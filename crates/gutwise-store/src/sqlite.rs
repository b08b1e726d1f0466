//! SQLite-based store implementation

use gutwise_util::StoreKey;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{KeyValueStore, StoreResult};

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock()?;

        conn.execute_batch(
            r#"
            -- Prompt state, one row per key
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &StoreKey) -> StoreResult<Option<String>> {
        let conn = self.conn.lock()?;

        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &StoreKey, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock()?;

        conn.execute(
            r#"
            INSERT INTO kv (key, value)
            VALUES (?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value = excluded.value
            "#,
            params![key.as_str(), value],
        )?;

        debug!(key = %key, value, "Value stored");
        Ok(())
    }

    fn remove(&self, key: &StoreKey) -> StoreResult<()> {
        let conn = self.conn.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?", [key.as_str()])?;
        debug!(key = %key, "Value removed");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_get_set_remove() {
        let store = SqliteStore::in_memory().unwrap();
        let key = StoreKey::new("gutwise.checkin.dismissed_until");

        // Nothing initially
        assert!(store.get(&key).unwrap().is_none());

        store.set(&key, "14400000").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("14400000"));

        // Overwrite
        store.set(&key, "7200000").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("7200000"));

        store.remove(&key).unwrap();
        assert!(store.get(&key).unwrap().is_none());

        // Removing again is fine
        store.remove(&key).unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let store = SqliteStore::in_memory().unwrap();
        let a = StoreKey::new("gutwise.checkin.last_shown");
        let b = StoreKey::new("gutwise.notify_prompt.last_shown");

        store.set(&a, "1").unwrap();
        store.set(&b, "2").unwrap();
        store.remove(&a).unwrap();

        assert!(store.get(&a).unwrap().is_none());
        assert_eq!(store.get(&b).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gutwise.db");
        let key = StoreKey::new("gutwise.checkin.last_shown");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set(&key, "123456").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("123456"));
    }
}
