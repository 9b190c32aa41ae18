//! Key-value storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! places preferences can live. The favorites store only ever needs "get the
//! value under this key" and "replace the value under this key", so the trait
//! stays that small.

use crate::domain::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;

/// Abstraction over persistent key-value backends.
///
/// Values are JSON documents. An absent key is `Ok(None)`, never an error.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file with atomic writes (default)
/// - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
///
/// # Examples
///
/// ```
/// use giveaway::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("answer", serde_json::json!(42))?;
/// assert_eq!(store.get("answer")?, Some(serde_json::json!(42)));
/// # Ok::<(), giveaway::GiveawayError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value, and persists
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be persisted.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend. Nothing outlives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
