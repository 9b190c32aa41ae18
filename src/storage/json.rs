//! JSON file-based key-value backend.
//!
//! This module provides a simple, human-readable preference store. It uses
//! atomic file writes (write-to-temp + rename) to prevent corruption on
//! crashes.
//!
//! # Performance Characteristics
//!
//! - **Load**: the document is read and parsed once, on open
//! - **Read**: served from the in-memory map, no disk access
//! - **Write**: serializes and rewrites the entire document
//! - **Best for**: a handful of keys, infrequent writes

use crate::domain::error::{GiveawayError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "values": {
///     "kAPPFavoriteGiveAways": [ { "id": 3091, "title": "...", "isFavorite": true } ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    values: BTreeMap<String, Value>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

/// JSON file key-value backend.
///
/// The whole document is kept in memory and persisted on every modification.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. Callers that share it across threads
/// wrap it in a lock, as [`FavoritesStore`](crate::storage::FavoritesStore) does.
pub struct JsonFileStore {
    file_path: PathBuf,

    /// In-memory copy of the document, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonFileStore {
    /// Creates or opens a JSON preference file.
    ///
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use giveaway::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::new(PathBuf::from("/tmp/preferences.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON preference store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty preference store");
            StorageData::default()
        };

        tracing::debug!(key_count = data.values.len(), "preference store initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| GiveawayError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            keys = data.values.len(),
            "loaded preference data"
        );

        Ok(data)
    }

    /// Saves the document using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over the target path
    /// so the file is never left half-written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write or the rename
    /// fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| GiveawayError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key).entered();

        self.data.values.insert(key.to_string(), value);
        self.dirty = true;
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_remove", key = %key).entered();

        if self.data.values.remove(key).is_some() {
            self.dirty = true;
        }
        self.save_to_file()
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty preferences on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}
