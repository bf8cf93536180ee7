pub mod backup;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::action_item::ActionItem;
use crate::core::preferences::Preferences;

pub const ACTION_ITEMS_KEY: &str = "actionItems";
pub const PREFERENCES_KEY: &str = "userPreferences";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A directory of JSON documents, one file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Raw contents of a key, `None` when it was never written.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Replace a key's contents.
    ///
    /// Each call writes its own uniquely named temp file in the store directory
    /// and renames it over the key, so concurrent writers never share a partial
    /// file and the last rename wins.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let root_err = |source: std::io::Error| StoreError::Io {
            path: self.root.clone(),
            source,
        };
        std::fs::create_dir_all(&self.root).map_err(root_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).map_err(root_err)?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| StoreError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        let path = self.key_path(key);
        tmp.persist(&path).map_err(|e| StoreError::Io {
            path,
            source: e.error,
        })?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Decode a key. Missing, unreadable and corrupt keys all read as `None`;
    /// the latter two are logged.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = match self.get(key) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Failed to read {}: {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Error loading saved {}: {}", key, e);
                None
            }
        }
    }

    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json)
    }

    pub fn load_items(&self) -> Vec<ActionItem> {
        self.load_json(ACTION_ITEMS_KEY).unwrap_or_default()
    }

    pub fn save_items(&self, items: &[ActionItem]) -> Result<(), StoreError> {
        self.save_json(ACTION_ITEMS_KEY, items)
    }

    pub fn load_preferences(&self) -> Preferences {
        self.load_json(PREFERENCES_KEY).unwrap_or_default()
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<(), StoreError> {
        self.save_json(PREFERENCES_KEY, prefs)
    }

    /// Drop both keys.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.remove(ACTION_ITEMS_KEY)?;
        self.remove(PREFERENCES_KEY)
    }
}
