//! Key/value persistence for view state.
//!
//! The table only ever needs a handful of small string values (the column
//! layout being the main one), so the store is a flat key -> string map.
//! [`FileStore`] keeps one file per key on disk, [`MemoryStore`] is used
//! when nothing should outlive the process and in tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    /// Returns `None` if nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Stores every key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!("Read {} bytes from {}", value.len(), path.display());
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        // Temp file + rename keeps the target either old or new, never partial.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| Self::io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_error(&path, e))?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

/// In-memory store with an optional byte quota (key and value lengths count).
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    fn used_except(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(self.used_except(key));
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("columnLayout").unwrap(), None);
        store.set("columnLayout", "[1,2]").unwrap();
        assert_eq!(store.get("columnLayout").unwrap().as_deref(), Some("[1,2]"));

        store.set("columnLayout", "[3]").unwrap();
        assert_eq!(store.get("columnLayout").unwrap().as_deref(), Some("[3]"));

        store.remove("columnLayout").unwrap();
        assert_eq!(store.get("columnLayout").unwrap(), None);
        // Second remove is fine
        store.remove("columnLayout").unwrap();
    }

    #[test]
    fn file_store_keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("../outside", "x").unwrap();
        assert!(dir.path().join("___outside.json").exists());
    }

    #[test]
    fn memory_store_enforces_quota() {
        let mut store = MemoryStore::with_quota(8);
        store.set("k", "1234567").unwrap();
        // Replacing a value only counts the new value
        store.set("k", "7654321").unwrap();

        let err = store.set("other", "abc").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 8,
                available: 0
            }
        ));
        assert_eq!(store.get("other").unwrap(), None);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("7654321"));
    }
}
