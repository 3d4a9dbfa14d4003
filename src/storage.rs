//! Local persistent key-value storage.
//!
//! An opaque string map kept in one JSON file. The file is read once when
//! opened and every mutation is written straight through.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    items: RwLock<BTreeMap<String, String>>,
}

impl LocalStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let items = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "storage file corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "local storage opened");

        Ok(Self {
            path: Some(path),
            items: RwLock::new(items),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().get(key).cloned()
    }

    pub fn set_item(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut items = self.items.write();
        let mut next = items.clone();
        next.insert(key.to_string(), value.into());
        self.flush(&next)?;
        *items = next;
        Ok(())
    }

    /// A failed write leaves the previous contents in place.
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write();
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut next = items.clone();
        next.remove(key);
        self.flush(&next)?;
        *items = next;
        Ok(())
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
