//! Key-value store implementations for session persistence
//!
//! The session layer persists the token and user profile through the
//! [`KeyValueStore`] trait. [`FileKeyValueStore`] keeps one file per key under
//! a storage directory so sessions survive process restarts;
//! [`MemoryKeyValueStore`] backs ephemeral configurations and tests.

use async_trait::async_trait;
use bookly_core::{BooklyError, BooklyResult, KeyValueStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// File-backed key-value store
///
/// Each key maps to a single file named after the sanitized key. Values are
/// stored as raw text. Writes and deletes are applied per key in the order
/// given; there is no cross-key transaction.
pub struct FileKeyValueStore {
    /// Base directory for persisted entries
    storage_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a new file-backed store rooted at the given directory
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> BooklyResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        // Create storage directory if it doesn't exist
        std::fs::create_dir_all(&storage_dir).map_err(BooklyError::Io)?;

        info!("Key-value store initialized at: {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.storage_dir.join(format!("{}.kv", sanitize_key(key)))
    }
}

/// Map a store key to a filesystem-safe file stem
///
/// Keys are namespaced strings like "@Bookly:token"; anything outside a
/// conservative character set becomes an underscore.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_many(&self, keys: &[String]) -> BooklyResult<HashMap<String, String>> {
        let mut values = HashMap::new();

        for key in keys {
            let path = self.entry_path(key);
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => {
                    values.insert(key.clone(), value);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("No stored value for key: {}", key);
                }
                Err(e) => {
                    return Err(BooklyError::Storage {
                        message: format!("Failed to read key '{}': {}", key, e),
                        source: Some(Box::new(e)),
                        context: bookly_core::ErrorContext::new("file_kv_store")
                            .with_operation("get_many")
                            .with_metadata("path", &path.display().to_string()),
                    });
                }
            }
        }

        Ok(values)
    }

    async fn set_many(&self, entries: &[(String, String)]) -> BooklyResult<()> {
        for (key, value) in entries {
            let path = self.entry_path(key);
            tokio::fs::write(&path, value)
                .await
                .map_err(|e| BooklyError::Storage {
                    message: format!("Failed to write key '{}': {}", key, e),
                    source: Some(Box::new(e)),
                    context: bookly_core::ErrorContext::new("file_kv_store")
                        .with_operation("set_many")
                        .with_metadata("path", &path.display().to_string())
                        .with_suggestion("Check if the storage directory is writable"),
                })?;

            debug!("Stored key {} at {}", key, path.display());
        }

        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> BooklyResult<()> {
        for key in keys {
            let path = self.entry_path(key);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    debug!("Deleted key {} at {}", key, path.display());
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(BooklyError::Storage {
                        message: format!("Failed to delete key '{}': {}", key, e),
                        source: Some(Box::new(e)),
                        context: bookly_core::ErrorContext::new("file_kv_store")
                            .with_operation("delete_many")
                            .with_metadata("path", &path.display().to_string()),
                    });
                }
            }
        }

        Ok(())
    }
}

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (test helper)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_many(&self, keys: &[String]) -> BooklyResult<HashMap<String, String>> {
        let entries = self.entries.read().await;

        Ok(keys
            .iter()
            .filter_map(|key| entries.get(key).map(|value| (key.clone(), value.clone())))
            .collect())
    }

    async fn set_many(&self, new_entries: &[(String, String)]) -> BooklyResult<()> {
        let mut entries = self.entries.write().await;

        for (key, value) in new_entries {
            entries.insert(key.clone(), value.clone());
        }

        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> BooklyResult<()> {
        let mut entries = self.entries.write().await;

        for key in keys {
            entries.remove(key);
        }

        Ok(())
    }
}
