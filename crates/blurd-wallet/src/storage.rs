use blurd_types::{BlurdError, BlurdResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Key-value storage port.
///
/// Mirrors the browser-storage surface the product was built on: string
/// keys, string values, read-then-write with no cross-process
/// transactional guarantees. Tests substitute [`MemoryStore`].
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key has never been written.
    fn get(&self, key: &str) -> BlurdResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> BlurdResult<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> BlurdResult<()>;
}

/// In-memory store for tests and ephemeral sessions.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BlurdResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| BlurdError::Storage("Lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BlurdResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BlurdError::Storage("Lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> BlurdResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BlurdError::Storage("Lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a base directory.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> BlurdResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir)
                .map_err(|e| BlurdError::Storage(e.to_string()))?;
        }

        Ok(Self { base_dir })
    }

    fn key_path(&self, key: &str) -> BlurdResult<PathBuf> {
        // Keys are namespace identifiers, never paths
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(BlurdError::Storage(format!("Invalid storage key: {key:?}")));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BlurdResult<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| BlurdError::Storage(format!("Failed to read {key}: {e}")))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> BlurdResult<()> {
        let path = self.key_path(key)?;

        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)
            .map_err(|e| BlurdError::Storage(format!("Failed to write {key}: {e}")))?;

        std::fs::rename(&temp_path, &path)
            .map_err(|e| BlurdError::Storage(format!("Failed to save {key}: {e}")))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> BlurdResult<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| BlurdError::Storage(format!("Failed to delete {key}: {e}")))?;
        }
        Ok(())
    }
}
