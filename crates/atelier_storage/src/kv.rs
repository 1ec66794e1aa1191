//! String key-value stores.

use atelier_error::{AtelierResult, JsonError, StorageError, StorageErrorKind};
use atelier_interface::KeyValueStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// In-process key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AtelierResult<Option<String>> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AtelierResult<()> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AtelierResult<()> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file; concurrent processes get
/// last-writer-wins semantics. A file that does not parse is treated as
/// empty and replaced on the next write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by `path`, creating its parent directory.
    ///
    /// The file itself is created on first write.
    pub fn new(path: impl AsRef<Path>) -> AtelierResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        debug!(path = %path.display(), "Initialized key-value file store");
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AtelierResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        match serde_json::from_str(&contents) {
            Ok(data) => Ok(data),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding unparsable store file");
                Ok(HashMap::new())
            }
        }
    }

    fn write_all(&self, data: &HashMap<String, String>) -> AtelierResult<()> {
        let contents = serde_json::to_string_pretty(data)
            .map_err(|e| JsonError::new(format!("Failed to serialize store: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, contents).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        debug!(path = %self.path.display(), keys = data.len(), "Saved key-value store");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AtelierResult<Option<String>> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AtelierResult<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut data = self.read_all()?;
        data.insert(key.to_string(), value.to_string());
        self.write_all(&data)
    }

    fn remove(&self, key: &str) -> AtelierResult<()> {
        let _guard = self.guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut data = self.read_all()?;
        if data.remove(key).is_some() {
            self.write_all(&data)?;
        }
        Ok(())
    }
}
