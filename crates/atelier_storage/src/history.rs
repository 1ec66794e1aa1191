//! Bounded history of generated images.

use atelier_core::HistoryEntry;
use atelier_error::{AtelierResult, JsonError};
use atelier_interface::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key under which the history is persisted.
pub const HISTORY_KEY: &str = "atelier.image_history";

/// Number of entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 6;

/// Newest-first list of recent images, unique by locator.
///
/// Every change is written straight through to the key-value store.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Load the persisted history.
    ///
    /// A stored value that does not parse is discarded as a whole and the key
    /// is cleared; nothing is salvaged from it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the key-value store itself fails.
    pub fn load(store: Arc<dyn KeyValueStore>, capacity: usize) -> AtelierResult<Self> {
        let capacity = capacity.max(1);
        let entries = match store.get(HISTORY_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(capacity);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "Discarding malformed image history");
                    store.remove(HISTORY_KEY)?;
                    Vec::new()
                }
            },
        };

        debug!(entries = entries.len(), capacity, "Loaded image history");
        Ok(Self {
            store,
            capacity,
            entries,
        })
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Maximum number of entries kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Put `entry` at the front, dropping any older entry with the same
    /// locator and evicting the oldest beyond capacity, then persist.
    pub fn record(&mut self, entry: HistoryEntry) -> AtelierResult<()> {
        self.entries.retain(|e| e.locator() != entry.locator());
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        self.persist()
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> AtelierResult<()> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    fn persist(&self) -> AtelierResult<()> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| JsonError::new(format!("Failed to serialize image history: {}", e)))?;
        self.store.set(HISTORY_KEY, &raw)
    }
}
