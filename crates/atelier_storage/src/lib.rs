//! Persistence collaborators for the Atelier core.
//!
//! - [`MemoryStore`] / [`JsonFileStore`]: string key-value stores
//! - [`MemoryMediaStore`] / [`FileSystemMediaStore`]: content-addressed media
//! - [`HistoryStore`]: the bounded, deduplicated image history kept on top of
//!   any key-value store
//!
//! # Example
//!
//! ```
//! use atelier_core::{HistoryEntry, ImageAspectRatio};
//! use atelier_storage::{HistoryStore, MemoryStore};
//! use std::sync::Arc;
//!
//! let mut history = HistoryStore::load(Arc::new(MemoryStore::new()), 6).unwrap();
//! history
//!     .record(HistoryEntry::new("data:image/jpeg;base64,AA==", "a fox", ImageAspectRatio::Square))
//!     .unwrap();
//! assert_eq!(history.entries().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod history;
mod kv;
mod memory;

pub use filesystem::FileSystemMediaStore;
pub use history::{DEFAULT_HISTORY_CAPACITY, HISTORY_KEY, HistoryStore};
pub use kv::{JsonFileStore, MemoryStore};
pub use memory::MemoryMediaStore;

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of data as lowercase hex.
pub(crate) fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
