//! In-process media store.

use crate::compute_hash;
use async_trait::async_trait;
use atelier_core::MediaHandle;
use atelier_error::{AtelierResult, StorageError, StorageErrorKind};
use atelier_interface::MediaStore;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

const SCHEME: &str = "memory://";

/// Media store that keeps bytes in memory, keyed by content hash.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryMediaStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blobs held.
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn store(&self, data: &[u8], mime_type: &str) -> AtelierResult<MediaHandle> {
        let hash = compute_hash(data);
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(hash.clone())
            .or_insert_with(|| data.to_vec());

        Ok(MediaHandle::new(
            format!("{}{}", SCHEME, hash),
            mime_type,
            data.len() as u64,
            hash,
        ))
    }

    async fn retrieve(&self, handle: &MediaHandle) -> AtelierResult<Vec<u8>> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs
            .get(handle.content_hash())
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(handle.locator().clone())).into())
    }
}
