//! Generated media payloads and handles to locally stored media.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single image returned by the image model.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GeneratedImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl GeneratedImage {
    /// Create an image payload.
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// Locally addressable media produced by a media store.
///
/// `locator` is what the presentation layer plays or links to: a `file://`
/// URL for filesystem storage or a `memory://` key for in-process storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct MediaHandle {
    locator: String,
    mime_type: String,
    size_bytes: u64,
    content_hash: String,
}

impl MediaHandle {
    /// Create a media handle.
    pub fn new(
        locator: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            locator: locator.into(),
            mime_type: mime_type.into(),
            size_bytes,
            content_hash: content_hash.into(),
        }
    }
}
