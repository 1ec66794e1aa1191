//! Recently generated images kept for recall.

use crate::ImageAspectRatio;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A completed image result, identified by its locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct HistoryEntry {
    locator: String,
    prompt: String,
    aspect_ratio: ImageAspectRatio,
}

impl HistoryEntry {
    /// Create a history entry.
    pub fn new(
        locator: impl Into<String>,
        prompt: impl Into<String>,
        aspect_ratio: ImageAspectRatio,
    ) -> Self {
        Self {
            locator: locator.into(),
            prompt: prompt.into(),
            aspect_ratio,
        }
    }
}
