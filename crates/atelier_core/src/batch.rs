//! Batch fan-out progress and per-prompt artifacts.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What a batch produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum BatchKind {
    /// Still images, generated in parallel
    #[display("images")]
    Images,
    /// Videos, generated one at a time
    #[display("videos")]
    Videos,
}

/// Progress of one fan-out run.
///
/// `completed` only grows and never exceeds `total`.
///
/// # Examples
///
/// ```
/// use atelier_core::{BatchJob, BatchKind};
///
/// let mut job = BatchJob::new(BatchKind::Images, 2);
/// job.record_settlement();
/// job.record_settlement();
/// job.record_settlement();
/// assert_eq!(*job.completed(), 2);
/// assert!(job.is_finished());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BatchJob {
    kind: BatchKind,
    total: usize,
    completed: usize,
}

impl BatchJob {
    /// Start tracking a batch of `total` items.
    pub fn new(kind: BatchKind, total: usize) -> Self {
        Self {
            kind,
            total,
            completed: 0,
        }
    }

    /// Count one settled item, success or failure.
    pub fn record_settlement(&mut self) {
        if self.completed < self.total {
            self.completed += 1;
        }
    }

    /// True once every item has settled.
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

/// Artifacts produced for one prompt of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArtifacts {
    /// Locator of the generated image
    pub image: Option<String>,
    /// Locator of the generated video
    pub video: Option<String>,
    /// Whether a generation for this prompt is in flight
    pub generating: bool,
}
