//! Long-running video generation operations.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// An in-flight or completed video job owned by the external service.
///
/// Polling replaces the whole value with the service's latest
/// representation; fields are never merged.
///
/// # Examples
///
/// ```
/// use atelier_core::VideoOperation;
///
/// let op = VideoOperation::pending("operations/abc");
/// assert!(!op.done());
///
/// let done = VideoOperation::completed("operations/abc", "https://example.com/v.mp4");
/// assert_eq!(done.result_uri().as_deref(), Some("https://example.com/v.mp4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct VideoOperation {
    /// Opaque operation handle
    name: String,
    /// Whether the service has finished the job
    #[getter(skip)]
    done: bool,
    /// Locator of the generated asset, once done
    result_uri: Option<String>,
    /// Service-reported failure message, once done
    error: Option<String>,
}

impl VideoOperation {
    /// An operation still running on the service.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: false,
            result_uri: None,
            error: None,
        }
    }

    /// A finished operation with its result locator.
    pub fn completed(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result_uri: Some(uri.into()),
            error: None,
        }
    }

    /// A finished operation without any result locator.
    pub fn finished_empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result_uri: None,
            error: None,
        }
    }

    /// A finished operation that the service reports as failed.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            result_uri: None,
            error: Some(message.into()),
        }
    }

    /// Whether the service reports the job as finished.
    pub fn done(&self) -> bool {
        self.done
    }
}
