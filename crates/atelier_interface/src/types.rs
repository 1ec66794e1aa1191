//! Shared value types and default collaborator implementations.

use crate::Sleeper;
use async_trait::async_trait;
use derive_getters::Getters;
use std::time::Duration;

/// Raw response of an asset download.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AssetResponse {
    status: u16,
    status_text: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl AssetResponse {
    /// Create an asset response.
    pub fn new(
        status: u16,
        status_text: impl Into<String>,
        content_type: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            content_type,
            body,
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Consume the response, yielding the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
