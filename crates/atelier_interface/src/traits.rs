//! Collaborator traits.

use crate::AssetResponse;
use async_trait::async_trait;
use atelier_core::{
    Credential, GeneratedImage, ImageAspectRatio, MediaHandle, VideoOperation, VideoRequest,
};
use atelier_error::{AtelierResult, GenerationError};
use std::time::Duration;

/// The authorization collaborator that owns the user's API key.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Whether the collaborator itself has finished loading.
    async fn is_available(&self) -> bool {
        true
    }

    /// Whether a credential has been selected.
    async fn has_credential(&self) -> bool;

    /// Ask the user to select a credential. Assumed to succeed.
    async fn select_credential(&self);

    /// The current credential, if any.
    async fn credential(&self) -> Option<Credential>;
}

/// A string key-value store used for small persisted state.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> AtelierResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> AtelierResult<()>;

    /// Remove `key` if present.
    fn remove(&self, key: &str) -> AtelierResult<()>;
}

/// Storage that turns downloaded bytes into a locally addressable handle.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store media bytes and return a handle to them.
    async fn store(&self, data: &[u8], mime_type: &str) -> AtelierResult<MediaHandle>;

    /// Read back the bytes behind a handle.
    async fn retrieve(&self, handle: &MediaHandle) -> AtelierResult<Vec<u8>>;
}

/// Suspends the caller for a fixed delay.
///
/// Injected wherever the core waits on the clock so tests can run polling
/// loops without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// The three remote calls behind a video job.
///
/// Every call takes the credential explicitly: the poller captures one at
/// submission and reuses it for every poll and for the download.
#[async_trait]
pub trait VideoBackend: Send + Sync {
    /// Submit a job and return the initial operation.
    async fn submit(
        &self,
        credential: &Credential,
        request: &VideoRequest,
    ) -> Result<VideoOperation, GenerationError>;

    /// Fetch the latest representation of an operation.
    async fn poll(
        &self,
        credential: &Credential,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, GenerationError>;

    /// Download the asset behind a result locator.
    ///
    /// Non-success statuses are returned, not raised; transport faults are errors.
    async fn fetch_asset(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<AssetResponse, GenerationError>;
}

/// Produces a single image for a prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate exactly one image.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: ImageAspectRatio,
    ) -> Result<GeneratedImage, GenerationError>;
}

/// Runs the whole video pipeline: submit, poll to completion, download.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Generate a video and return a handle to the stored asset.
    async fn generate_video(&self, request: &VideoRequest) -> Result<MediaHandle, GenerationError>;
}
