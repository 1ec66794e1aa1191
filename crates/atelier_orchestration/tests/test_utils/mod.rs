//! Scripted collaborators for orchestration tests.

use async_trait::async_trait;
use atelier_core::{
    Credential, GeneratedImage, ImageAspectRatio, MediaHandle, VideoOperation, VideoRequest,
};
use atelier_error::{GenerationError, GenerationErrorKind, Operation};
use atelier_interface::{
    AssetResponse, CredentialProvider, ImageGenerator, Sleeper, VideoBackend, VideoGenerator,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Hands out a new key on every call, so reuse of a captured key is visible.
#[derive(Default)]
pub struct RotatingCredentials {
    calls: AtomicUsize,
    empty: bool,
}

#[allow(dead_code)]
impl RotatingCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            empty: true,
        }
    }
}

#[async_trait]
impl CredentialProvider for RotatingCredentials {
    async fn has_credential(&self) -> bool {
        !self.empty
    }

    async fn select_credential(&self) {}

    async fn credential(&self) -> Option<Credential> {
        if self.empty {
            return None;
        }
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Some(Credential::new(format!("key-{}", n)))
    }
}

/// Video backend replaying a submission result and a queue of poll results.
pub struct ScriptedBackend {
    submission: VideoOperation,
    polls: Mutex<VecDeque<Result<VideoOperation, GenerationError>>>,
    asset: AssetResponse,
    keys: Mutex<Vec<String>>,
    submits: AtomicUsize,
    poll_count: AtomicUsize,
    fetches: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new(submission: VideoOperation, polls: Vec<VideoOperation>) -> Self {
        Self {
            submission,
            polls: Mutex::new(polls.into_iter().map(Ok).collect()),
            asset: AssetResponse::new(200, "OK", Some("video/mp4".into()), b"mp4-bytes".to_vec()),
            keys: Mutex::new(Vec::new()),
            submits: AtomicUsize::new(0),
            poll_count: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_asset(mut self, asset: AssetResponse) -> Self {
        self.asset = asset;
        self
    }

    pub fn with_poll_error(self, error: GenerationError) -> Self {
        self.polls.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn record_key(&self, credential: &Credential) {
        self.keys
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
    }
}

#[async_trait]
impl VideoBackend for ScriptedBackend {
    async fn submit(
        &self,
        credential: &Credential,
        _request: &VideoRequest,
    ) -> Result<VideoOperation, GenerationError> {
        self.record_key(credential);
        self.submits.fetch_add(1, Ordering::SeqCst);
        Ok(self.submission.clone())
    }

    async fn poll(
        &self,
        credential: &Credential,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, GenerationError> {
        self.record_key(credential);
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(VideoOperation::pending(operation.name().clone())))
    }

    async fn fetch_asset(
        &self,
        credential: &Credential,
        _uri: &str,
    ) -> Result<AssetResponse, GenerationError> {
        self.record_key(credential);
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.asset.clone())
    }
}

/// Sleeper that returns immediately and remembers what it was asked.
#[derive(Default)]
pub struct InstantSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

#[allow(dead_code)]
impl InstantSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Image generator failing for selected prompts.
#[derive(Default)]
pub struct ScriptedImages {
    failing: HashSet<String>,
    missing_credential: bool,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedImages {
    pub fn failing(prompts: &[&str]) -> Self {
        Self {
            failing: prompts.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn without_credential() -> Self {
        Self {
            missing_credential: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    async fn generate_image(
        &self,
        prompt: &str,
        _aspect_ratio: ImageAspectRatio,
    ) -> Result<GeneratedImage, GenerationError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        tokio::task::yield_now().await;

        if self.missing_credential {
            return Err(GenerationError::missing_credential(Operation::ImageFromPrompt));
        }
        if self.failing.contains(prompt) {
            return Err(GenerationError::new(
                Operation::ImageFromPrompt,
                GenerationErrorKind::NoImageReturned,
            ));
        }
        Ok(GeneratedImage::new("image/jpeg", prompt.as_bytes().to_vec()))
    }
}

/// Video generator failing for selected prompts.
#[derive(Default)]
pub struct ScriptedVideos {
    failing: HashSet<String>,
    requests: Mutex<Vec<VideoRequest>>,
}

#[allow(dead_code)]
impl ScriptedVideos {
    pub fn failing(prompts: &[&str]) -> Self {
        Self {
            failing: prompts.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn attempted(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt().clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<VideoRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoGenerator for ScriptedVideos {
    async fn generate_video(&self, request: &VideoRequest) -> Result<MediaHandle, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());

        if self.failing.contains(request.prompt()) {
            return Err(GenerationError::new(
                Operation::VideoPoll,
                GenerationErrorKind::NoDownloadLink,
            ));
        }
        Ok(MediaHandle::new(
            format!("memory://{}", request.prompt()),
            "video/mp4",
            1,
            "hash",
        ))
    }
}
