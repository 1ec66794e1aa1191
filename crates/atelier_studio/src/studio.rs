//! The studio session: one method per user action.

use crate::{PromptRouter, ReadinessGate, StudioConfig};
use atelier_core::{
    BatchJob, HistoryEntry, ImageAspectRatio, ImageInput, MediaHandle, Mode, Readiness,
    VideoRequest,
};
use atelier_error::{AtelierResult, GenerationError, GenerationErrorKind, Operation};
use atelier_interface::{
    CredentialProvider, KeyValueStore, MediaStore, Sleeper, TokioSleeper, VideoBackend,
    VideoGenerator,
};
use atelier_media::{
    AudioBuffer, AudioSink, Playback, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE, TimedSink, data_url,
    decode_pcm,
};
use atelier_models::{GeminiTransport, GenerationClient};
use atelier_orchestration::{BatchOrchestrator, BatchReport, VideoJobPoller};
use atelier_storage::HistoryStore;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Collaborators and settings a [`Studio`] is assembled from.
///
/// # Example
///
/// ```no_run
/// use atelier_models::HttpTransport;
/// use atelier_storage::{MemoryMediaStore, MemoryStore};
/// use atelier_studio::{EnvCredentialProvider, Studio, StudioComponentsBuilder, StudioConfig};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let components = StudioComponentsBuilder::default()
///     .config(StudioConfig::load()?)
///     .credentials(Arc::new(EnvCredentialProvider::default()))
///     .transport(Arc::new(HttpTransport::new()))
///     .key_value(Arc::new(MemoryStore::new()))
///     .media(Arc::new(MemoryMediaStore::new()))
///     .build()?;
/// let studio = Studio::new(components)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned")]
pub struct StudioComponents {
    /// Settings
    config: StudioConfig,
    /// Authorization collaborator
    credentials: Arc<dyn CredentialProvider>,
    /// HTTP access to the service
    transport: Arc<dyn GeminiTransport>,
    /// Persistence for the image history
    key_value: Arc<dyn KeyValueStore>,
    /// Storage for downloaded videos
    media: Arc<dyn MediaStore>,
    /// Audio output
    #[builder(default = "Arc::new(TimedSink) as Arc<dyn AudioSink>")]
    sink: Arc<dyn AudioSink>,
    /// Clock for polling and probing
    #[builder(default = "Arc::new(TokioSleeper) as Arc<dyn Sleeper>")]
    sleeper: Arc<dyn Sleeper>,
}

/// Session state wired to the generation client and orchestrators.
///
/// Every failure is caught here, stored as the last user-facing error and
/// returned. A missing credential also gates the session again.
pub struct Studio {
    client: GenerationClient,
    videos: Arc<VideoJobPoller>,
    gate: ReadinessGate,
    router: PromptRouter,
    history: HistoryStore,
    batch: BatchOrchestrator,
    sink: Arc<dyn AudioSink>,
    last_error: Option<String>,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("readiness", &self.gate.state())
            .field("active", &self.router.active())
            .field("history", &self.history.entries().len())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Studio {
    /// Assemble a studio.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted history cannot be read.
    pub fn new(components: StudioComponents) -> AtelierResult<Self> {
        let StudioComponents {
            config,
            credentials,
            transport,
            key_value,
            media,
            sink,
            sleeper,
        } = components;

        let client = GenerationClient::new(transport, credentials.clone(), config.models().clone())
            .with_idea_count(*config.ideas().count());

        let backend: Arc<dyn VideoBackend> = Arc::new(client.clone());
        let videos = Arc::new(VideoJobPoller::new(
            backend,
            credentials.clone(),
            sleeper.clone(),
            media,
            config.poll_settings(),
        ));

        let batch = BatchOrchestrator::new(Arc::new(client.clone()), videos.clone());
        let gate = ReadinessGate::new(credentials, sleeper, config.probe_interval());
        let history = HistoryStore::load(key_value, *config.history().capacity())?;

        info!(models = ?config.models(), "Studio ready");
        Ok(Self {
            client,
            videos,
            gate,
            router: PromptRouter::default(),
            history,
            batch,
            sink,
            last_error: None,
        })
    }

    fn fail<T>(&mut self, error: GenerationError) -> Result<T, GenerationError> {
        if error.is_missing_credential() {
            self.gate.mark_not_ready();
        }
        warn!(error = %error, "Action failed");
        self.last_error = Some(error.user_message());
        Err(error)
    }

    fn settle<T>(&mut self, result: Result<T, GenerationError>) -> Result<T, GenerationError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => self.fail(error),
        }
    }

    // ─── Readiness ──────────────────────────────────────────────────────────

    /// Resolve the initial readiness state.
    pub async fn check_readiness(&mut self) -> Readiness {
        self.gate.check().await
    }

    /// Select a credential; the session becomes ready and the last error is
    /// cleared.
    pub async fn select_credential(&mut self) {
        self.gate.select_credential().await;
        self.last_error = None;
    }

    /// Current readiness.
    pub fn readiness(&self) -> Readiness {
        self.gate.state()
    }

    /// Observe readiness changes.
    pub fn subscribe_readiness(&self) -> watch::Receiver<Readiness> {
        self.gate.subscribe()
    }

    /// Last user-facing error message.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ─── Single generations ─────────────────────────────────────────────────

    /// Fetch a fresh list of creative prompts.
    #[instrument(skip(self))]
    pub async fn generate_ideas(&mut self) -> Result<Vec<String>, GenerationError> {
        let result = self.client.generate_ideas().await;
        self.settle(result)
    }

    /// Write a story inspired by an image.
    #[instrument(skip(self, image), fields(mime_type = %image.mime_type()))]
    pub async fn generate_story(&mut self, image: &ImageInput) -> Result<String, GenerationError> {
        let result = self
            .client
            .generate_story_from_image(image.bytes(), image.mime_type())
            .await;
        self.settle(result)
    }

    /// Narrate `text` and decode the result into an audio buffer.
    #[instrument(skip(self, text))]
    pub async fn generate_speech(&mut self, text: &str) -> Result<AudioBuffer, GenerationError> {
        let result = match self.client.generate_speech_from_text(text).await {
            Ok(pcm) => decode_pcm(&pcm, SPEECH_SAMPLE_RATE, SPEECH_CHANNELS).map_err(|e| {
                GenerationError::new(
                    Operation::SpeechFromText,
                    GenerationErrorKind::InvalidResponseShape(e.to_string()),
                )
            }),
            Err(e) => Err(e),
        };
        self.settle(result)
    }

    /// Start playing a buffer. Stopping it has no effect on generation.
    pub fn play(&self, buffer: AudioBuffer) -> Playback {
        self.sink.play(buffer)
    }

    /// Generate one image and record it in the history.
    ///
    /// A history that cannot be saved still yields the image; the storage
    /// failure becomes the last error.
    #[instrument(skip(self))]
    pub async fn generate_image(
        &mut self,
        prompt: &str,
        aspect_ratio: ImageAspectRatio,
    ) -> Result<HistoryEntry, GenerationError> {
        let image = match self
            .client
            .generate_image_from_prompt(prompt, aspect_ratio)
            .await
        {
            Ok(image) => image,
            Err(e) => return self.fail(e),
        };

        let entry = HistoryEntry::new(
            data_url(image.mime_type(), image.bytes()),
            prompt,
            aspect_ratio,
        );
        if let Err(e) = self.history.record(entry.clone()) {
            warn!(error = %e, "Failed to persist image history");
            self.last_error = Some(format!("Failed to save image history: {}", e));
        }
        Ok(entry)
    }

    /// Generate a video, polling until it is downloaded.
    #[instrument(skip(self, request), fields(prompt = %request.prompt()))]
    pub async fn generate_video(
        &mut self,
        request: &VideoRequest,
    ) -> Result<MediaHandle, GenerationError> {
        let result = self.videos.generate_video(request).await;
        self.settle(result)
    }

    // ─── Batches ────────────────────────────────────────────────────────────

    /// Generate one image per prompt in parallel.
    ///
    /// Item failures are isolated and listed in the report.
    pub async fn batch_images(
        &mut self,
        prompts: &[String],
        aspect_ratio: ImageAspectRatio,
    ) -> Result<BatchReport, GenerationError> {
        let readiness = self.gate.state();
        let report = match self
            .batch
            .generate_images(prompts, aspect_ratio, readiness)
            .await
        {
            Ok(report) => report,
            Err(e) => return self.fail(e),
        };

        if report.credential_missing() {
            self.gate.mark_not_ready();
            self.last_error =
                Some(GenerationError::missing_credential(Operation::Batch).user_message());
        }
        Ok(report)
    }

    /// Generate one video per prompt in order, stopping at the first failure.
    ///
    /// Videos finished before the failure stay in the report; the failure
    /// itself becomes the last error.
    pub async fn batch_videos(
        &mut self,
        prompts: &[String],
        template: &VideoRequest,
    ) -> Result<BatchReport, GenerationError> {
        let readiness = self.gate.state();
        let report = match self
            .batch
            .generate_videos(prompts, template, readiness)
            .await
        {
            Ok(report) => report,
            Err(e) => return self.fail(e),
        };

        if let Some(error) = report.stopped_by() {
            if error.is_missing_credential() {
                self.gate.mark_not_ready();
            }
            self.last_error = Some(error.user_message());
        }
        Ok(report)
    }

    /// The running batch job, if any.
    pub fn batch_job(&self) -> Option<BatchJob> {
        self.batch.job()
    }

    /// Observe batch progress.
    pub fn subscribe_progress(&self) -> watch::Receiver<Option<BatchJob>> {
        self.batch.subscribe()
    }

    /// Batch results per prompt.
    pub fn batch(&self) -> &BatchOrchestrator {
        &self.batch
    }

    // ─── History and routing ────────────────────────────────────────────────

    /// Recent images, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Forget every recorded image.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted history cannot be removed.
    pub fn clear_history(&mut self) -> AtelierResult<()> {
        self.history.clear()
    }

    /// Hand `prompt` to `target` and switch to it.
    pub fn send_prompt(&mut self, prompt: impl Into<String>, target: Mode) {
        self.router.send(prompt, target);
    }

    /// Prompt routing state.
    pub fn router(&self) -> &PromptRouter {
        &self.router
    }

    /// Mutable prompt routing state.
    pub fn router_mut(&mut self) -> &mut PromptRouter {
        &mut self.router
    }
}
