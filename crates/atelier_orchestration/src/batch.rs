//! Batch fan-out over a prompt list.

use atelier_core::{
    BatchJob, BatchKind, ImageAspectRatio, PromptArtifacts, Readiness, VideoRequest,
};
use atelier_error::{GenerationError, Operation};
use atelier_interface::{ImageGenerator, VideoGenerator};
use atelier_media::data_url;
use derive_getters::Getters;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Summary of a finished batch.
#[derive(Debug, Clone, Getters)]
pub struct BatchReport {
    kind: BatchKind,
    total: usize,
    succeeded: Vec<String>,
    failed: Vec<(String, GenerationError)>,
    /// Error that ended a video batch early; later prompts were not attempted
    stopped_by: Option<GenerationError>,
}

impl BatchReport {
    fn new(kind: BatchKind, total: usize) -> Self {
        Self {
            kind,
            total,
            succeeded: Vec::new(),
            failed: Vec::new(),
            stopped_by: None,
        }
    }

    /// True when any item failed for lack of a credential.
    pub fn credential_missing(&self) -> bool {
        self.failed.iter().any(|(_, e)| e.is_missing_credential())
    }
}

/// Runs image and video batches, one at a time.
///
/// Exclusive access (`&mut self`) keeps a single [`BatchJob`] alive at once.
/// The per-prompt board survives the job so results stay visible after the
/// progress indicator is cleared.
pub struct BatchOrchestrator {
    images: Arc<dyn ImageGenerator>,
    videos: Arc<dyn VideoGenerator>,
    progress: watch::Sender<Option<BatchJob>>,
    board: BTreeMap<String, PromptArtifacts>,
    last_job: Option<BatchJob>,
    last_error: Option<GenerationError>,
}

impl std::fmt::Debug for BatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchOrchestrator")
            .field("job", &*self.progress.borrow())
            .field("board", &self.board)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl BatchOrchestrator {
    /// Create an orchestrator over its generators.
    pub fn new(images: Arc<dyn ImageGenerator>, videos: Arc<dyn VideoGenerator>) -> Self {
        let (progress, _) = watch::channel(None);
        Self {
            images,
            videos,
            progress,
            board: BTreeMap::new(),
            last_job: None,
            last_error: None,
        }
    }

    /// Observe progress. Every settlement and the final `None` are published.
    pub fn subscribe(&self) -> watch::Receiver<Option<BatchJob>> {
        self.progress.subscribe()
    }

    /// The running job, if any.
    pub fn job(&self) -> Option<BatchJob> {
        self.progress.borrow().clone()
    }

    /// Artifacts per prompt.
    pub fn board(&self) -> &BTreeMap<String, PromptArtifacts> {
        &self.board
    }

    /// Artifacts for one prompt.
    pub fn artifacts(&self, prompt: &str) -> Option<&PromptArtifacts> {
        self.board.get(prompt)
    }

    /// Final progress of the most recent job, kept after it is cleared.
    pub fn last_job(&self) -> Option<&BatchJob> {
        self.last_job.as_ref()
    }

    /// Error that stopped the last video batch.
    pub fn last_error(&self) -> Option<&GenerationError> {
        self.last_error.as_ref()
    }

    fn start(
        &mut self,
        kind: BatchKind,
        prompts: &[String],
        readiness: Readiness,
    ) -> Result<Vec<String>, GenerationError> {
        if !readiness.is_ready() {
            return Err(GenerationError::missing_credential(Operation::Batch));
        }

        let prompts: Vec<String> = prompts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if !prompts.is_empty() {
            info!(kind = %kind, total = prompts.len(), "Starting batch");
            self.last_error = None;
            self.progress
                .send_replace(Some(BatchJob::new(kind, prompts.len())));
        }
        Ok(prompts)
    }

    fn record_settlement(&self) {
        self.progress.send_modify(|job| {
            if let Some(job) = job {
                job.record_settlement();
            }
        });
    }

    fn finish(&mut self) {
        self.last_job = self.progress.send_replace(None);
    }

    /// Generate one image per prompt, all in flight at once.
    ///
    /// Failures are logged and leave the prompt's image empty; they never
    /// stop the batch. Returns once every item has settled.
    ///
    /// # Errors
    ///
    /// `MissingCredential` without starting a job when `readiness` is not
    /// [`Readiness::Ready`].
    #[instrument(skip(self, prompts), fields(count = prompts.len()))]
    pub async fn generate_images(
        &mut self,
        prompts: &[String],
        aspect_ratio: ImageAspectRatio,
        readiness: Readiness,
    ) -> Result<BatchReport, GenerationError> {
        let prompts = self.start(BatchKind::Images, prompts, readiness)?;
        let mut report = BatchReport::new(BatchKind::Images, prompts.len());

        for prompt in &prompts {
            let slot = self.board.entry(prompt.clone()).or_default();
            slot.image = None;
            slot.generating = true;
        }

        let mut in_flight: FuturesUnordered<_> = prompts
            .into_iter()
            .map(|prompt| {
                let images = Arc::clone(&self.images);
                async move {
                    let result = images.generate_image(&prompt, aspect_ratio).await;
                    (prompt, result)
                }
            })
            .collect();

        while let Some((prompt, result)) = in_flight.next().await {
            let slot = self.board.entry(prompt.clone()).or_default();
            slot.generating = false;
            match result {
                Ok(image) => {
                    debug!(prompt = %prompt, size = image.bytes().len(), "Batch image ready");
                    slot.image = Some(data_url(image.mime_type(), image.bytes()));
                    report.succeeded.push(prompt);
                }
                Err(error) => {
                    warn!(prompt = %prompt, error = %error, "Batch image failed");
                    report.failed.push((prompt, error));
                }
            }
            self.record_settlement();
        }

        self.finish();
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Image batch finished"
        );
        Ok(report)
    }

    /// Generate one video per prompt, strictly in order.
    ///
    /// Every prompt reuses `template`'s settings. The first failure stops the
    /// batch; later prompts are never attempted.
    ///
    /// # Errors
    ///
    /// The failing item's error, or `MissingCredential` without starting a
    /// job when `readiness` is not [`Readiness::Ready`].
    #[instrument(skip(self, prompts, template), fields(count = prompts.len()))]
    pub async fn generate_videos(
        &mut self,
        prompts: &[String],
        template: &VideoRequest,
        readiness: Readiness,
    ) -> Result<BatchReport, GenerationError> {
        let prompts = self.start(BatchKind::Videos, prompts, readiness)?;
        let mut report = BatchReport::new(BatchKind::Videos, prompts.len());

        for prompt in prompts {
            self.board.entry(prompt.clone()).or_default().generating = true;

            let result = self.videos.generate_video(&template.with_prompt(prompt.as_str())).await;

            self.record_settlement();
            let slot = self.board.entry(prompt.clone()).or_default();
            slot.generating = false;

            match result {
                Ok(handle) => {
                    debug!(prompt = %prompt, locator = %handle.locator(), "Batch video ready");
                    slot.video = Some(handle.locator().clone());
                    report.succeeded.push(prompt);
                }
                Err(error) => {
                    warn!(prompt = %prompt, error = %error, "Video batch stopped");
                    self.last_error = Some(error.clone());
                    report.stopped_by = Some(error.clone());
                    report.failed.push((prompt, error));
                    break;
                }
            }
        }

        self.finish();
        info!(
            succeeded = report.succeeded.len(),
            stopped = report.stopped_by.is_some(),
            "Video batch finished"
        );
        Ok(report)
    }
}
