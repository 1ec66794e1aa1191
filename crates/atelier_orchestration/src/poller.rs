//! Video job poller.
//!
//! A job moves through `Submitted → Polling → {Completed | Failed}`. Each
//! transition is one call to [`VideoJobPoller::advance`]; [`VideoJobPoller::run`]
//! loops until a terminal state. The credential captured at submission is
//! carried in the state and used for every poll and for the download.

use async_trait::async_trait;
use atelier_core::{Credential, MediaHandle, VideoOperation, VideoRequest};
use atelier_error::{GenerationError, GenerationErrorKind, Operation};
use atelier_interface::{CredentialProvider, MediaStore, Sleeper, VideoBackend, VideoGenerator};
use derive_getters::Getters;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_MIME_TYPE: &str = "video/mp4";

/// Polling cadence.
///
/// # Examples
///
/// ```
/// use atelier_orchestration::PollSettingsBuilder;
/// use std::time::Duration;
///
/// let settings = PollSettingsBuilder::default()
///     .interval(Duration::from_secs(2))
///     .max_polls(Some(30))
///     .build()
///     .unwrap();
/// assert_eq!(*settings.max_polls(), Some(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(default)]
pub struct PollSettings {
    /// Delay before each status query
    interval: Duration,
    /// Give up after this many polls; unbounded when `None`
    max_polls: Option<u32>,
}

impl PollSettings {
    /// Poll every `interval`, at most `max_polls` times when set.
    pub fn new(interval: Duration, max_polls: Option<u32>) -> Self {
        Self {
            interval,
            max_polls,
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_polls: None,
        }
    }
}

/// State of one video job.
#[derive(Debug, Clone)]
pub enum JobState {
    /// The service accepted the job
    Submitted {
        /// Credential captured at submission
        credential: Credential,
        /// Operation returned by the submission
        operation: VideoOperation,
    },
    /// Waiting for the service to finish
    Polling {
        /// Credential captured at submission
        credential: Credential,
        /// Latest operation as reported by the service
        operation: VideoOperation,
        /// Status queries issued so far
        polls: u32,
    },
    /// The asset was downloaded and stored
    Completed {
        /// Stored asset
        handle: MediaHandle,
        /// Status queries issued
        polls: u32,
    },
    /// The job cannot finish
    Failed {
        /// Why
        error: GenerationError,
        /// Status queries issued
        polls: u32,
    },
}

impl JobState {
    /// True for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Failed { .. })
    }

    /// Status queries issued so far.
    pub fn polls(&self) -> u32 {
        match self {
            JobState::Submitted { .. } => 0,
            JobState::Polling { polls, .. }
            | JobState::Completed { polls, .. }
            | JobState::Failed { polls, .. } => *polls,
        }
    }
}

/// Outcome of [`VideoJobPoller::run`].
#[derive(Debug, Clone, Getters)]
pub struct VideoJobReport {
    result: Result<MediaHandle, GenerationError>,
    polls: u32,
}

impl VideoJobReport {
    /// Consume the report, yielding the result.
    pub fn into_result(self) -> Result<MediaHandle, GenerationError> {
        self.result
    }
}

/// Drives video jobs to completion.
pub struct VideoJobPoller {
    backend: Arc<dyn VideoBackend>,
    credentials: Arc<dyn CredentialProvider>,
    sleeper: Arc<dyn Sleeper>,
    store: Arc<dyn MediaStore>,
    settings: PollSettings,
}

impl std::fmt::Debug for VideoJobPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoJobPoller")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl VideoJobPoller {
    /// Create a poller over its collaborators.
    pub fn new(
        backend: Arc<dyn VideoBackend>,
        credentials: Arc<dyn CredentialProvider>,
        sleeper: Arc<dyn Sleeper>,
        store: Arc<dyn MediaStore>,
        settings: PollSettings,
    ) -> Self {
        Self {
            backend,
            credentials,
            sleeper,
            store,
            settings,
        }
    }

    /// Polling cadence in use.
    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Capture the current credential and submit the job.
    ///
    /// Fails with `MissingCredential` before contacting the service when no
    /// credential is selected.
    #[instrument(skip(self, request), fields(prompt = %request.prompt()))]
    pub async fn submit(&self, request: &VideoRequest) -> JobState {
        let Some(credential) = self.credentials.credential().await else {
            warn!("No credential selected, video job not submitted");
            return JobState::Failed {
                error: GenerationError::missing_credential(Operation::VideoSubmit),
                polls: 0,
            };
        };

        match self.backend.submit(&credential, request).await {
            Ok(operation) => {
                info!(name = %operation.name(), "Video job submitted");
                JobState::Submitted {
                    credential,
                    operation,
                }
            }
            Err(error) => JobState::Failed { error, polls: 0 },
        }
    }

    /// Perform one transition. Terminal states are returned unchanged.
    pub async fn advance(&self, state: JobState) -> JobState {
        match state {
            JobState::Submitted {
                credential,
                operation,
            } => self.settle(credential, operation, 0).await,
            JobState::Polling {
                credential,
                operation,
                polls,
            } => {
                if let Some(max) = self.settings.max_polls {
                    if polls >= max {
                        warn!(polls, "Giving up on video job");
                        return JobState::Failed {
                            error: GenerationError::upstream(
                                Operation::VideoPoll,
                                format!("gave up after {} polls", polls),
                            ),
                            polls,
                        };
                    }
                }

                self.sleeper.sleep(self.settings.interval).await;
                let polls = polls + 1;
                match self.backend.poll(&credential, &operation).await {
                    Ok(latest) => {
                        debug!(polls, done = latest.done(), "Polled video job");
                        self.settle(credential, latest, polls).await
                    }
                    Err(error) => JobState::Failed { error, polls },
                }
            }
            terminal => terminal,
        }
    }

    /// Submit and drive a job to a terminal state.
    #[instrument(skip(self, request))]
    pub async fn run(&self, request: &VideoRequest) -> VideoJobReport {
        let mut state = self.submit(request).await;
        while !state.is_terminal() {
            state = self.advance(state).await;
        }

        match state {
            JobState::Completed { handle, polls } => {
                info!(polls, locator = %handle.locator(), "Video job completed");
                VideoJobReport {
                    result: Ok(handle),
                    polls,
                }
            }
            JobState::Failed { error, polls } => {
                warn!(polls, error = %error, "Video job failed");
                VideoJobReport {
                    result: Err(error),
                    polls,
                }
            }
            // The loop only exits on a terminal state
            other => VideoJobReport {
                polls: other.polls(),
                result: Err(GenerationError::upstream(
                    Operation::VideoPoll,
                    "video job stopped before finishing",
                )),
            },
        }
    }

    async fn settle(
        &self,
        credential: Credential,
        operation: VideoOperation,
        polls: u32,
    ) -> JobState {
        if !operation.done() {
            return JobState::Polling {
                credential,
                operation,
                polls,
            };
        }

        if let Some(message) = operation.error() {
            return JobState::Failed {
                error: GenerationError::upstream(Operation::VideoPoll, message.clone()),
                polls,
            };
        }

        let Some(uri) = operation.result_uri() else {
            return JobState::Failed {
                error: GenerationError::new(Operation::VideoPoll, GenerationErrorKind::NoDownloadLink),
                polls,
            };
        };

        match self.download(&credential, uri).await {
            Ok(handle) => JobState::Completed { handle, polls },
            Err(error) => JobState::Failed { error, polls },
        }
    }

    async fn download(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<MediaHandle, GenerationError> {
        let operation = Operation::VideoDownload;
        let asset = self.backend.fetch_asset(credential, uri).await?;

        if !asset.is_success() {
            return Err(GenerationError::new(
                operation,
                GenerationErrorKind::DownloadFailed {
                    status_text: asset.status_text().clone(),
                    body: String::from_utf8_lossy(asset.body()).into_owned(),
                },
            ));
        }

        let mime_type = asset
            .content_type()
            .clone()
            .filter(|m| m.starts_with("video/"))
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let body = asset.into_body();

        self.store
            .store(&body, &mime_type)
            .await
            .map_err(|e| GenerationError::upstream(operation, e.to_string()))
    }
}

#[async_trait]
impl VideoGenerator for VideoJobPoller {
    async fn generate_video(&self, request: &VideoRequest) -> Result<MediaHandle, GenerationError> {
        self.run(request).await.into_result()
    }
}
