//! Generation error types.
//!
//! Every call to the external generative service funnels its failures into a
//! single [`GenerationError`] that names the operation and carries the
//! underlying message.

/// The generation operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Operation {
    /// Creative prompt list
    #[display("generate-ideas")]
    Ideas,
    /// Story text from an uploaded image
    #[display("generate-story-from-image")]
    StoryFromImage,
    /// Narrated speech from text
    #[display("generate-speech-from-text")]
    SpeechFromText,
    /// Still image from a prompt
    #[display("generate-image-from-prompt")]
    ImageFromPrompt,
    /// Video job submission
    #[display("generate-video")]
    VideoSubmit,
    /// Video job status poll
    #[display("poll-video")]
    VideoPoll,
    /// Video asset download
    #[display("download-video")]
    VideoDownload,
    /// Batch fan-out over several prompts
    #[display("batch")]
    Batch,
}

/// Specific failure conditions of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport or service fault
    #[display("{}", _0)]
    Upstream(String),
    /// Response did not have the expected structure
    #[display("Unexpected response shape: {}", _0)]
    InvalidResponseShape(String),
    /// Speech response carried no inline audio payload
    #[display("No audio data returned")]
    NoAudioReturned,
    /// Image response carried zero images
    #[display("No image was generated")]
    NoImageReturned,
    /// Finished video operation carried no result locator
    #[display("Video generation finished without a download link")]
    NoDownloadLink,
    /// Video asset fetch returned a non-success status
    #[display("Failed to download video: {} {}", status_text, body)]
    DownloadFailed {
        /// HTTP status line text
        status_text: String,
        /// Response body, as text
        body: String,
    },
    /// No authorization context was available
    #[display("No API key selected")]
    MissingCredential,
    /// A required input was missing or blank
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Generation error with operation name and location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{GenerationError, GenerationErrorKind, Operation};
///
/// let err = GenerationError::new(Operation::ImageFromPrompt, GenerationErrorKind::NoImageReturned);
/// assert!(format!("{}", err).contains("generate-image-from-prompt"));
/// assert_eq!(err.user_message(), "generate-image-from-prompt failed: No image was generated");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} failed: {} at line {} in {}", operation, kind, line, file)]
pub struct GenerationError {
    /// Operation that failed
    pub operation: Operation,
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(operation: Operation, kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            operation,
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an upstream fault.
    #[track_caller]
    pub fn upstream(operation: Operation, message: impl Into<String>) -> Self {
        Self::new(operation, GenerationErrorKind::Upstream(message.into()))
    }

    /// Shorthand for a missing credential.
    #[track_caller]
    pub fn missing_credential(operation: Operation) -> Self {
        Self::new(operation, GenerationErrorKind::MissingCredential)
    }

    /// True when the failure was caused by an absent credential.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::MissingCredential)
    }

    /// Message suitable for showing to the user, without source locations.
    pub fn user_message(&self) -> String {
        format!("{} failed: {}", self.operation, self.kind)
    }
}
