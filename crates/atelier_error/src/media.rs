//! Media codec error types.

/// Failures of the media codec utilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// Input was not valid base64
    #[display("Base64 decode error: {}", _0)]
    Decode(String),
    /// PCM byte stream does not fit the requested layout
    #[display("Malformed audio: {}", _0)]
    MalformedAudio(String),
}

/// Media error with location tracking.
///
/// # Examples
///
/// ```
/// use atelier_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::MalformedAudio("odd byte length".to_string()));
/// assert!(format!("{}", err).contains("odd byte length"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
