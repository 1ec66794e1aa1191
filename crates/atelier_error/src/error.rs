//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, JsonError, MediaError, StorageError};

/// Every error condition the workspace can surface.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AtelierErrorKind {
    /// Media codec error
    #[from(MediaError)]
    Media(MediaError),
    /// Generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Atelier error with kind discrimination.
///
/// # Examples
///
/// ```
/// use atelier_error::{AtelierError, AtelierErrorKind, StorageError, StorageErrorKind};
///
/// let err: AtelierError = StorageError::new(StorageErrorKind::FileRead("x".into())).into();
/// assert!(matches!(err.kind(), AtelierErrorKind::Storage(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Atelier Error: {}", _0)]
pub struct AtelierError(Box<AtelierErrorKind>);

impl AtelierError {
    /// Create a new error from a kind.
    pub fn new(kind: AtelierErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AtelierErrorKind {
        &self.0
    }

    /// Returns the generation error, if this is one.
    pub fn as_generation(&self) -> Option<&GenerationError> {
        match self.kind() {
            AtelierErrorKind::Generation(e) => Some(e),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to AtelierErrorKind
impl<T> From<T> for AtelierError
where
    T: Into<AtelierErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Atelier operations.
pub type AtelierResult<T> = std::result::Result<T, AtelierError>;
