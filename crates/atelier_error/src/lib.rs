//! Error types for the Atelier creative suite.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, ConfigError};
//!
//! fn load() -> AtelierResult<String> {
//!     Err(ConfigError::new("missing [models] section"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod media;
mod storage;

pub use config::ConfigError;
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
pub use generation::{GenerationError, GenerationErrorKind, Operation};
pub use json::JsonError;
pub use media::{MediaError, MediaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
