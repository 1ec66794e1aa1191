//! Core data types for the Atelier creative suite.
//!
//! This crate provides the data model shared by the generation client, the
//! orchestration layer and the studio session.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aspect;
mod batch;
mod credential;
mod history;
mod media;
mod mode;
mod readiness;
mod request;
mod video;

pub use aspect::{ImageAspectRatio, VideoAspectRatio, VideoDuration};
pub use batch::{BatchJob, BatchKind, PromptArtifacts};
pub use credential::Credential;
pub use history::HistoryEntry;
pub use media::{GeneratedImage, MediaHandle};
pub use mode::Mode;
pub use readiness::Readiness;
pub use request::{GenerationRequest, ImageInput, VideoRequest, VideoRequestBuilder};
pub use video::VideoOperation;
