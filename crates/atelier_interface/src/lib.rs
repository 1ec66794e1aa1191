//! Trait definitions for the collaborators of the Atelier core.
//!
//! The generation client, the video poller and the batch orchestrator only
//! talk to the outside world through these seams, so each can be driven by a
//! scripted implementation in tests.

mod traits;
mod types;

pub use traits::{
    CredentialProvider, ImageGenerator, KeyValueStore, MediaStore, Sleeper, VideoBackend,
    VideoGenerator,
};
pub use types::{AssetResponse, TokioSleeper};
