//! Session state for the Atelier creative suite.
//!
//! [`Studio`] owns the per-session state objects and exposes one method per
//! user action:
//!
//! - [`ReadinessGate`]: whether a credential is selected
//! - [`PromptRouter`]: hand-off of prompts between modes
//! - the bounded image history and the batch orchestrator
//!
//! Configuration is loaded by [`StudioConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod readiness;
mod router;
mod studio;

pub use config::{
    HistoryConfig, IdeasConfig, ReadinessConfig, StorageConfig, StudioConfig, VideoConfig,
};
pub use credentials::{API_KEY_VAR, EnvCredentialProvider};
pub use readiness::ReadinessGate;
pub use router::PromptRouter;
pub use studio::{Studio, StudioComponents, StudioComponentsBuilder, StudioComponentsBuilderError};
