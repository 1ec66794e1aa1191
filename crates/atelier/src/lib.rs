//! Atelier - a creative studio over generative models
//!
//! Atelier turns prompts and images into ideas, stories, narration, still
//! images and short videos. This crate re-exports the workspace so
//! applications can depend on a single crate.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use atelier::{
//!     EnvCredentialProvider, HttpTransport, ImageAspectRatio, MemoryMediaStore, MemoryStore,
//!     Studio, StudioComponentsBuilder, StudioConfig,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let components = StudioComponentsBuilder::default()
//!         .config(StudioConfig::load()?)
//!         .credentials(Arc::new(EnvCredentialProvider::default()))
//!         .transport(Arc::new(HttpTransport::new()))
//!         .key_value(Arc::new(MemoryStore::new()))
//!         .media(Arc::new(MemoryMediaStore::new()))
//!         .build()?;
//!     let mut studio = Studio::new(components)?;
//!
//!     studio.check_readiness().await;
//!     let entry = studio
//!         .generate_image("a lighthouse at dusk", ImageAspectRatio::Landscape16x9)
//!         .await?;
//!     println!("{}", entry.locator());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use atelier_core::*;
pub use atelier_error::*;
pub use atelier_interface::*;
pub use atelier_media::*;
pub use atelier_models::*;
pub use atelier_orchestration::*;
pub use atelier_storage::*;
pub use atelier_studio::*;
