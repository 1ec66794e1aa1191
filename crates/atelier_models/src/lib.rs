//! Generation client for the Gemini family of models.
//!
//! [`GenerationClient`] exposes the five service calls of the studio: prompt
//! ideas, story from image, speech from text, image from prompt and video job
//! submission. Each call validates its inputs, issues exactly one request
//! through a [`GeminiTransport`] and normalizes every failure into a
//! [`GenerationError`](atelier_error::GenerationError) naming the operation.
//!
//! The client also implements the [`VideoBackend`](atelier_interface::VideoBackend)
//! and [`ImageGenerator`](atelier_interface::ImageGenerator) seams used by the
//! orchestration layer.
//!
//! # Example
//!
//! ```no_run
//! use atelier_core::{Credential, ImageAspectRatio};
//! use atelier_models::{GenerationClient, HttpTransport, ModelCatalog};
//! use std::sync::Arc;
//!
//! # async fn run(credentials: Arc<dyn atelier_interface::CredentialProvider>) -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenerationClient::new(
//!     Arc::new(HttpTransport::new()),
//!     credentials,
//!     ModelCatalog::default(),
//! );
//! let image = client
//!     .generate_image_from_prompt("a red fox in snow", ImageAspectRatio::Landscape16x9)
//!     .await?;
//! println!("{} bytes", image.bytes().len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    Candidate, Content, DEFAULT_BASE_URL, GeminiTransport, GenerateContentRequest,
    GenerateContentResponse, GenerateVideoResponse, GeneratedSample, GenerationClient,
    GenerationConfig, HttpTransport, ImagenInstance, ImagenParameters, ImagenPrediction,
    ImagenRequest, ImagenResponse, InlineData, ModelCatalog, ModelCatalogBuilder,
    OperationResponse, OperationResult, OperationStatus, OutputOptions, Part, PrebuiltVoiceConfig,
    SpeechConfig, VeoImage, VeoInstance, VeoParameters, VeoRequest, VideoLocation, VoiceConfig,
};
