//! Google Generative Language REST API.
//!
//! - `protocol` - JSON request and response bodies
//! - `transport` - the HTTP seam ([`GeminiTransport`], [`HttpTransport`])
//! - `client` - [`GenerationClient`], the five studio operations

mod client;
mod protocol;
mod transport;

pub use client::{GenerationClient, ModelCatalog, ModelCatalogBuilder};
pub use protocol::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerateVideoResponse,
    GeneratedSample, GenerationConfig, ImagenInstance, ImagenParameters, ImagenPrediction,
    ImagenRequest, ImagenResponse, InlineData, OperationResponse, OperationResult, OperationStatus,
    OutputOptions, Part, PrebuiltVoiceConfig, SpeechConfig, VeoImage, VeoInstance, VeoParameters,
    VeoRequest, VideoLocation, VoiceConfig,
};
pub use transport::{DEFAULT_BASE_URL, GeminiTransport, HttpTransport};
