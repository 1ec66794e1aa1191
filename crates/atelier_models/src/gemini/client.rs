//! The five studio operations over the Generative Language API.

use crate::gemini::protocol::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImagenInstance,
    ImagenParameters, ImagenRequest, ImagenResponse, OperationResponse, OutputOptions, Part,
    SpeechConfig, VeoImage, VeoInstance, VeoParameters, VeoRequest,
};
use crate::gemini::transport::GeminiTransport;
use async_trait::async_trait;
use atelier_core::{
    Credential, GeneratedImage, ImageAspectRatio, VideoOperation, VideoRequest,
};
use atelier_error::{GenerationError, GenerationErrorKind, Operation};
use atelier_interface::{AssetResponse, CredentialProvider, ImageGenerator, VideoBackend};
use atelier_media::{decode_base64, encode_base64};
use derive_getters::Getters;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const DEFAULT_IDEA_COUNT: usize = 4;
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";
const STORY_INSTRUCTION: &str = "Write a short, imaginative story inspired by this image. \
     Keep it under 300 words and give it a title on the first line.";

/// Model ids used for each kind of generation.
///
/// # Examples
///
/// ```
/// use atelier_models::ModelCatalogBuilder;
///
/// let models = ModelCatalogBuilder::default()
///     .video("veo-3.0-generate-preview")
///     .build()
///     .unwrap();
/// assert_eq!(models.video(), "veo-3.0-generate-preview");
/// assert_eq!(models.voice(), "Kore");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ModelCatalog {
    /// Text and vision model (ideas, stories)
    text: String,
    /// Text-to-speech model
    speech: String,
    /// Image model
    image: String,
    /// Video model
    video: String,
    /// Narrator voice for speech
    voice: String,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            text: "gemini-2.5-flash".to_string(),
            speech: "gemini-2.5-flash-preview-tts".to_string(),
            image: "imagen-4.0-generate-001".to_string(),
            video: "veo-2.0-generate-001".to_string(),
            voice: "Kore".to_string(),
        }
    }
}

/// Stateless client for the studio's generation calls.
///
/// Every call issues exactly one request and never retries. The credential is
/// read from the provider per call; the [`VideoBackend`] methods take it
/// explicitly instead.
#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn GeminiTransport>,
    credentials: Arc<dyn CredentialProvider>,
    models: ModelCatalog,
    idea_count: usize,
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("models", &self.models)
            .field("idea_count", &self.idea_count)
            .finish_non_exhaustive()
    }
}

impl GenerationClient {
    /// Create a client.
    pub fn new(
        transport: Arc<dyn GeminiTransport>,
        credentials: Arc<dyn CredentialProvider>,
        models: ModelCatalog,
    ) -> Self {
        Self {
            transport,
            credentials,
            models,
            idea_count: DEFAULT_IDEA_COUNT,
        }
    }

    /// Number of prompts requested by [`generate_ideas`](Self::generate_ideas).
    pub fn with_idea_count(mut self, count: usize) -> Self {
        self.idea_count = count.max(1);
        self
    }

    /// Models in use.
    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    async fn credential(&self, operation: Operation) -> Result<Credential, GenerationError> {
        self.credentials
            .credential()
            .await
            .ok_or_else(|| GenerationError::missing_credential(operation))
    }

    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
        operation: Operation,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let credential = self.credential(operation).await?;
        let body = encode(&request, operation)?;
        let path = format!("models/{}:generateContent", model);
        let response = self
            .transport
            .post_json(&credential, &path, body, operation)
            .await?;
        decode(response, operation)
    }

    /// Ask the text model for a fixed-size list of creative prompts.
    ///
    /// # Errors
    ///
    /// `InvalidResponseShape` if the answer is not a JSON list of strings.
    #[instrument(skip(self))]
    pub async fn generate_ideas(&self) -> Result<Vec<String>, GenerationError> {
        let operation = Operation::Ideas;
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(format!(
                "Generate {} short, vivid and varied creative prompts for an image or video \
                 generator. Each prompt is a single sentence.",
                self.idea_count
            ))])],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                })),
                ..Default::default()
            }),
        };

        let response = self
            .generate_content(&self.models.text, request, operation)
            .await?;
        let text = response.text().ok_or_else(|| {
            GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape("response contained no text".into()),
            )
        })?;

        let ideas: Vec<String> = serde_json::from_str(text.trim()).map_err(|e| {
            GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape(format!(
                    "expected a JSON list of strings: {}",
                    e
                )),
            )
        })?;

        debug!(count = ideas.len(), "Generated ideas");
        Ok(ideas)
    }

    /// Write a story inspired by an image.
    #[instrument(skip(self, image_bytes), fields(size = image_bytes.len()))]
    pub async fn generate_story_from_image(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, GenerationError> {
        let operation = Operation::StoryFromImage;
        if image_bytes.is_empty() {
            return Err(invalid(operation, "image is empty"));
        }
        if mime_type.trim().is_empty() {
            return Err(invalid(operation, "image MIME type is missing"));
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline(mime_type, encode_base64(image_bytes)),
                Part::text(STORY_INSTRUCTION),
            ])],
            generation_config: None,
        };

        let response = self
            .generate_content(&self.models.text, request, operation)
            .await?;
        response.text().ok_or_else(|| {
            GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape("response contained no text".into()),
            )
        })
    }

    /// Narrate `text` with the configured voice.
    ///
    /// Returns raw 24 kHz mono 16-bit PCM, ready for
    /// [`decode_pcm`](atelier_media::decode_pcm).
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn generate_speech_from_text(&self, text: &str) -> Result<Vec<u8>, GenerationError> {
        let operation = Operation::SpeechFromText;
        if text.trim().is_empty() {
            return Err(invalid(operation, "text is empty"));
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(text)])],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig::prebuilt(self.models.voice.as_str())),
                ..Default::default()
            }),
        };

        let response = self
            .generate_content(&self.models.speech, request, operation)
            .await?;
        let audio = response
            .inline_data()
            .ok_or_else(|| GenerationError::new(operation, GenerationErrorKind::NoAudioReturned))?;

        let bytes = decode_base64(&audio.data).map_err(|e| {
            GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape(e.to_string()),
            )
        })?;
        debug!(size = bytes.len(), mime_type = %audio.mime_type, "Received audio");
        Ok(bytes)
    }

    /// Generate exactly one image.
    #[instrument(skip(self))]
    pub async fn generate_image_from_prompt(
        &self,
        prompt: &str,
        aspect_ratio: ImageAspectRatio,
    ) -> Result<GeneratedImage, GenerationError> {
        let operation = Operation::ImageFromPrompt;
        if prompt.trim().is_empty() {
            return Err(invalid(operation, "prompt is empty"));
        }

        let credential = self.credential(operation).await?;
        let request = ImagenRequest {
            instances: vec![ImagenInstance {
                prompt: prompt.to_string(),
            }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.to_string(),
                output_options: Some(OutputOptions {
                    mime_type: DEFAULT_IMAGE_MIME.to_string(),
                }),
            },
        };

        let path = format!("models/{}:predict", self.models.image);
        let response = self
            .transport
            .post_json(&credential, &path, encode(&request, operation)?, operation)
            .await?;
        let response: ImagenResponse = decode(response, operation)?;

        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::new(operation, GenerationErrorKind::NoImageReturned))?;
        let bytes = decode_base64(&prediction.bytes_base64_encoded).map_err(|e| {
            GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape(e.to_string()),
            )
        })?;

        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
        Ok(GeneratedImage::new(mime_type, bytes))
    }

    /// Submit a video job.
    ///
    /// Returns the credential the job was submitted with together with the
    /// initial operation; the poller keeps using that credential.
    ///
    /// # Errors
    ///
    /// `MissingCredential` if no credential is selected; no job is created.
    #[instrument(skip(self, request), fields(prompt = %request.prompt()))]
    pub async fn generate_video(
        &self,
        request: &VideoRequest,
    ) -> Result<(Credential, VideoOperation), GenerationError> {
        let operation = Operation::VideoSubmit;
        validate_video(request)?;
        let credential = self.credential(operation).await?;
        let op = self.submit(&credential, request).await?;
        Ok((credential, op))
    }
}

fn invalid(operation: Operation, message: &str) -> GenerationError {
    GenerationError::new(
        operation,
        GenerationErrorKind::InvalidRequest(message.to_string()),
    )
}

fn validate_video(request: &VideoRequest) -> Result<(), GenerationError> {
    let operation = Operation::VideoSubmit;
    if request.prompt().trim().is_empty() {
        return Err(invalid(operation, "prompt is empty"));
    }
    if let Some(image) = request.start_image() {
        if image.bytes().is_empty() {
            return Err(invalid(operation, "start image is empty"));
        }
        if image.mime_type().trim().is_empty() {
            return Err(invalid(operation, "start image MIME type is missing"));
        }
    }
    Ok(())
}

fn person_generation(allow_people: bool) -> &'static str {
    if allow_people { "allow_adult" } else { "dont_allow" }
}

fn encode<T: Serialize>(body: &T, operation: Operation) -> Result<Value, GenerationError> {
    serde_json::to_value(body).map_err(|e| {
        GenerationError::new(operation, GenerationErrorKind::InvalidRequest(e.to_string()))
    })
}

fn decode<T: DeserializeOwned>(value: Value, operation: Operation) -> Result<T, GenerationError> {
    serde_json::from_value(value).map_err(|e| {
        GenerationError::new(
            operation,
            GenerationErrorKind::InvalidResponseShape(e.to_string()),
        )
    })
}

#[async_trait]
impl VideoBackend for GenerationClient {
    #[instrument(skip(self, credential, request))]
    async fn submit(
        &self,
        credential: &Credential,
        request: &VideoRequest,
    ) -> Result<VideoOperation, GenerationError> {
        let operation = Operation::VideoSubmit;
        validate_video(request)?;

        let image = request.start_image().as_ref().map(|image| VeoImage {
            bytes_base64_encoded: encode_base64(image.bytes()),
            mime_type: image.mime_type().clone(),
        });
        let body = VeoRequest {
            instances: vec![VeoInstance {
                prompt: request.prompt().clone(),
                image,
            }],
            parameters: VeoParameters {
                aspect_ratio: request.aspect_ratio().to_string(),
                duration_seconds: request.duration().seconds(),
                person_generation: person_generation(*request.allow_people()).to_string(),
                sample_count: 1,
            },
        };

        let path = format!("models/{}:predictLongRunning", self.models.video);
        let response = self
            .transport
            .post_json(credential, &path, encode(&body, operation)?, operation)
            .await?;
        let response: OperationResponse = decode(response, operation)?;
        if response.name.is_empty() {
            return Err(GenerationError::new(
                operation,
                GenerationErrorKind::InvalidResponseShape("operation has no name".into()),
            ));
        }

        info!(operation = %response.name, "Submitted video job");
        Ok(response.into_operation())
    }

    #[instrument(skip(self, credential), fields(name = %operation.name()))]
    async fn poll(
        &self,
        credential: &Credential,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, GenerationError> {
        let response = self
            .transport
            .get_json(credential, operation.name(), Operation::VideoPoll)
            .await?;
        let mut response: OperationResponse = decode(response, Operation::VideoPoll)?;
        if response.name.is_empty() {
            response.name = operation.name().clone();
        }
        Ok(response.into_operation())
    }

    #[instrument(skip(self, credential))]
    async fn fetch_asset(
        &self,
        credential: &Credential,
        uri: &str,
    ) -> Result<AssetResponse, GenerationError> {
        self.transport
            .get_bytes(credential, uri, Operation::VideoDownload)
            .await
    }
}

#[async_trait]
impl ImageGenerator for GenerationClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: ImageAspectRatio,
    ) -> Result<GeneratedImage, GenerationError> {
        self.generate_image_from_prompt(prompt, aspect_ratio).await
    }
}
