//! JSON bodies of the Generative Language API.
//!
//! Only the fields the studio reads or writes are modelled; unknown response
//! fields are ignored and absent collections default to empty.

use serde::{Deserialize, Serialize};

//
// ─── GENERATE CONTENT (text, vision, speech) ────────────────────────────────
//

/// Body of a `models/{model}:generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; the studio always sends a single user turn
    pub contents: Vec<Content>,

    /// Output constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One turn of content.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Role ("user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn made of `parts`.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// A content part: text, inline data, or (in responses) anything else.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Inline binary payload (images, audio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Inline data part with an already base64-encoded payload.
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Inline data with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type of the payload
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

/// Generation configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response MIME type, `application/json` for schema-constrained output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// JSON schema the response must follow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,

    /// Response modalities (e.g., ["TEXT"], ["AUDIO"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,

    /// Voice selection for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
}

/// Speech output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice configuration
    pub voice_config: VoiceConfig,
}

impl SpeechConfig {
    /// Use the prebuilt voice called `voice_name`.
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        }
    }
}

/// Voice configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// A named prebuilt voice
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A named prebuilt voice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name (e.g., "Kore")
    pub voice_name: String,
}

/// Response of a `generateContent` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate answers, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate answer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate, if it has any text.
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// First inline payload of the first candidate.
    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

//
// ─── IMAGEN (predict) ───────────────────────────────────────────────────────
//

/// Body of a `models/{model}:predict` image call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenRequest {
    /// One instance per prompt
    pub instances: Vec<ImagenInstance>,
    /// Sampling parameters
    pub parameters: ImagenParameters,
}

/// Image prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenInstance {
    /// Image description
    pub prompt: String,
}

/// Image sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenParameters {
    /// Number of images to generate
    pub sample_count: u8,
    /// Aspect ratio as `W:H`
    pub aspect_ratio: String,
    /// Encoding of the returned images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_options: Option<OutputOptions>,
}

/// Encoding of returned images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    /// Image MIME type
    pub mime_type: String,
}

/// Response of an image `predict` call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImagenResponse {
    /// Generated images; filtered prompts yield none
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

/// A generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenPrediction {
    /// Base64-encoded image bytes
    pub bytes_base64_encoded: String,
    /// Image MIME type
    #[serde(default)]
    pub mime_type: Option<String>,
}

//
// ─── VEO (predictLongRunning + operations) ──────────────────────────────────
//

/// Body of a `models/{model}:predictLongRunning` video call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeoRequest {
    /// One instance per video
    pub instances: Vec<VeoInstance>,
    /// Video parameters
    pub parameters: VeoParameters,
}

/// Video prompt with optional first frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeoInstance {
    /// Video description
    pub prompt: String,
    /// First frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VeoImage>,
}

/// First frame of a video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeoImage {
    /// Base64-encoded image bytes
    pub bytes_base64_encoded: String,
    /// Image MIME type
    pub mime_type: String,
}

/// Video parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VeoParameters {
    /// Aspect ratio as `W:H`
    pub aspect_ratio: String,
    /// Length in seconds, 5 to 8
    pub duration_seconds: u8,
    /// `allow_adult` or `dont_allow`
    pub person_generation: String,
    /// Number of videos to generate
    pub sample_count: u8,
}

/// A long-running operation as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    /// Operation handle; poll responses may leave it out
    #[serde(default)]
    pub name: String,
    /// Whether the job has finished
    #[serde(default)]
    pub done: bool,
    /// Result payload, once done
    #[serde(default)]
    pub response: Option<OperationResult>,
    /// Failure status, once done
    #[serde(default)]
    pub error: Option<OperationStatus>,
}

/// Result payload of a finished video operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    /// Generated videos
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated videos.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// One sample per requested video
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

/// One generated video.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSample {
    /// Download location
    #[serde(default)]
    pub video: Option<VideoLocation>,
}

/// Download location of a generated video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLocation {
    /// Download URI
    pub uri: String,
}

/// Failure status of an operation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatus {
    /// Status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

impl OperationResponse {
    /// Download URI of the first generated sample.
    pub fn result_uri(&self) -> Option<&str> {
        self.response
            .as_ref()
            .and_then(|r| r.generate_video_response.as_ref())
            .and_then(|r| r.generated_samples.first())
            .and_then(|s| s.video.as_ref())
            .map(|v| v.uri.as_str())
    }

    /// Convert into the studio's operation value.
    pub fn into_operation(self) -> atelier_core::VideoOperation {
        use atelier_core::VideoOperation;

        if !self.done {
            return VideoOperation::pending(self.name);
        }
        if let Some(status) = &self.error {
            let message = if status.message.is_empty() {
                format!("operation failed with code {}", status.code)
            } else {
                status.message.clone()
            };
            return VideoOperation::failed(self.name, message);
        }
        match self.result_uri().map(str::to_string) {
            Some(uri) => VideoOperation::completed(self.name, uri),
            None => VideoOperation::finished_empty(self.name),
        }
    }
}
