//! Generation requests, one variant per service call.

use crate::{ImageAspectRatio, VideoAspectRatio, VideoDuration};
use atelier_error::Operation;
use derive_getters::Getters;

/// Raw image bytes with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ImageInput {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImageInput {
    /// Wrap image bytes.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Inputs for a video generation job.
///
/// # Examples
///
/// ```
/// use atelier_core::{VideoAspectRatio, VideoDuration, VideoRequestBuilder};
///
/// let request = VideoRequestBuilder::default()
///     .prompt("a lighthouse at dusk")
///     .aspect_ratio(VideoAspectRatio::Landscape16x10)
///     .duration(VideoDuration::try_from(6).unwrap())
///     .allow_people(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.prompt(), "a lighthouse at dusk");
/// assert!(request.start_image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct VideoRequest {
    prompt: String,
    #[builder(default)]
    aspect_ratio: VideoAspectRatio,
    #[builder(default)]
    duration: VideoDuration,
    /// Content-safety flag: whether people may appear in the video
    #[builder(default)]
    allow_people: bool,
    /// Optional first frame
    #[builder(setter(strip_option), default)]
    start_image: Option<ImageInput>,
}

impl VideoRequest {
    /// Request with default aspect ratio and duration, people disallowed.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: VideoAspectRatio::default(),
            duration: VideoDuration::default(),
            allow_people: false,
            start_image: None,
        }
    }

    /// Same request with a different prompt, keeping every other setting.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }
}

/// A single user-initiated generation, carrying only the inputs its call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// A fixed-size list of creative prompts
    IdeaList,
    /// Story text inspired by an image
    StoryFromImage(ImageInput),
    /// Narrated speech for the given text
    SpeechFromText {
        /// Text to narrate
        text: String,
    },
    /// One still image
    ImageFromPrompt {
        /// Image description
        prompt: String,
        /// Requested aspect ratio
        aspect_ratio: ImageAspectRatio,
    },
    /// A video job
    Video(VideoRequest),
}

impl GenerationRequest {
    /// The service operation this request maps to.
    pub fn operation(&self) -> Operation {
        match self {
            GenerationRequest::IdeaList => Operation::Ideas,
            GenerationRequest::StoryFromImage(_) => Operation::StoryFromImage,
            GenerationRequest::SpeechFromText { .. } => Operation::SpeechFromText,
            GenerationRequest::ImageFromPrompt { .. } => Operation::ImageFromPrompt,
            GenerationRequest::Video(_) => Operation::VideoSubmit,
        }
    }
}
