//! Base64 helpers for inline media payloads.

use atelier_error::{MediaError, MediaErrorKind};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Decode standard, padded base64 into raw bytes.
///
/// # Errors
///
/// Returns [`MediaErrorKind::Decode`] when `text` is not valid base64.
#[track_caller]
pub fn decode_base64(text: &str) -> Result<Vec<u8>, MediaError> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| MediaError::new(MediaErrorKind::Decode(e.to_string())))
}

/// Encode raw bytes as standard, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Build a `data:` URL, the locator form used for generated images.
///
/// # Examples
///
/// ```
/// use atelier_media::data_url;
///
/// assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
/// ```
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, encode_base64(bytes))
}
