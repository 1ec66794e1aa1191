//! Aspect ratio and duration types accepted by the image and video models.

use atelier_error::{GenerationError, GenerationErrorKind, Operation};
use serde::{Deserialize, Serialize};

/// Aspect ratios supported for still images.
///
/// # Examples
///
/// ```
/// use atelier_core::ImageAspectRatio;
///
/// let ratio: ImageAspectRatio = "9:16".parse().unwrap();
/// assert_eq!(ratio, ImageAspectRatio::Portrait9x16);
/// assert_eq!(ratio.to_string(), "9:16");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ImageAspectRatio {
    /// Square
    #[default]
    #[display("1:1")]
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// Portrait 3:4
    #[display("3:4")]
    #[strum(serialize = "3:4")]
    #[serde(rename = "3:4")]
    Portrait3x4,
    /// Landscape 4:3
    #[display("4:3")]
    #[strum(serialize = "4:3")]
    #[serde(rename = "4:3")]
    Landscape4x3,
    /// Tall portrait 9:16
    #[display("9:16")]
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Portrait9x16,
    /// Widescreen 16:9
    #[display("16:9")]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Landscape16x9,
}

/// Aspect ratios supported for generated video.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum VideoAspectRatio {
    /// Widescreen 16:9
    #[default]
    #[display("16:9")]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Landscape16x9,
    /// Widescreen 16:10
    #[display("16:10")]
    #[strum(serialize = "16:10")]
    #[serde(rename = "16:10")]
    Landscape16x10,
}

/// Video length in whole seconds, between [`VideoDuration::MIN`] and [`VideoDuration::MAX`].
///
/// # Examples
///
/// ```
/// use atelier_core::VideoDuration;
///
/// assert!(VideoDuration::try_from(5).is_ok());
/// assert!(VideoDuration::try_from(9).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}s", _0)]
pub struct VideoDuration(u8);

impl VideoDuration {
    /// Shortest accepted duration.
    pub const MIN: u8 = 5;
    /// Longest accepted duration.
    pub const MAX: u8 = 8;

    /// Duration in seconds.
    pub fn seconds(&self) -> u8 {
        self.0
    }
}

impl Default for VideoDuration {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl TryFrom<u8> for VideoDuration {
    type Error = GenerationError;

    #[track_caller]
    fn try_from(seconds: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(GenerationError::new(
                Operation::VideoSubmit,
                GenerationErrorKind::InvalidRequest(format!(
                    "duration must be between {} and {} seconds, got {}",
                    Self::MIN,
                    Self::MAX,
                    seconds
                )),
            ))
        }
    }
}

impl From<VideoDuration> for u8 {
    fn from(duration: VideoDuration) -> Self {
        duration.0
    }
}
