//! Generation modes a prompt can be routed between.

use serde::{Deserialize, Serialize};

/// One of the four generation modes of the studio.
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
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Story text from an image
    #[default]
    #[display("story")]
    Story,
    /// Narrated speech
    #[display("speech")]
    Speech,
    /// Still images
    #[display("image")]
    Image,
    /// Short videos
    #[display("video")]
    Video,
}
