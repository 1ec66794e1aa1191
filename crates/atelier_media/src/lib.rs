//! Media codec utilities and audio playback.
//!
//! - [`decode_base64`] / [`encode_base64`] / [`data_url`] handle the inline
//!   payloads the generative service returns.
//! - [`decode_pcm`] turns raw little-endian 16-bit PCM into a normalized
//!   [`AudioBuffer`]; [`encode_wav`] writes one back out as a WAVE file.
//! - [`AudioSink`] plays a buffer and hands back a [`Playback`] that settles
//!   exactly once.
//!
//! # Example
//!
//! ```
//! use atelier_media::decode_pcm;
//!
//! // Two mono samples: 0 and -32768
//! let buffer = decode_pcm(&[0x00, 0x00, 0x00, 0x80], 24_000, 1).unwrap();
//! assert_eq!(buffer.channel(0), Some(&[0.0, -1.0][..]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod pcm;
mod playback;

pub use codec::{data_url, decode_base64, encode_base64};
pub use pcm::{AudioBuffer, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE, decode_pcm, encode_wav};
pub use playback::{AudioSink, Playback, PlaybackController, PlaybackEnd, TimedSink};
