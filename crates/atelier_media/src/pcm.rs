//! Raw PCM decoding into normalized sample buffers.

use atelier_error::{MediaError, MediaErrorKind};
use derive_getters::Getters;
use std::time::Duration;

/// Sample rate of the speech model's raw audio output.
pub const SPEECH_SAMPLE_RATE: u32 = 24_000;

/// Channel count of the speech model's raw audio output.
pub const SPEECH_CHANNELS: u16 = 1;

/// De-interleaved floating point audio, one sample sequence per channel.
///
/// Every channel has the same length and every sample lies in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct AudioBuffer {
    sample_rate: u32,
    #[getter(skip)]
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples of one channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Playback length at the buffer's sample rate.
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }
}

/// Interpret `bytes` as interleaved little-endian signed 16-bit PCM.
///
/// Each sample is divided by 32768 and routed to its channel, producing
/// `channel_count` sequences of `bytes.len() / 2 / channel_count` samples.
///
/// # Errors
///
/// Returns [`MediaErrorKind::MalformedAudio`] if the buffer is empty, the
/// length is not a multiple of `2 * channel_count`, or either the sample rate
/// or the channel count is zero.
#[track_caller]
pub fn decode_pcm(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: u16,
) -> Result<AudioBuffer, MediaError> {
    let malformed = |message: String| MediaError::new(MediaErrorKind::MalformedAudio(message));

    if channel_count == 0 {
        return Err(malformed("channel count must be positive".to_string()));
    }
    if sample_rate == 0 {
        return Err(malformed("sample rate must be positive".to_string()));
    }
    let frame_bytes = 2 * usize::from(channel_count);
    if bytes.is_empty() || bytes.len() % frame_bytes != 0 {
        return Err(malformed(format!(
            "{} bytes is not a positive multiple of {} ({} channel(s) of 16-bit samples)",
            bytes.len(),
            frame_bytes,
            channel_count
        )));
    }

    let frames = bytes.len() / frame_bytes;
    let mut channels = vec![Vec::with_capacity(frames); usize::from(channel_count)];
    for (index, pair) in bytes.chunks_exact(2).enumerate() {
        let sample = i16::from_le_bytes([pair[0], pair[1]]);
        channels[index % usize::from(channel_count)].push(f32::from(sample) / 32768.0);
    }

    tracing::trace!(frames, channel_count, sample_rate, "Decoded PCM buffer");
    Ok(AudioBuffer {
        sample_rate,
        channels,
    })
}

/// Write a buffer as a 16-bit PCM RIFF/WAVE file.
pub fn encode_wav(buffer: &AudioBuffer) -> Vec<u8> {
    let channels = buffer.channel_count() as u16;
    let frames = buffer.frames();
    let block_align = channels * 2;
    let data_len = (frames * usize::from(block_align)) as u32;
    let byte_rate = buffer.sample_rate * u32::from(block_align);

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());

    for frame in 0..frames {
        for channel in &buffer.channels {
            let sample = (channel[frame] * 32768.0).round().clamp(-32768.0, 32767.0) as i16;
            out.extend_from_slice(&sample.to_le_bytes());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_samples_are_deinterleaved() {
        // L: 16384, R: -16384, L: 0, R: 32767
        let bytes = [0x00, 0x40, 0x00, 0xC0, 0x00, 0x00, 0xFF, 0x7F];
        let buffer = decode_pcm(&bytes, 44_100, 2).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 2);
        assert_eq!(buffer.channel(0).unwrap(), &[0.5, 0.0]);
        assert_eq!(buffer.channel(1).unwrap()[0], -0.5);
        assert!((buffer.channel(1).unwrap()[1] - 32767.0 / 32768.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_wav_header_describes_buffer() {
        let buffer = decode_pcm(&[0x01, 0x00, 0x02, 0x00], 24_000, 1).unwrap();
        let wav = encode_wav(&buffer);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 24_000);
        assert_eq!(wav.len(), 44 + 4);
        assert_eq!(&wav[44..], &[0x01, 0x00, 0x02, 0x00]);
    }
}
