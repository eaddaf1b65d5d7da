//! PCM to canonical WAV transcoding.
//!
//! Only the encode direction lives here. Turning WAV (or anything else) back
//! into PCM is the host audio-decode capability's job.

/// Decoded interleaved floating-point PCM.
#[derive(Clone, Debug)]
pub struct AudioPcm {
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved `f32` samples in [-1.0, 1.0], time-major then channel.
    pub interleaved_f32: Vec<f32>,
}

/// Byte length of the canonical WAV header.
pub const WAV_HEADER_LEN: usize = 44;

/// Encode PCM as canonical uncompressed WAV: a 44-byte header followed by
/// interleaved little-endian 16-bit samples.
///
/// Samples are clamped to [-1, 1] first; negative values scale by 32768 and
/// non-negative by 32767 so the full signed 16-bit range is hit exactly.
/// The asymmetry is part of the format contract, kept for bit-exact
/// reproducibility. Total for any input, including out-of-range floats.
pub fn encode_wav_s16le(pcm: &AudioPcm) -> Vec<u8> {
    let data_len = (pcm.interleaved_f32.len() * 2) as u32;
    let block_align = pcm.channels * 2;
    let byte_rate = pcm.sample_rate * u32::from(block_align);

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format tag
    out.extend_from_slice(&pcm.channels.to_le_bytes());
    out.extend_from_slice(&pcm.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for &sample in &pcm.interleaved_f32 {
        let s = sample.clamp(-1.0, 1.0);
        let v = if s < 0.0 {
            (s * 32768.0) as i16
        } else {
            (s * 32767.0) as i16
        };
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}
