use crate::container::{AUDIO_FORMAT_WAV, FORMAT_VERSION};
use crate::core::{Canvas, FrameRate};
use crate::error::{AgifError, AgifResult};

/// Container header, stored as a UTF-8 JSON section right after the magic.
///
/// Wire field names are camelCase, matching the format as originally shipped.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Format version tag, must equal [`FORMAT_VERSION`].
    pub version: String,
    /// Frame width in pixels, shared by all frames.
    pub width: u32,
    /// Frame height in pixels, shared by all frames.
    pub height: u32,
    /// Frames per second, 1..=60.
    pub frame_rate: u32,
    /// Audio sub-format tag, must equal [`AUDIO_FORMAT_WAV`].
    pub audio_format: String,
    /// Number of frame sections in the container.
    pub num_frames: u32,
    /// Number of audio sections in the container.
    pub num_audio_clips: u32,
}

impl Header {
    /// Build a header for the current format version with derived counts.
    pub fn new(
        canvas: Canvas,
        frame_rate: FrameRate,
        num_frames: usize,
        num_audio_clips: usize,
    ) -> AgifResult<Self> {
        let num_frames = u32::try_from(num_frames)
            .map_err(|_| AgifError::validation("frame count exceeds u32 range"))?;
        let num_audio_clips = u32::try_from(num_audio_clips)
            .map_err(|_| AgifError::validation("audio clip count exceeds u32 range"))?;

        Ok(Self {
            version: FORMAT_VERSION.to_string(),
            width: canvas.width,
            height: canvas.height,
            frame_rate: frame_rate.get(),
            audio_format: AUDIO_FORMAT_WAV.to_string(),
            num_frames,
            num_audio_clips,
        })
    }

    /// Declared frame dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Declared frame rate as a validated [`FrameRate`].
    pub fn frame_rate(&self) -> AgifResult<FrameRate> {
        FrameRate::new(self.frame_rate)
    }

    /// Validate a header read from untrusted bytes.
    ///
    /// Version and audio-format mismatches report the offending value.
    pub fn validate(&self) -> AgifResult<()> {
        if self.version != FORMAT_VERSION {
            return Err(AgifError::format(format!(
                "unsupported version '{}', expected '{FORMAT_VERSION}'",
                self.version
            )));
        }
        if self.audio_format != AUDIO_FORMAT_WAV {
            return Err(AgifError::format(format!(
                "unsupported audio format '{}', expected '{AUDIO_FORMAT_WAV}'",
                self.audio_format
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AgifError::format(format!(
                "frame dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.frame_rate == 0 || self.frame_rate > FrameRate::MAX {
            return Err(AgifError::format(format!(
                "frame rate must be in 1..={}, got {}",
                FrameRate::MAX,
                self.frame_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header::new(
            Canvas::new(320, 240).unwrap(),
            FrameRate::new(12).unwrap(),
            3,
            1,
        )
        .unwrap()
    }

    #[test]
    fn json_uses_camel_case_wire_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        for key in [
            "\"version\"",
            "\"width\"",
            "\"height\"",
            "\"frameRate\"",
            "\"audioFormat\"",
            "\"numFrames\"",
            "\"numAudioClips\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn validate_reports_offending_version() {
        let mut h = sample();
        h.version = "2.0".to_string();
        let err = h.validate().unwrap_err().to_string();
        assert!(err.contains("'2.0'"), "{err}");
    }

    #[test]
    fn validate_reports_offending_audio_format() {
        let mut h = sample();
        h.audio_format = "mp3".to_string();
        let err = h.validate().unwrap_err().to_string();
        assert!(err.contains("'mp3'"), "{err}");
    }

    #[test]
    fn validate_rejects_bad_rate_and_dimensions() {
        let mut h = sample();
        h.frame_rate = 61;
        assert!(h.validate().is_err());

        let mut h = sample();
        h.width = 0;
        assert!(h.validate().is_err());
    }
}
