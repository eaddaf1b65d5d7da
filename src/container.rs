pub mod decode;
pub mod encode;
pub mod header;
pub mod trigger;

use crate::core::{Canvas, FrameRate};
use crate::error::{AgifError, AgifResult};
use self::header::Header;
use self::trigger::TriggerMap;

/// Leading magic of every `.agif` byte stream.
pub const MAGIC: [u8; 4] = *b"AGIF";

/// The single container version this crate reads and writes.
pub const FORMAT_VERSION: &str = "1.0";

/// The single audio sub-format the container carries.
pub const AUDIO_FORMAT_WAV: &str = "wav";

/// In-memory form of one `.agif` artifact: header, encoded frame images,
/// canonical WAV clips, and the trigger map binding clips to frames.
///
/// Frames and clips are held as their *encoded* bytes; decoding into
/// renderable surfaces and playable PCM happens at playback load time, not
/// here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    /// Validated header. Its counts always match the vectors below.
    pub header: Header,
    /// Encoded still-image bytes, position = frame number.
    pub frames: Vec<Vec<u8>>,
    /// Canonical WAV byte buffers, position = clip index.
    pub audio_clips: Vec<Vec<u8>>,
    /// Frame/clip bindings plus the loop flag.
    pub triggers: TriggerMap,
}

impl Container {
    /// Assemble a container from authoring inputs.
    ///
    /// Header counts are derived from the supplied sequences so they cannot
    /// disagree. Trigger indices are validated against those counts here;
    /// [`Container::decode`] deliberately does not, since out-of-range
    /// triggers in existing files are permissible data the scheduler skips.
    pub fn new(
        canvas: Canvas,
        frame_rate: FrameRate,
        frames: Vec<Vec<u8>>,
        audio_clips: Vec<Vec<u8>>,
        triggers: TriggerMap,
    ) -> AgifResult<Self> {
        for t in &triggers.frame_triggers {
            if t.frame as usize >= frames.len() {
                return Err(AgifError::validation(format!(
                    "trigger references frame {} but only {} frame(s) exist",
                    t.frame,
                    frames.len()
                )));
            }
            if t.audio as usize >= audio_clips.len() {
                return Err(AgifError::validation(format!(
                    "trigger references audio clip {} but only {} clip(s) exist",
                    t.audio,
                    audio_clips.len()
                )));
            }
        }

        let header = Header::new(canvas, frame_rate, frames.len(), audio_clips.len())?;
        Ok(Self {
            header,
            frames,
            audio_clips,
            triggers,
        })
    }

    /// Serialize to the `.agif` wire layout.
    pub fn encode(&self) -> AgifResult<Vec<u8>> {
        encode::encode(self)
    }

    /// Parse and validate a `.agif` byte buffer.
    pub fn decode(bytes: &[u8]) -> AgifResult<Self> {
        decode::decode(bytes)
    }
}
