use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::container::header::Header;
use crate::container::trigger::TriggerMap;
use crate::container::{Container, MAGIC};
use crate::error::{AgifError, AgifResult};

/// Bounds-checked reader over an untrusted byte buffer.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize, what: &str) -> AgifResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                AgifError::format(format!(
                    "truncated {what}: need {n} byte(s) at offset {}, buffer ends at {}",
                    self.pos,
                    self.buf.len()
                ))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u32_le(&mut self, what: &str) -> AgifResult<u32> {
        let bytes = self.take(4, what)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read one `u32 LE length` + payload section.
    fn read_section(&mut self, what: &str) -> AgifResult<&'a [u8]> {
        let len = self.read_u32_le(what)? as usize;
        self.take(len, what)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

/// Parse and validate a `.agif` byte buffer.
///
/// Validation is a sequence of hard stops: magic, header JSON, header field
/// values, per-section bounds, trigger JSON, and finally an exact
/// end-of-buffer check. Nothing is returned on any failure; decode never
/// partially succeeds. Frames come back base64-decoded to their original
/// encoded-image bytes, but neither images nor audio are decoded to
/// renderable/playable form here.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub(crate) fn decode(bytes: &[u8]) -> AgifResult<Container> {
    let mut cur = Cursor::new(bytes);

    let magic = cur.take(MAGIC.len(), "magic")?;
    if magic != MAGIC {
        return Err(AgifError::format(format!(
            "bad magic {:?}, expected \"AGIF\"",
            magic.escape_ascii().to_string()
        )));
    }

    let header_bytes = cur.read_section("header")?;
    let header: Header = serde_json::from_slice(header_bytes)
        .map_err(|e| AgifError::format(format!("invalid header JSON: {e}")))?;
    header.validate()?;

    let mut frames = Vec::new();
    for idx in 0..header.num_frames {
        let text = cur.read_section(&format!("frame section {idx}"))?;
        let raw = BASE64.decode(text).map_err(|e| {
            AgifError::format(format!("frame section {idx} is not valid base64: {e}"))
        })?;
        frames.push(raw);
    }

    let mut audio_clips = Vec::new();
    for idx in 0..header.num_audio_clips {
        audio_clips.push(cur.read_section(&format!("audio section {idx}"))?.to_vec());
    }

    let trigger_bytes = cur.read_section("trigger section")?;
    let triggers: TriggerMap = serde_json::from_slice(trigger_bytes)
        .map_err(|e| AgifError::format(format!("invalid trigger JSON: {e}")))?;

    let extra = cur.remaining();
    if extra != 0 {
        return Err(AgifError::format(format!(
            "trailing data: {extra} byte(s) past the trigger section"
        )));
    }

    Ok(Container {
        header,
        frames,
        audio_clips,
        triggers,
    })
}
