use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::container::{Container, MAGIC};
use crate::error::{AgifError, AgifResult};

/// Serialize a container to the `.agif` wire layout.
///
/// Frame payloads are written as base64 *text*, not raw bytes. This ~33%
/// size inflation is a quirk of the original format kept for compatibility;
/// a future format revision is the place to drop it.
pub(crate) fn encode(container: &Container) -> AgifResult<Vec<u8>> {
    let header = &container.header;
    if header.num_frames as usize != container.frames.len() {
        return Err(AgifError::caller(format!(
            "header declares {} frame(s) but {} were supplied",
            header.num_frames,
            container.frames.len()
        )));
    }
    if header.num_audio_clips as usize != container.audio_clips.len() {
        return Err(AgifError::caller(format!(
            "header declares {} audio clip(s) but {} were supplied",
            header.num_audio_clips,
            container.audio_clips.len()
        )));
    }

    let header_json = serde_json::to_vec(header)
        .map_err(|e| AgifError::caller(format!("header serialization failed: {e}")))?;
    let trigger_json = serde_json::to_vec(&container.triggers)
        .map_err(|e| AgifError::caller(format!("trigger serialization failed: {e}")))?;

    let mut out = Vec::with_capacity(MAGIC.len() + 8 + header_json.len() + trigger_json.len());
    out.extend_from_slice(&MAGIC);
    push_section(&mut out, &header_json)?;

    for frame in &container.frames {
        let b64 = BASE64.encode(frame);
        push_section(&mut out, b64.as_bytes())?;
    }
    for clip in &container.audio_clips {
        push_section(&mut out, clip)?;
    }
    push_section(&mut out, &trigger_json)?;

    Ok(out)
}

/// Append a `u32 LE length` + payload section.
fn push_section(out: &mut Vec<u8>, bytes: &[u8]) -> AgifResult<()> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| AgifError::caller(format!("section of {} bytes exceeds u32", bytes.len())))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::trigger::TriggerMap;
    use crate::core::{Canvas, FrameRate};

    fn sample() -> Container {
        Container::new(
            Canvas::new(4, 4).unwrap(),
            FrameRate::new(10).unwrap(),
            vec![vec![1, 2, 3]],
            vec![],
            TriggerMap::default(),
        )
        .unwrap()
    }

    #[test]
    fn layout_starts_with_magic_and_header_length() {
        let bytes = sample().encode().unwrap();
        assert_eq!(&bytes[..4], b"AGIF");
        let header_len = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        let header_json = &bytes[8..8 + header_len];
        assert!(header_json.starts_with(b"{"));
    }

    #[test]
    fn frame_payload_is_base64_text() {
        let bytes = sample().encode().unwrap();
        let header_len = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
        let frame_off = 8 + header_len;
        let frame_len =
            u32::from_le_bytes(bytes[frame_off..frame_off + 4].try_into().unwrap()) as usize;
        let payload = &bytes[frame_off + 4..frame_off + 4 + frame_len];
        assert_eq!(payload, BASE64.encode([1u8, 2, 3]).as_bytes());
    }

    #[test]
    fn count_mismatch_is_a_caller_error() {
        let mut c = sample();
        c.frames.push(vec![9]);
        let err = c.encode().unwrap_err();
        assert!(matches!(err, AgifError::Caller(_)), "{err}");
    }
}
