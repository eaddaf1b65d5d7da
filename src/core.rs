use std::time::Duration;

use crate::error::{AgifError, AgifResult};

/// Frames-per-second of the animation, validated to the supported 1..=60 range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameRate(u32);

impl FrameRate {
    /// Highest frame rate the container format accepts.
    pub const MAX: u32 = 60;

    /// Create a validated frame rate.
    pub fn new(fps: u32) -> AgifResult<Self> {
        if fps == 0 || fps > Self::MAX {
            return Err(AgifError::validation(format!(
                "frame rate must be in 1..={}, got {fps}",
                Self::MAX
            )));
        }
        Ok(Self(fps))
    }

    /// Frames per second as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Duration of one frame, `1000 / fps` milliseconds.
    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.0))
    }
}

/// Pixel dimensions shared by every frame in a container, and also used for
/// the destination surface a frame is drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with positive dimensions.
    pub fn new(width: u32, height: u32) -> AgifResult<Self> {
        if width == 0 || height == 0 {
            return Err(AgifError::validation(format!(
                "canvas dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}
