//! Playback: host capability seams and the frame/trigger scheduler.

use std::time::{Duration, Instant};

use crate::container::Container;
use crate::container::trigger::TriggerMap;
use crate::core::Canvas;
use crate::error::{AgifError, AgifResult};

/// Where and how large to draw a frame.
///
/// `scale_x`/`scale_y` are independent factors from the header's declared
/// frame size to the destination surface; aspect ratio is not forced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawTarget {
    /// Destination surface width in pixels.
    pub width: u32,
    /// Destination surface height in pixels.
    pub height: u32,
    /// Horizontal scale factor, destination / declared frame width.
    pub scale_x: f32,
    /// Vertical scale factor, destination / declared frame height.
    pub scale_y: f32,
}

/// Capabilities the embedding platform supplies to the scheduler.
///
/// `Surface` and `Clip` are whatever the host's renderer and audio output
/// work with; the scheduler only stores and hands them back.
pub trait PlaybackHost {
    /// Decoded renderable image.
    type Surface;
    /// Decoded playable audio clip.
    type Clip;

    /// Decode one frame's encoded image bytes into a renderable surface.
    fn decode_image(&mut self, bytes: &[u8]) -> AgifResult<Self::Surface>;

    /// Decode one clip's WAV bytes into playable PCM.
    fn decode_audio(&mut self, bytes: &[u8]) -> AgifResult<Self::Clip>;

    /// Begin asynchronous playback of a clip. Fire-and-forget: the scheduler
    /// never awaits completion, and overlapping instances of the same clip
    /// are expected to mix freely.
    fn start_clip(&mut self, clip: &Self::Clip) -> AgifResult<()>;

    /// Draw a surface scaled into the destination.
    fn draw_surface(&mut self, surface: &Self::Surface, target: DrawTarget) -> AgifResult<()>;
}

/// Observable scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No container loaded.
    Idle,
    /// Assets decoded, loop not advancing.
    Loaded,
    /// Timing loop armed.
    Playing,
}

struct LoadedAssets<H: PlaybackHost> {
    surfaces: Vec<H::Surface>,
    clips: Vec<H::Clip>,
    triggers: TriggerMap,
    declared: Canvas,
    frame_duration: Duration,
    current_frame: usize,
    /// Deadline of the pending tick. `Some` exactly while playing.
    next_tick_at: Option<Instant>,
}

/// The playback scheduler: owns decoded assets and drives the timed
/// frame/trigger loop through a [`PlaybackHost`].
///
/// Timing is one cooperative deadline, not a background thread: the
/// embedding drive loop calls [`Player::poll`] with the current time, and at
/// most one tick fires per call when the deadline has passed. [`pause`]
/// clears the deadline, which is exactly the "cancel the pending tick"
/// semantics a callback timer would need.
///
/// [`pause`]: Player::pause
pub struct Player<H: PlaybackHost> {
    host: H,
    assets: Option<LoadedAssets<H>>,
}

impl<H: PlaybackHost> Player<H> {
    /// A player in the `Idle` state.
    pub fn new(host: H) -> Self {
        Self { host, assets: None }
    }

    /// Borrow the host (useful for inspecting test doubles).
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> PlayerState {
        match &self.assets {
            None => PlayerState::Idle,
            Some(a) if a.next_tick_at.is_some() => PlayerState::Playing,
            Some(_) => PlayerState::Loaded,
        }
    }

    /// The frame the next tick will display, once loaded.
    pub fn current_frame(&self) -> Option<usize> {
        self.assets.as_ref().map(|a| a.current_frame)
    }

    /// Deadline of the pending tick, while playing.
    pub fn next_tick_at(&self) -> Option<Instant> {
        self.assets.as_ref().and_then(|a| a.next_tick_at)
    }

    /// Decode every frame and clip and transition `Idle -> Loaded`.
    ///
    /// All decodes must succeed before any asset is used; the first failure
    /// aborts the whole load and the player stays `Idle`. Replaces any
    /// previously loaded container.
    pub fn load(&mut self, container: &Container) -> AgifResult<()> {
        self.assets = None;

        let mut surfaces = Vec::with_capacity(container.frames.len());
        for (idx, bytes) in container.frames.iter().enumerate() {
            let surface = self
                .host
                .decode_image(bytes)
                .map_err(|e| AgifError::asset_decode(format!("frame {idx}: {e}")))?;
            surfaces.push(surface);
        }

        let mut clips = Vec::with_capacity(container.audio_clips.len());
        for (idx, bytes) in container.audio_clips.iter().enumerate() {
            let clip = self
                .host
                .decode_audio(bytes)
                .map_err(|e| AgifError::asset_decode(format!("audio clip {idx}: {e}")))?;
            clips.push(clip);
        }

        self.assets = Some(LoadedAssets {
            surfaces,
            clips,
            triggers: container.triggers.clone(),
            declared: container.header.canvas(),
            frame_duration: container.header.frame_rate()?.frame_duration(),
            current_frame: 0,
            next_tick_at: None,
        });
        Ok(())
    }

    /// Transition `Loaded -> Playing`, arming the first tick at `now`.
    ///
    /// No-op when already playing or when nothing is loaded. Resumes at the
    /// frame retained by a prior [`Player::pause`], not at frame 0. A
    /// container with zero frames has nothing to tick and stays `Loaded`.
    pub fn play(&mut self, now: Instant) {
        let Some(assets) = &mut self.assets else {
            return;
        };
        if assets.next_tick_at.is_some() || assets.surfaces.is_empty() {
            return;
        }
        assets.next_tick_at = Some(now);
    }

    /// Transition `Playing -> Loaded`, cancelling the pending tick.
    ///
    /// `current_frame` is retained so a later [`Player::play`] resumes in
    /// place.
    pub fn pause(&mut self) {
        if let Some(assets) = &mut self.assets {
            assets.next_tick_at = None;
        }
    }

    /// Tear down to `Idle`, dropping all decoded assets.
    pub fn unload(&mut self) {
        self.assets = None;
    }

    /// Drive the timing loop: fire at most one tick if its deadline has
    /// passed, drawing into a destination surface of size `dest`.
    ///
    /// Returns whether a tick fired. Draw and audio-start failures inside a
    /// tick are non-fatal; they are logged and the loop keeps going.
    pub fn poll(&mut self, now: Instant, dest: Canvas) -> bool {
        let Some(assets) = &mut self.assets else {
            return false;
        };
        let Some(deadline) = assets.next_tick_at else {
            return false;
        };
        if now < deadline {
            return false;
        }

        fire_tick(&mut self.host, assets, dest);
        assets.next_tick_at = Some(deadline + assets.frame_duration);
        true
    }
}

/// One tick: draw the current frame, fire its triggers, advance modulo the
/// frame count.
fn fire_tick<H: PlaybackHost>(host: &mut H, assets: &mut LoadedAssets<H>, dest: Canvas) {
    let frame = assets.current_frame;

    if let Some(surface) = assets.surfaces.get(frame) {
        let target = DrawTarget {
            width: dest.width,
            height: dest.height,
            scale_x: dest.width as f32 / assets.declared.width as f32,
            scale_y: dest.height as f32 / assets.declared.height as f32,
        };
        if let Err(e) = host.draw_surface(surface, target) {
            tracing::warn!(frame, "frame draw failed: {e}");
        }
    }

    for trigger in assets.triggers.triggers_for(frame) {
        // A trigger whose clip index has no decoded clip dispatches nothing.
        let Some(clip) = assets.clips.get(trigger.audio as usize) else {
            continue;
        };
        if let Err(e) = host.start_clip(clip) {
            tracing::warn!(frame, clip = trigger.audio, "audio start failed: {e}");
        }
    }

    // Unconditional wrap to frame 0. The trigger section's loop flag is
    // carried by the format but not consulted here; honoring loop=false is
    // an open format/behavior gap.
    assets.current_frame = (frame + 1) % assets.surfaces.len();
}
