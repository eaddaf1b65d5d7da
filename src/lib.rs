//! Animated image sequences with frame-triggered audio.
//!
//! The `.agif` container packs a short animation (encoded still images, one
//! per frame), a set of canonical WAV clips, and a trigger map binding clips
//! to frames into one self-describing binary artifact. This crate is the
//! container codec ([`Container::encode`]/[`Container::decode`]), the
//! PCM-to-WAV transcoder ([`encode_wav_s16le`]), and the playback scheduler
//! ([`Player`]) that drives frame-accurate trigger dispatch through host
//! capability traits.
#![forbid(unsafe_code)]

pub mod assets;
pub mod container;
pub mod core;
pub mod error;
pub mod player;
pub mod wav;

pub use crate::container::header::Header;
pub use crate::container::trigger::{Trigger, TriggerMap};
pub use crate::container::{AUDIO_FORMAT_WAV, Container, FORMAT_VERSION, MAGIC};
pub use crate::core::{Canvas, FrameRate};
pub use crate::error::{AgifError, AgifResult};
pub use crate::player::{DrawTarget, PlaybackHost, Player, PlayerState};
pub use crate::wav::{AudioPcm, encode_wav_s16le};
