//! Tone output: glicol voices mixed into a cpal stream.
//!
//! Each sounding square owns one voice in the shared mixer. Starting or
//! stopping a voice recomposes the glicol patch; the audio callback pulls
//! blocks from the engine and doubles as the music box clock.

mod synthesis;
mod system;
mod voice;

use thiserror::Error;

// Re-export public types
pub use synthesis::{compose_patch, VoiceSpec};
pub use system::{AudioSystem, StreamClock};
pub use voice::{Mixer, MixerVoice};

/// Failure to bring up audio output
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to get audio config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("glicol engine init failed: {0}")]
    Engine(String),
}
