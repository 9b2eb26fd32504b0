//! Tone playback capability consumed by the squares.
//!
//! The music box never synthesizes audio itself. It asks a [`ToneFactory`]
//! for a [`Voice`] when a square starts sounding and stops that voice when
//! the square leaves the trigger line. Timestamps come from a [`Clock`] in
//! seconds, in the same units the voices are scheduled with.

use thiserror::Error;

/// Voice creation or scheduling failure
#[derive(Debug, Error)]
pub enum ToneError {
    #[error("voice bank unavailable: {0}")]
    Unavailable(String),

    #[error("synthesis engine rejected the patch: {0}")]
    Engine(String),

    #[error("voice already stopped")]
    Stopped,
}

/// One sounding tone. Dropping it releases it from the output.
pub trait Voice {
    fn start(&mut self, at: f64) -> Result<(), ToneError>;

    /// Stop the tone; `0.0` means immediately
    fn stop(&mut self, at: f64);
}

/// Produces voices routed through a fixed gain → delay chain.
///
/// `gain` is read once here; later gain changes do not reach a voice that
/// already exists.
pub trait ToneFactory {
    fn create_voice(&mut self, frequency_hz: f32, gain: f32) -> Result<Box<dyn Voice>, ToneError>;
}

/// Monotonic time source shared with the tone output
pub trait Clock {
    fn current_time(&self) -> f64;
}
