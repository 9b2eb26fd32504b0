//! Tempo and gain control ranges.

use std::ops::RangeInclusive;

/// Defaults, limits and keyboard step sizes for the live controls
#[derive(Debug, Clone)]
pub struct ControlParams {
    /// Starting tempo (beats per minute)
    pub tempo_bpm: f32,

    /// Starting output gain (0..=1)
    pub gain: f32,

    /// Accepted tempo range (BPM)
    pub tempo_range_bpm: RangeInclusive<f32>,

    /// Tempo change per key press (BPM)
    pub tempo_step_bpm: f32,

    /// Accepted gain range
    pub gain_range: RangeInclusive<f32>,

    /// Gain change per key press
    pub gain_step: f32,

    /// Start with the conveyor stopped
    pub start_paused: bool,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            tempo_bpm: 60.0,
            gain: 0.5,
            tempo_range_bpm: 0.0..=400.0,
            tempo_step_bpm: 5.0,
            gain_range: 0.0..=1.0,
            gain_step: 0.05,
            start_paused: false,
        }
    }
}
