//! Live tempo and gain inputs.

use crate::params::ControlParams;

/// Externally owned tempo and gain, polled once per frame
pub trait ControlSource {
    /// Beats per minute, never negative
    fn tempo(&self) -> f32;

    /// Output gain in `0..=1`
    fn gain(&self) -> f32;
}

/// Keyboard-adjustable controls.
///
/// Values are clamped here, at the input boundary, so the music box can
/// trust whatever it reads.
#[derive(Debug, Clone)]
pub struct Controls {
    tempo: f32,
    gain: f32,
    params: ControlParams,
}

impl Controls {
    pub fn new(mut params: ControlParams) -> Self {
        let defaults = ControlParams::default();
        if params.tempo_bpm.is_nan() {
            params.tempo_bpm = defaults.tempo_bpm;
        }
        if params.gain.is_nan() {
            params.gain = defaults.gain;
        }

        let mut controls = Self {
            tempo: 0.0,
            gain: 0.0,
            params,
        };
        controls.set_tempo(controls.params.tempo_bpm);
        controls.set_gain(controls.params.gain);
        controls
    }

    pub fn set_tempo(&mut self, bpm: f32) {
        let clamped = clamp_or(bpm, self.params.tempo_range_bpm.clone(), self.params.tempo_bpm);
        if clamped != bpm {
            log::warn!("Tempo {} out of range, using {}", bpm, clamped);
        }
        self.tempo = clamped;
    }

    pub fn set_gain(&mut self, gain: f32) {
        let clamped = clamp_or(gain, self.params.gain_range.clone(), self.params.gain);
        if clamped != gain {
            log::warn!("Gain {} out of range, using {}", gain, clamped);
        }
        self.gain = clamped;
    }

    /// Step the tempo up (`+1`) or down (`-1`)
    pub fn nudge_tempo(&mut self, direction: f32) {
        let next = self.tempo + direction * self.params.tempo_step_bpm;
        self.tempo = clamp_or(next, self.params.tempo_range_bpm.clone(), self.tempo);
        log::info!("Tempo: {:.0} BPM", self.tempo);
    }

    /// Step the gain up (`+1`) or down (`-1`)
    pub fn nudge_gain(&mut self, direction: f32) {
        let next = self.gain + direction * self.params.gain_step;
        self.gain = clamp_or(next, self.params.gain_range.clone(), self.gain);
        log::info!("Gain: {:.2}", self.gain);
    }
}

impl ControlSource for Controls {
    fn tempo(&self) -> f32 {
        self.tempo
    }

    fn gain(&self) -> f32 {
        self.gain
    }
}

/// Clamp into `range`; NaN falls back to `fallback`
fn clamp_or(value: f32, range: std::ops::RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        return fallback;
    }
    value.clamp(*range.start(), *range.end())
}
