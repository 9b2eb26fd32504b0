//! Voice synthesis configuration and constants.

use std::fmt;

/// Oscillator shape used for every voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Waveform {
    /// Glicol node name for this oscillator
    pub fn node(self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Square => "squ",
            Self::Saw => "saw",
            Self::Triangle => "tri",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Saw => "saw",
            Self::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Voice chain configuration (oscillator → gain → delay → output)
#[derive(Debug, Clone)]
pub struct AudioParams {
    pub waveform: Waveform,

    /// Headroom multiplier applied on top of the user gain, so a full
    /// column of voices stays under the limiter
    pub voice_level: f32,

    /// Delay stage length (milliseconds); 0 removes the stage
    pub delay_ms: f32,

    /// Hard clip applied to every output sample
    pub limiter: f32,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            voice_level: 0.1,
            delay_ms: 40.0,
            limiter: 0.5, // keep peaks well below full scale
        }
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}
