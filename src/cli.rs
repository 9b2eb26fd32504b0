//! Command-line argument parsing.

use clap::Parser;

use crate::params::{AudioParams, ControlParams, GridParams, RenderConfig, Waveform};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "music-box")]
#[command(about = "Scrolling step-grid music box", long_about = None)]
pub struct Args {
    /// Number of rows (one pitch each)
    #[arg(long, default_value_t = 12)]
    pub rows: u32,

    /// Number of columns on the conveyor
    #[arg(long, default_value_t = 32)]
    pub cols: u32,

    /// Square size in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 40.0)]
    pub cell_size: f32,

    /// Canvas width in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Starting tempo (beats per minute)
    #[arg(long, value_name = "BPM", default_value_t = 60.0)]
    pub tempo: f32,

    /// Starting output gain (0 to 1)
    #[arg(long, default_value_t = 0.5)]
    pub gain: f32,

    /// Bottom of the octave band; row 0 plays this
    #[arg(long, value_name = "HZ", default_value_t = 440.0)]
    pub base_freq: f32,

    /// Voice oscillator: sine (default), square, saw, triangle
    #[arg(long, default_value = "sine")]
    pub waveform: String,

    /// Delay stage length in milliseconds (0 disables it)
    #[arg(long, value_name = "MS", default_value_t = 40.0)]
    pub delay_ms: f32,

    /// Start with the conveyor stopped
    #[arg(long)]
    pub paused: bool,
}

impl Args {
    /// Parse waveform name from command-line arguments
    pub fn parse_waveform(&self) -> Waveform {
        match self.waveform.to_lowercase().as_str() {
            "sine" | "sin" => Waveform::Sine,
            "square" | "squ" => Waveform::Square,
            "saw" | "sawtooth" => Waveform::Saw,
            "triangle" | "tri" => Waveform::Triangle,
            other => {
                log::warn!("Unknown waveform '{}', using sine", other);
                Waveform::Sine
            }
        }
    }

    pub fn grid_params(&self) -> GridParams {
        GridParams {
            rows: self.rows,
            cols: self.cols,
            cell_size_px: self.cell_size,
            base_frequency_hz: self.base_freq,
        }
    }

    pub fn control_params(&self) -> ControlParams {
        ControlParams {
            tempo_bpm: self.tempo,
            gain: self.gain,
            start_paused: self.paused,
            ..Default::default()
        }
    }

    pub fn audio_params(&self) -> AudioParams {
        AudioParams {
            waveform: self.parse_waveform(),
            delay_ms: self.delay_ms.max(0.0),
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            canvas_width: self.width,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let args = Args::parse_from(["music-box"]);

        let grid = args.grid_params();
        let defaults = GridParams::default();
        assert_eq!(grid.rows, defaults.rows);
        assert_eq!(grid.cols, defaults.cols);
        assert_eq!(grid.cell_size_px, defaults.cell_size_px);
        assert_eq!(grid.base_frequency_hz, defaults.base_frequency_hz);

        let controls = args.control_params();
        assert_eq!(controls.tempo_bpm, 60.0);
        assert_eq!(controls.gain, 0.5);
        assert!(!controls.start_paused);

        assert_eq!(args.render_config().canvas_width, 1280);
        assert_eq!(args.audio_params().waveform, Waveform::Sine);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "music-box",
            "--rows",
            "8",
            "--tempo",
            "120",
            "--waveform",
            "Saw",
            "--delay-ms=-5",
            "--paused",
        ]);

        assert_eq!(args.grid_params().rows, 8);
        assert_eq!(args.control_params().tempo_bpm, 120.0);
        assert!(args.control_params().start_paused);
        assert_eq!(args.parse_waveform(), Waveform::Saw);
        assert_eq!(args.audio_params().delay_ms, 0.0);
    }

    #[test]
    fn test_unknown_waveform_falls_back_to_sine() {
        let args = Args::parse_from(["music-box", "--waveform", "kazoo"]);
        assert_eq!(args.parse_waveform(), Waveform::Sine);
    }
}
