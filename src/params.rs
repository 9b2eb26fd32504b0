//! Parameter definitions with units and documented defaults.
//!
//! Every tunable number lives here:
//! - Units in the field names (px, Hz, ms, BPM)
//! - Defaults in `Default` impls
//! - Validation where a bad value would break the grid math

mod audio;
mod control;
mod grid;
mod render;

use thiserror::Error;

// Re-export all types
pub use audio::{audio_constants, AudioParams, Waveform};
pub use control::ControlParams;
pub use grid::GridParams;
pub use render::RenderConfig;

/// Rejected configuration
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },

    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: u32, cols: u32 },

    #[error("cell size must be at least 1px, got {0}")]
    CellSize(f32),

    #[error("base frequency must be positive, got {0}Hz")]
    BaseFrequency(f32),

    #[error("canvas width must be positive")]
    CanvasWidth,
}
