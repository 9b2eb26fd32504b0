//! Window and canvas configuration.

use super::ParamError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width (pixels); the trigger line sits at a quarter of it
    pub canvas_width: u32,

    pub window_title: String,

    /// Clear color (linear RGBA)
    pub background: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            window_title: "Music Box".to_string(),
            background: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.canvas_width == 0 {
            return Err(ParamError::CanvasWidth);
        }
        Ok(())
    }
}
