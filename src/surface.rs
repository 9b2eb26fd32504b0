//! Drawing target the music box renders into.

use crate::color::Rgba;

/// Immediate-mode 2D surface in canvas pixel coordinates
/// (origin top-left, y down)
pub trait Surface {
    /// Discard everything drawn so far this frame
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// One pixel wide line segment
    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba);
}
