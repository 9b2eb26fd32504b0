//! CPU-side tessellation of rectangles and lines into colored triangles.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Rgba;
use crate::surface::Surface;

/// Vertex data for 2D shapes (canvas pixel position + linear RGBA)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangle list rebuilt every frame
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
}

impl ShapeBatch {
    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Two triangles, corners in order around the quad
    fn push_quad(&mut self, corners: [Vec2; 4], color: Rgba) {
        let color = color.to_linear();
        let [a, b, c, d] = corners;
        for p in [a, b, c, a, c, d] {
            self.vertices.push(ShapeVertex {
                position: p.to_array(),
                color,
            });
        }
    }
}

impl Surface for ShapeBatch {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        let min = Vec2::new(x, y);
        let max = min + Vec2::new(width, height);
        self.push_quad(
            [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            color,
        );
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba) {
        let start = Vec2::new(x1, y1);
        let end = Vec2::new(x2, y2);
        let direction = (end - start).normalize_or_zero();
        if direction == Vec2::ZERO {
            // Degenerate line: a single pixel
            self.fill_rect(x1 - 0.5, y1 - 0.5, 1.0, 1.0, color);
            return;
        }

        let half_width = direction.perp() * 0.5;
        self.push_quad(
            [
                start + half_width,
                start - half_width,
                end - half_width,
                end + half_width,
            ],
            color,
        );
    }
}
