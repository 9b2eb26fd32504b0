//! Row palette and RGBA color values.

use std::fmt;

/// sRGB color with straight alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear-light RGBA for an sRGB render target
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a.clamp(0.0, 1.0),
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Fixed palette, one hue per row (wraps for taller grids)
const PALETTE: [(u8, u8, u8); 12] = [
    (231, 76, 60),
    (230, 126, 34),
    (241, 196, 15),
    (186, 220, 88),
    (46, 204, 113),
    (26, 188, 156),
    (52, 152, 219),
    (41, 128, 185),
    (155, 89, 182),
    (142, 68, 173),
    (232, 67, 147),
    (236, 240, 241),
];

/// Palette entry selected by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub fn from_index(index: usize) -> Self {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Self { r, g, b }
    }

    /// Opaque version
    pub fn rgb(self) -> Rgba {
        self.rgba(1.0)
    }

    pub fn rgba(self, alpha: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, alpha)
    }
}
