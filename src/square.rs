//! One grid cell: scroll motion, trigger-line activation and tone lifecycle.

use crate::color::{Color, Rgba};
use crate::params::GridParams;
use crate::surface::Surface;
use crate::tone::{ToneFactory, Voice};

/// Highlight drawn over an "on" square while it crosses the trigger line
const HIGHLIGHT: Rgba = Rgba::new(255, 255, 255, 0.7);

/// Alpha of a square that is toggled on
const ON_ALPHA: f32 = 0.9;

/// Alpha of the dim background tint for squares that are off
const OFF_ALPHA: f32 = 0.2;

/// Cell geometry shared by every square on the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Square edge length (pixels)
    pub cell_size: f32,

    /// Gap term of the spacing formula, `floor(cell_size / 2.5)`
    pub offset: f32,

    /// Column count; squares wrap back to `cols - 1`
    pub cols: u32,

    /// Visible canvas width (pixels)
    pub canvas_width: f32,
}

impl Geometry {
    pub fn new(params: &GridParams, canvas_width: f32) -> Self {
        Self {
            cell_size: params.cell_size_px,
            offset: params.offset_px(),
            cols: params.cols,
            canvas_width,
        }
    }

    /// Pixel coordinate of a grid coordinate, used for both axes.
    ///
    /// `g * size + (g * offset + offset)`: the gap scales with the
    /// coordinate and a single leading gap pads the edge.
    pub fn pixel_position(&self, grid_coordinate: f32) -> f32 {
        grid_coordinate * self.cell_size + (grid_coordinate * self.offset + self.offset)
    }
}

/// A toggleable cell riding the conveyor
pub struct Square {
    grid_x: f32,
    grid_y: u32,
    pixel_x: f32,
    pixel_y: f32,
    on: bool,
    active: bool,
    playing: bool,
    voice: Option<Box<dyn Voice>>,
    frequency: f32,
    color: Color,
    geometry: Geometry,
}

impl Square {
    /// Create the square for grid cell `(col, row)`
    pub fn new(col: u32, row: u32, params: &GridParams, geometry: Geometry) -> Self {
        let grid_x = col as f32;
        Self {
            grid_x,
            grid_y: row,
            pixel_x: geometry.pixel_position(grid_x),
            pixel_y: geometry.pixel_position(row as f32),
            on: false,
            active: false,
            playing: false,
            voice: None,
            frequency: params.frequency_for_row(row),
            color: Color::from_index(row as usize),
            geometry,
        }
    }

    pub fn grid_x(&self) -> f32 {
        self.grid_x
    }

    pub fn grid_y(&self) -> u32 {
        self.grid_y
    }

    pub fn pixel_x(&self) -> f32 {
        self.pixel_x
    }

    pub fn pixel_y(&self) -> f32 {
        self.pixel_y
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Activation as of the last `update`
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn has_voice(&self) -> bool {
        self.voice.is_some()
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether `[pixel_x, pixel_x + size)` overlaps `[0, canvas_width)`
    pub fn is_on_screen(&self) -> bool {
        self.pixel_x < self.geometry.canvas_width && self.pixel_x + self.geometry.cell_size > 0.0
    }

    /// Strictly straddles the trigger line; touching it does not count
    pub fn is_active(&self, trigger_line_x: f32) -> bool {
        self.pixel_x < trigger_line_x && self.pixel_x + self.geometry.cell_size > trigger_line_x
    }

    /// Advance one frame.
    ///
    /// Activation is taken from the position rendered last frame, before
    /// this frame's motion is applied.
    pub fn update(&mut self, speed: f32, trigger_line_x: f32) {
        self.active = self.is_active(trigger_line_x);

        if self.pixel_x + self.geometry.cell_size < 0.0 {
            self.grid_x = (self.geometry.cols - 1) as f32;
        }
        self.grid_x -= speed;

        self.pixel_x = self.geometry.pixel_position(self.grid_x);
        self.pixel_y = self.geometry.pixel_position(self.grid_y as f32);
    }

    /// Toggle if the click lands strictly inside the square; returns `on`
    pub fn update_if_clicked(&mut self, click_x: f32, click_y: f32) -> bool {
        let size = self.geometry.cell_size;
        let inside_x = click_x > self.pixel_x && click_x < self.pixel_x + size;
        let inside_y = click_y > self.pixel_y && click_y < self.pixel_y + size;
        if inside_x && inside_y {
            self.on = !self.on;
        }
        self.on
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if !self.is_on_screen() {
            return;
        }

        let size = self.geometry.cell_size;
        if self.on {
            surface.fill_rect(
                self.pixel_x,
                self.pixel_y,
                size,
                size,
                self.color.rgba(ON_ALPHA),
            );
            if self.active {
                surface.fill_rect(
                    self.pixel_x - 1.0,
                    self.pixel_y - 1.0,
                    size + 2.0,
                    size + 2.0,
                    HIGHLIGHT,
                );
            }
        } else {
            surface.fill_rect(
                self.pixel_x,
                self.pixel_y,
                size,
                size,
                self.color.rgba(OFF_ALPHA),
            );
        }
    }

    /// Start or stop this square's tone.
    ///
    /// A tone starts when an "on" square becomes active and stops when it
    /// leaves the line while still on. Switching a sounding square off lets
    /// the tone ring until the square leaves the line.
    pub fn play<T: ToneFactory + ?Sized>(&mut self, tones: &mut T, gain: f32, now: f64) {
        if !self.playing && self.on && self.active {
            let mut voice = match tones.create_voice(self.frequency, gain) {
                Ok(voice) => voice,
                Err(e) => {
                    log::warn!("No voice for {:.1}Hz: {}", self.frequency, e);
                    return;
                }
            };
            if let Err(e) = voice.start(now) {
                log::warn!("Voice at {:.1}Hz failed to start: {}", self.frequency, e);
                return;
            }
            log::debug!(
                "Row {} sounding at {:.1}Hz (t={:.3}s)",
                self.grid_y,
                self.frequency,
                now
            );
            self.voice = Some(voice);
            self.playing = true;
        } else if self.playing && self.on && !self.active {
            if let Some(mut voice) = self.voice.take() {
                voice.stop(0.0);
            }
            log::debug!("Row {} silent (t={:.3}s)", self.grid_y, now);
            self.playing = false;
        }
    }
}
