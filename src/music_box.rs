//! The music box driver: owns the grid and runs the per-frame cycle.
//!
//! Every frame is `update` → `draw` → `play`, driven from outside through
//! [`MusicBox::tick`]. Stopping the scheduler is the only way to stop the
//! loop; pausing only zeroes the scroll speed.

mod controls;

pub use controls::{ControlSource, Controls};

use crate::color::Rgba;
use crate::params::{GridParams, ParamError};
use crate::square::{Geometry, Square};
use crate::surface::Surface;
use crate::tone::{Clock, ToneFactory};

/// Grid of squares scrolling past a fixed trigger line
pub struct MusicBox {
    params: GridParams,
    canvas_width: f32,
    canvas_height: f32,
    trigger_line_x: f32,
    tempo: f32,
    gain: f32,
    is_playing: bool,
    squares: Vec<Square>,
}

impl MusicBox {
    /// Build the grid once; squares live as long as the music box.
    ///
    /// The trigger line is fixed at a quarter of `canvas_width`.
    pub fn new<C: ControlSource + ?Sized>(
        params: GridParams,
        canvas_width: f32,
        controls: &C,
    ) -> Result<Self, ParamError> {
        params.validate()?;
        if !(canvas_width > 0.0) {
            return Err(ParamError::CanvasWidth);
        }

        let geometry = Geometry::new(&params, canvas_width);
        let mut squares = Vec::with_capacity(params.rows as usize * params.cols as usize);
        for col in 0..params.cols {
            for row in 0..params.rows {
                squares.push(Square::new(col, row, &params, geometry));
            }
        }

        Ok(Self {
            canvas_height: params.canvas_height(),
            canvas_width,
            trigger_line_x: canvas_width / 4.0,
            tempo: controls.tempo(),
            gain: controls.gain(),
            is_playing: true,
            squares,
            params,
        })
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn trigger_line_x(&self) -> f32 {
        self.trigger_line_x
    }

    /// Canvas size in pixels (width, height)
    pub fn canvas_size(&self) -> (f32, f32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Number of squares currently holding a voice
    pub fn sounding(&self) -> usize {
        self.squares.iter().filter(|s| s.is_playing()).count()
    }

    /// Columns scrolled per frame at the current tempo; zero while paused
    pub fn speed(&self) -> f32 {
        if self.is_playing {
            (self.tempo / 60.0) / self.params.cols as f32
        } else {
            0.0
        }
    }

    /// Run one full frame
    pub fn tick<S, T, C, K>(&mut self, surface: &mut S, tones: &mut T, controls: &C, clock: &K)
    where
        S: Surface + ?Sized,
        T: ToneFactory + ?Sized,
        C: ControlSource + ?Sized,
        K: Clock + ?Sized,
    {
        self.update(controls);
        self.draw(surface);
        self.play(tones, clock.current_time());
    }

    /// Move every square, then pick up the latest tempo and gain
    pub fn update<C: ControlSource + ?Sized>(&mut self, controls: &C) {
        let speed = self.speed();
        for square in &mut self.squares {
            square.update(speed, self.trigger_line_x);
        }

        self.tempo = controls.tempo();
        self.gain = controls.gain();
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for square in &self.squares {
            square.draw(surface);
        }
        surface.stroke_line(
            self.trigger_line_x,
            0.0,
            self.trigger_line_x,
            self.canvas_height,
            Rgba::WHITE,
        );
    }

    pub fn play<T: ToneFactory + ?Sized>(&mut self, tones: &mut T, now: f64) {
        for square in &mut self.squares {
            square.play(tones, self.gain, now);
        }
    }

    /// Route a click in canvas coordinates to every square
    pub fn on_click(&mut self, x: f32, y: f32) {
        for square in &mut self.squares {
            square.update_if_clicked(x, y);
        }
    }

    /// Pause or resume the conveyor
    pub fn on_toggle_key(&mut self) {
        self.is_playing = !self.is_playing;
        log::info!("{}", if self.is_playing { "Playing" } else { "Paused" });
    }
}
