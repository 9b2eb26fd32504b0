//! Test doubles for the music box collaborators.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::color::Rgba;
use crate::music_box::ControlSource;
use crate::surface::Surface;
use crate::tone::{Clock, ToneError, ToneFactory, Voice};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectCall {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Rgba,
}

/// Surface that remembers what was drawn since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub clears: usize,
    pub rects: Vec<RectCall>,
    pub lines: Vec<LineCall>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.rects.clear();
        self.lines.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.rects.push(RectCall {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba) {
        self.lines.push(LineCall {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToneEvent {
    Created {
        id: usize,
        frequency_hz: f32,
        gain: f32,
    },
    Started {
        id: usize,
        at: f64,
    },
    Stopped {
        id: usize,
        at: f64,
    },
}

/// Tone factory that logs every voice operation
#[derive(Debug, Default)]
pub struct RecordingTones {
    events: Rc<RefCell<Vec<ToneEvent>>>,
    live: Rc<Cell<usize>>,
    next_id: usize,
    fail: bool,
}

impl RecordingTones {
    /// Factory whose voices can never be created
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<ToneEvent> {
        self.events.borrow().clone()
    }

    /// Voices created and not yet dropped
    pub fn live_voices(&self) -> usize {
        self.live.get()
    }
}

impl ToneFactory for RecordingTones {
    fn create_voice(&mut self, frequency_hz: f32, gain: f32) -> Result<Box<dyn Voice>, ToneError> {
        if self.fail {
            return Err(ToneError::Unavailable("test".to_string()));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.events.borrow_mut().push(ToneEvent::Created {
            id,
            frequency_hz,
            gain,
        });
        self.live.set(self.live.get() + 1);

        Ok(Box::new(RecordingVoice {
            id,
            events: Rc::clone(&self.events),
            live: Rc::clone(&self.live),
        }))
    }
}

struct RecordingVoice {
    id: usize,
    events: Rc<RefCell<Vec<ToneEvent>>>,
    live: Rc<Cell<usize>>,
}

impl Voice for RecordingVoice {
    fn start(&mut self, at: f64) -> Result<(), ToneError> {
        self.events
            .borrow_mut()
            .push(ToneEvent::Started { id: self.id, at });
        Ok(())
    }

    fn stop(&mut self, at: f64) {
        self.events
            .borrow_mut()
            .push(ToneEvent::Stopped { id: self.id, at });
    }
}

impl Drop for RecordingVoice {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// Clock moved by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn current_time(&self) -> f64 {
        self.now.get()
    }
}

/// Controls pinned to fixed values
#[derive(Debug, Clone, Copy)]
pub struct FixedControls {
    tempo: f32,
    gain: f32,
}

impl FixedControls {
    pub fn new(tempo: f32, gain: f32) -> Self {
        Self { tempo, gain }
    }
}

impl ControlSource for FixedControls {
    fn tempo(&self) -> f32 {
        self.tempo
    }

    fn gain(&self) -> f32 {
        self.gain
    }
}
