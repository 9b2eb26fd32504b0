//! Music Box - a grid of colored squares scrolls toward a fixed line,
//! and every square switched on sings while it crosses it.
//!
//! Click a square to toggle it. Space pauses the conveyor, Up/Down change
//! the tempo, Left/Right change the gain, Escape quits.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use music_box::audio::{AudioSystem, StreamClock};
use music_box::cli::Args;
use music_box::music_box::{Controls, MusicBox};
use music_box::params::{AudioParams, RenderConfig};
use music_box::rendering::{RenderSystem, ShapeBatch};

/// Rolling frame-rate statistics, logged once per second
struct FrameStats {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    last_report: Instant,
}

impl FrameStats {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::new(),
            last_frame: now,
            last_report: now,
        }
    }

    fn record_frame(&mut self, sounding: usize) {
        let now = Instant::now();
        self.frame_times.push_back(now - self.last_frame);
        self.last_frame = now;
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if now - self.last_report > Duration::from_secs(1) {
            let total: Duration = self.frame_times.iter().sum();
            let fps = self.frame_times.len() as f32 / total.as_secs_f32().max(f32::EPSILON);
            log::debug!("FPS: {:.1}, voices: {}", fps, sounding);
            self.last_report = now;
        }
    }
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    batch: ShapeBatch,

    // Music box and its collaborators
    music_box: MusicBox,
    controls: Controls,
    audio: Option<AudioSystem>,
    clock: Option<StreamClock>,

    // Configuration
    render_config: RenderConfig,
    audio_params: AudioParams,

    cursor: PhysicalPosition<f64>,
    stats: FrameStats,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let render_config = args.render_config();
        render_config.validate()?;

        let control_params = args.control_params();
        let start_paused = control_params.start_paused;
        let controls = Controls::new(control_params);

        let mut music_box = MusicBox::new(
            args.grid_params(),
            render_config.canvas_width as f32,
            &controls,
        )?;
        music_box.set_playing(!start_paused);

        Ok(Self {
            window: None,
            render_system: None,
            batch: ShapeBatch::default(),
            music_box,
            controls,
            audio: None,
            clock: None,
            render_config,
            audio_params: args.audio_params(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            stats: FrameStats::new(),
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.music_box.canvas_size();

        // Create window sized to the canvas
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.window_title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            (width, height),
            self.render_config.background,
        ))
        .context("initializing renderer")?;

        // Initialize audio system
        let audio =
            AudioSystem::new(self.audio_params.clone()).context("initializing audio output")?;

        log::info!(
            "Canvas {}x{}, trigger line at x={}, {:.0} BPM, clock at {}Hz",
            width,
            height,
            self.music_box.trigger_line_x(),
            self.music_box.tempo(),
            audio.sample_rate_hz()
        );
        log::info!("Click squares to toggle, Space to pause, Esc to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.clock = Some(audio.clock());
        self.audio = Some(audio);
        Ok(())
    }

    /// Run one update → draw → play cycle and present it
    fn render_frame(&mut self) {
        let (Some(render_system), Some(audio), Some(clock)) =
            (&mut self.render_system, &mut self.audio, &self.clock)
        else {
            return;
        };

        self.music_box
            .tick(&mut self.batch, audio, &self.controls, clock);

        match render_system.render(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    render_system.resize(size.width, size.height);
                }
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        self.stats.record_frame(audio.sounding());
    }

    /// Translate a window position to canvas pixels
    fn canvas_position(&self, position: PhysicalPosition<f64>) -> Option<(f32, f32)> {
        let window = self.window.as_ref()?;
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return None;
        }
        let (width, height) = self.music_box.canvas_size();
        let x = position.x as f32 * width / size.width as f32;
        let y = position.y as f32 * height / size.height as f32;
        Some((x, y))
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => self.music_box.on_toggle_key(),
            KeyCode::ArrowUp => self.controls.nudge_tempo(1.0),
            KeyCode::ArrowDown => self.controls.nudge_tempo(-1.0),
            KeyCode::ArrowRight => self.controls.nudge_gain(1.0),
            KeyCode::ArrowLeft => self.controls.nudge_gain(-1.0),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key, event_loop),
            WindowEvent::CursorMoved { position, .. } => self.cursor = position,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some((x, y)) = self.canvas_position(self.cursor) {
                    self.music_box.on_click(x, y);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
