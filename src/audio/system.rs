//! Audio system: cpal output stream fed by the voice mixer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::voice::{fill_interleaved, Mixer, MixerVoice};
use super::AudioError;
use crate::params::AudioParams;
use crate::tone::{Clock, ToneError, ToneFactory, Voice};

/// Audio system owning the output stream and the shared voice mixer
pub struct AudioSystem {
    /// Voice set and synthesis engine (shared with the audio callback)
    mixer: Arc<Mutex<Mixer>>,

    clock: StreamClock,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start streaming silence
    pub fn new(params: AudioParams) -> Result<Self, AudioError> {
        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let config = device.default_output_config()?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            log::warn!(
                "Device prefers {:?} samples, requesting f32",
                config.sample_format()
            );
        }

        let sample_rate_hz = config.sample_rate().0;
        let channels = config.channels() as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} channel(s), {} waveform",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels,
            params.waveform
        );

        let limiter = params.limiter;
        let mixer = Arc::new(Mutex::new(Mixer::new(params, sample_rate_hz as usize)?));
        let mixer_clone = Arc::clone(&mixer);

        let frames_rendered = Arc::new(AtomicU64::new(0));
        let frames_clone = Arc::clone(&frames_rendered);

        // Build audio output stream
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames = match mixer_clone.lock() {
                    Ok(mut mixer) => {
                        fill_interleaved(data, channels, limiter, || mixer.next_sample())
                    }
                    Err(_) => {
                        data.fill(0.0);
                        data.len() / channels.max(1)
                    }
                };
                frames_clone.fetch_add(frames as u64, Ordering::Relaxed);
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            mixer,
            clock: StreamClock {
                frames_rendered,
                sample_rate_hz,
            },
            _stream: stream,
        })
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.clock.sample_rate_hz
    }

    /// Handle on the stream position, usable while voices are being created
    pub fn clock(&self) -> StreamClock {
        self.clock.clone()
    }

    /// Voices currently in the mix
    pub fn sounding(&self) -> usize {
        self.mixer.lock().map(|m| m.sounding()).unwrap_or(0)
    }
}

impl ToneFactory for AudioSystem {
    fn create_voice(&mut self, frequency_hz: f32, gain: f32) -> Result<Box<dyn Voice>, ToneError> {
        let id = self
            .mixer
            .lock()
            .map_err(|_| ToneError::Unavailable("mixer lock poisoned".to_string()))?
            .add(frequency_hz, gain);
        Ok(Box::new(MixerVoice::new(id, Arc::clone(&self.mixer))))
    }
}

/// Audio time derived from the frames the callback has delivered
#[derive(Clone, Debug)]
pub struct StreamClock {
    frames_rendered: Arc<AtomicU64>,
    sample_rate_hz: u32,
}

impl StreamClock {
    fn seconds(frames: u64, sample_rate_hz: u32) -> f64 {
        frames as f64 / sample_rate_hz.max(1) as f64
    }
}

impl Clock for StreamClock {
    /// Seconds of audio delivered to the device
    fn current_time(&self) -> f64 {
        Self::seconds(self.frames_rendered.load(Ordering::Relaxed), self.sample_rate_hz)
    }
}
