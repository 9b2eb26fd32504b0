//! Voice bank shared between the frame loop and the audio callback.

use glicol::Engine;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::synthesis::{compose_patch, VoiceSpec, SILENCE};
use super::AudioError;
use crate::params::{audio_constants::BLOCK_SIZE, AudioParams};
use crate::tone::{ToneError, Voice};

/// Live voices plus the glicol engine rendering them
pub struct Mixer {
    engine: Engine<BLOCK_SIZE>,
    voices: BTreeMap<u64, VoiceSpec>,
    next_id: u64,
    params: AudioParams,

    /// Last rendered block and how much of it has been played
    block: [f32; BLOCK_SIZE],
    cursor: usize,
}

impl Mixer {
    pub fn new(params: AudioParams, sample_rate_hz: usize) -> Result<Self, AudioError> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate_hz);
        engine.update_with_code(SILENCE);
        engine
            .update()
            .map_err(|e| AudioError::Engine(format!("{:?}", e)))?;

        Ok(Self {
            engine,
            voices: BTreeMap::new(),
            next_id: 0,
            params,
            block: [0.0; BLOCK_SIZE],
            cursor: BLOCK_SIZE,
        })
    }

    /// Register a voice; it stays silent until started
    pub fn add(&mut self, frequency_hz: f32, gain: f32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.voices.insert(
            id,
            VoiceSpec {
                frequency_hz,
                gain,
                started_at: None,
            },
        );
        id
    }

    pub fn start(&mut self, id: u64, at: f64) -> Result<(), ToneError> {
        let voice = self.voices.get_mut(&id).ok_or(ToneError::Stopped)?;
        voice.started_at = Some(at);
        self.sync()
    }

    /// Drop a voice from the mix; unknown ids are ignored
    pub fn remove(&mut self, id: u64) {
        let Some(voice) = self.voices.remove(&id) else {
            return;
        };
        if voice.started_at.is_some() {
            if let Err(e) = self.sync() {
                log::warn!("Failed to remove voice {}: {}", id, e);
            }
        }
    }

    /// Number of started voices
    pub fn sounding(&self) -> usize {
        self.voices
            .values()
            .filter(|v| v.started_at.is_some())
            .count()
    }

    /// Rebuild the engine graph from the current voice set
    fn sync(&mut self) -> Result<(), ToneError> {
        let patch = compose_patch(
            self.voices.iter().map(|(id, voice)| (*id, voice)),
            &self.params,
        );
        self.engine.update_with_code(&patch);
        self.engine
            .update()
            .map_err(|e| ToneError::Engine(format!("{:?}", e)))
    }

    /// Next mono sample, rendering a new block when the last one is used up
    pub fn next_sample(&mut self) -> f32 {
        if self.cursor >= BLOCK_SIZE {
            let (buffers, _) = self.engine.next_block(vec![]);
            for i in 0..BLOCK_SIZE {
                self.block[i] = buffers[0][i];
            }
            self.cursor = 0;
        }
        let sample = self.block[self.cursor];
        self.cursor += 1;
        sample
    }
}

/// Write frames into an interleaved device buffer, one mono sample copied
/// to every channel and hard clipped to `±limit`. A trailing partial
/// frame is zeroed. Returns frames written.
pub fn fill_interleaved<F>(data: &mut [f32], channels: usize, limit: f32, mut next_sample: F) -> usize
where
    F: FnMut() -> f32,
{
    let channels = channels.max(1);
    let mut chunks = data.chunks_exact_mut(channels);
    let mut frames = 0;
    for frame in &mut chunks {
        let sample = next_sample().clamp(-limit, limit);
        frame.fill(sample);
        frames += 1;
    }
    chunks.into_remainder().fill(0.0);
    frames
}

/// Handle to one voice in a shared [`Mixer`]
pub struct MixerVoice {
    id: u64,
    mixer: Arc<Mutex<Mixer>>,
    released: bool,
}

impl MixerVoice {
    pub fn new(id: u64, mixer: Arc<Mutex<Mixer>>) -> Self {
        Self {
            id,
            mixer,
            released: false,
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.mixer.lock() {
            Ok(mut mixer) => mixer.remove(self.id),
            Err(_) => log::error!("Mixer lock poisoned, voice {} leaked", self.id),
        }
    }
}

impl Voice for MixerVoice {
    fn start(&mut self, at: f64) -> Result<(), ToneError> {
        if self.released {
            return Err(ToneError::Stopped);
        }
        let mut mixer = self
            .mixer
            .lock()
            .map_err(|_| ToneError::Unavailable("mixer lock poisoned".to_string()))?;
        mixer.start(self.id, at)
    }

    fn stop(&mut self, _at: f64) {
        // The engine has no scheduling; every stop is immediate
        self.release();
    }
}

impl Drop for MixerVoice {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE_HZ: usize = 44_100;

    fn shared_mixer() -> Arc<Mutex<Mixer>> {
        let mixer = Mixer::new(AudioParams::default(), SAMPLE_RATE_HZ).unwrap();
        Arc::new(Mutex::new(mixer))
    }

    /// Largest absolute sample over the next `samples` samples
    fn peak(mixer: &Arc<Mutex<Mixer>>, samples: usize) -> f32 {
        let mut mixer = mixer.lock().unwrap();
        (0..samples).fold(0.0f32, |peak, _| peak.max(mixer.next_sample().abs()))
    }

    fn sounding(mixer: &Arc<Mutex<Mixer>>) -> usize {
        mixer.lock().unwrap().sounding()
    }

    fn voice(mixer: &Arc<Mutex<Mixer>>, frequency_hz: f32, gain: f32) -> MixerVoice {
        let id = mixer.lock().unwrap().add(frequency_hz, gain);
        MixerVoice::new(id, Arc::clone(mixer))
    }

    #[test]
    fn test_started_voice_is_audible_and_drop_silences() {
        let mixer = shared_mixer();
        let mut tone = voice(&mixer, 440.0, 1.0);

        // Registered but not started: nothing in the mix
        assert_eq!(sounding(&mixer), 0);
        assert!(peak(&mixer, 4096) < 1e-6);

        tone.start(1.0).unwrap();
        assert_eq!(sounding(&mixer), 1);
        // Past the 40ms delay stage the sine sits at gain * voice_level = 0.1
        let loud = peak(&mixer, 8192);
        assert!(loud > 0.05, "peak {} too quiet", loud);
        assert!(loud <= 0.1 + 1e-3, "peak {} above voice level", loud);

        drop(tone);
        assert_eq!(sounding(&mixer), 0);
        peak(&mixer, 4096);
        assert!(peak(&mixer, 4096) < 1e-6);
    }

    #[test]
    fn test_only_started_voices_count_as_sounding() {
        let mixer = shared_mixer();
        let mut first = voice(&mixer, 440.0, 0.5);
        let _pending = voice(&mixer, 550.0, 0.5);
        let mut third = voice(&mixer, 660.0, 0.5);

        first.start(0.0).unwrap();
        third.start(0.5).unwrap();
        assert_eq!(sounding(&mixer), 2);
    }

    #[test]
    fn test_stop_then_drop_releases_once() {
        let mixer = shared_mixer();
        let mut stopped = voice(&mixer, 440.0, 0.5);
        let mut other = voice(&mixer, 660.0, 0.5);
        stopped.start(0.0).unwrap();
        other.start(0.0).unwrap();

        stopped.stop(1.0);
        assert_eq!(sounding(&mixer), 1);
        assert!(matches!(stopped.start(2.0), Err(ToneError::Stopped)));

        drop(stopped);
        assert_eq!(sounding(&mixer), 1);
        assert!(peak(&mixer, 8192) > 0.01);

        drop(other);
        assert_eq!(sounding(&mixer), 0);
    }

    #[test]
    fn test_unknown_ids_are_rejected_or_ignored() {
        let mut mixer = Mixer::new(AudioParams::default(), SAMPLE_RATE_HZ).unwrap();
        assert!(matches!(mixer.start(42, 0.0), Err(ToneError::Stopped)));

        mixer.remove(42);
        assert_eq!(mixer.sounding(), 0);
    }

    #[test]
    fn test_fill_duplicates_mono_to_every_channel() {
        let mut data = [9.0f32; 6];
        let mut samples = [0.1f32, 0.2, 0.3].into_iter();

        let frames = fill_interleaved(&mut data, 2, 0.5, || samples.next().unwrap_or(0.0));

        assert_eq!(frames, 3);
        assert_eq!(data, [0.1, 0.1, 0.2, 0.2, 0.3, 0.3]);
    }

    #[test]
    fn test_fill_applies_limiter() {
        let mut data = [0.0f32; 4];
        let mut samples = [2.0f32, -3.0, 0.25, -0.25].into_iter();

        fill_interleaved(&mut data, 1, 0.5, || samples.next().unwrap_or(0.0));

        assert_eq!(data, [0.5, -0.5, 0.25, -0.25]);
    }

    #[test]
    fn test_fill_zeroes_partial_trailing_frame() {
        let mut data = [7.0f32; 5];
        let frames = fill_interleaved(&mut data, 2, 0.5, || 0.0);

        assert_eq!(frames, 2);
        assert_eq!(data, [0.0; 5]);
    }
}
