//! Glicol patch generation for the live voice set.

use crate::params::AudioParams;

/// Patch used whenever nothing is sounding
pub const SILENCE: &str = "o: constsig 0.0\n";

/// One voice as the mixer tracks it
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSpec {
    pub frequency_hz: f32,

    /// User gain captured when the voice was created
    pub gain: f32,

    /// Engine time the voice was started at; `None` until started
    pub started_at: Option<f64>,
}

/// Compose the glicol code for every started voice.
///
/// Each voice gets its own chain, `osc → mul → delayms`, and the output
/// mixes the chains:
///
/// ```text
/// ~v0: sin 880.000 >> mul 0.0500 >> delayms 40.0
/// ~v3: sin 660.000 >> mul 0.0500 >> delayms 40.0
/// o: mix ~v0 ~v3
/// ```
pub fn compose_patch<'a, I>(voices: I, params: &AudioParams) -> String
where
    I: IntoIterator<Item = (u64, &'a VoiceSpec)>,
{
    let mut patch = String::new();
    let mut refs = Vec::new();

    for (id, voice) in voices {
        if voice.started_at.is_none() {
            continue;
        }

        let level = voice.gain * params.voice_level;
        patch.push_str(&format!(
            "~v{}: {} {:.3} >> mul {:.4}",
            id,
            params.waveform.node(),
            voice.frequency_hz,
            level
        ));
        if params.delay_ms > 0.0 {
            patch.push_str(&format!(" >> delayms {:.1}", params.delay_ms));
        }
        patch.push('\n');
        refs.push(format!("~v{}", id));
    }

    if refs.is_empty() {
        return SILENCE.to_string();
    }

    patch.push_str(&format!("o: mix {}\n", refs.join(" ")));
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Waveform;

    fn started(frequency_hz: f32, gain: f32) -> VoiceSpec {
        VoiceSpec {
            frequency_hz,
            gain,
            started_at: Some(0.0),
        }
    }

    #[test]
    fn test_no_voices_is_silence() {
        let patch = compose_patch(std::iter::empty(), &AudioParams::default());
        assert_eq!(patch, SILENCE);
    }

    #[test]
    fn test_unstarted_voices_are_left_out() {
        let pending = VoiceSpec {
            frequency_hz: 440.0,
            gain: 1.0,
            started_at: None,
        };
        let patch = compose_patch([(7, &pending)], &AudioParams::default());
        assert_eq!(patch, SILENCE);
    }

    #[test]
    fn test_voice_chains_are_mixed() {
        let a = started(880.0, 0.5);
        let b = started(660.0, 1.0);
        let patch = compose_patch([(0, &a), (3, &b)], &AudioParams::default());

        assert_eq!(
            patch,
            "~v0: sin 880.000 >> mul 0.0500 >> delayms 40.0\n\
             ~v3: sin 660.000 >> mul 0.1000 >> delayms 40.0\n\
             o: mix ~v0 ~v3\n"
        );
    }

    #[test]
    fn test_waveform_and_delay_follow_params() {
        let params = AudioParams {
            waveform: Waveform::Saw,
            delay_ms: 0.0,
            ..Default::default()
        };
        let voice = started(523.25, 0.5);
        let patch = compose_patch([(2, &voice)], &params);

        assert_eq!(patch, "~v2: saw 523.250 >> mul 0.0500\no: mix ~v2\n");
    }
}
