//! Track specification and rendering.
//!
//! A [`TrackSpec`] names everything needed to render one finished track:
//! the scale, the melody voice, an optional counterpoint, the drone, an
//! optional percussion pattern and an optional overtone pad. Rendering builds
//! each layer, fits it to the track length, and hands the stack to the mixer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dsp::counterpoint::{self, render_counterpoint};
use crate::dsp::drone::{render_drone, render_overtones};
use crate::dsp::mixer::mix_and_quantize;
use crate::dsp::percussion::{Hit, render_percussion};
use crate::dsp::rate::{SampleRate, check_duration};
use crate::dsp::scale::Scale;
use crate::dsp::sequencer::{NoteEvent, render_melody, total_duration};
use crate::dsp::timbre::Timbre;
use crate::error::SynthError;

fn unity() -> f64 {
    1.0
}

fn counterpoint_amplitude() -> f64 {
    counterpoint::DEFAULT_AMPLITUDE
}

/// One melodic line: what to play, on what, how loud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub events: Vec<NoteEvent>,
    pub instrument: String,
    pub amplitude: f64,
}

impl Voice {
    pub fn total_duration(&self) -> f64 {
        total_duration(&self.events)
    }
}

/// A counterpoint voice derived from the melody.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpointSpec {
    pub instrument: String,
    /// Delay behind the melody in seconds.
    pub offset: f64,
    #[serde(default = "counterpoint_amplitude")]
    pub amplitude: f64,
    /// Layer gain applied when mixing.
    #[serde(default = "unity")]
    pub gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneSpec {
    pub root_index: i32,
    pub fifth_index: i32,
    pub instrument: String,
    #[serde(default = "unity")]
    pub gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercussionSpec {
    pub pattern: Vec<Hit>,
    /// Seconds per pattern slot.
    pub tempo: f64,
    #[serde(default = "unity")]
    pub gain: f64,
}

/// Upper partials of the scale root, held for the whole track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertoneSpec {
    /// `weights[i]` is the level of harmonic `i + 1` of the root.
    pub weights: Vec<f64>,
}

/// Everything needed to render one finished track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub name: String,
    pub scale: String,
    /// Track length in seconds.
    pub duration: f64,
    pub melody: Voice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterpoint: Option<CounterpointSpec>,
    pub drone: DroneSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percussion: Option<PercussionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtones: Option<OvertoneSpec>,
}

impl TrackSpec {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render and mix this track to 16-bit PCM.
    pub fn render<R: Rng + ?Sized>(&self, rate: SampleRate, rng: &mut R) -> Result<Vec<i16>, SynthError> {
        render_track(self, rate, rng)
    }
}

/// Render every layer of `spec`, each exactly `round(duration * rate)` long
/// and already scaled by its layer gain.
///
/// Randomness is drawn in a fixed order (counterpoint, then percussion), so a
/// given seed always yields the same layers.
pub fn render_layers<R: Rng + ?Sized>(
    spec: &TrackSpec,
    rate: SampleRate,
    rng: &mut R,
) -> Result<Vec<Vec<f64>>, SynthError> {
    let rate = rate.checked()?;
    let len = rate.samples_for(check_duration(spec.duration)?);
    let scale = Scale::by_name_or_default(&spec.scale);
    let mut layers = Vec::with_capacity(5);

    let melody_timbre = Timbre::by_name_or_default(&spec.melody.instrument);
    let melody = render_melody(scale, &spec.melody.events, melody_timbre, spec.melody.amplitude, rate)?;
    debug!(track = %spec.name, samples = melody.len(), "melody rendered");
    layers.push(fit(melody, len, 1.0));

    if let Some(cp) = &spec.counterpoint {
        let timbre = Timbre::by_name_or_default(&cp.instrument);
        let line = render_counterpoint(scale, &spec.melody.events, cp.offset, timbre, cp.amplitude, rate, rng)?;
        debug!(track = %spec.name, samples = line.len(), "counterpoint rendered");
        layers.push(fit(line, len, cp.gain));
    }

    let drone_timbre = Timbre::by_name_or_default(&spec.drone.instrument);
    let drone = render_drone(
        scale,
        spec.duration,
        spec.drone.root_index,
        spec.drone.fifth_index,
        drone_timbre,
        rate,
    );
    debug!(track = %spec.name, samples = drone.len(), "drone rendered");
    layers.push(fit(drone, len, spec.drone.gain));

    if let Some(perc) = &spec.percussion {
        let hits = render_percussion(spec.duration, &perc.pattern, perc.tempo, rate, rng)?;
        debug!(track = %spec.name, samples = hits.len(), "percussion rendered");
        layers.push(fit(hits, len, perc.gain));
    }

    if let Some(pad) = &spec.overtones {
        let tones = render_overtones(scale.frequency(0), spec.duration, &pad.weights, rate);
        debug!(track = %spec.name, samples = tones.len(), "overtones rendered");
        layers.push(fit(tones, len, 1.0));
    }

    Ok(layers)
}

/// Render, mix and quantize a whole track.
pub fn render_track<R: Rng + ?Sized>(
    spec: &TrackSpec,
    rate: SampleRate,
    rng: &mut R,
) -> Result<Vec<i16>, SynthError> {
    info!(
        track = %spec.name,
        scale = %spec.scale,
        duration = spec.duration,
        "rendering track"
    );
    let layers = render_layers(spec, rate, rng)?;
    let pcm = mix_and_quantize(&layers)?;
    info!(track = %spec.name, layers = layers.len(), samples = pcm.len(), "track mixed");
    Ok(pcm)
}

/// Cut or extend a layer to `len` samples and apply its gain. Anything past
/// the end of the track is dropped; a layer that ends early is silent after.
fn fit(mut samples: Vec<f64>, len: usize, gain: f64) -> Vec<f64> {
    samples.resize(len, 0.0);
    if gain != 1.0 {
        for s in &mut samples {
            *s *= gain;
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_spec() -> TrackSpec {
        TrackSpec {
            name: "test".to_string(),
            scale: "dorian".to_string(),
            duration: 2.0,
            melody: Voice {
                events: vec![
                    NoteEvent::note(0, 0.5),
                    NoteEvent::note(2, 0.5),
                    NoteEvent::rest(0.5),
                    NoteEvent::note(4, 1.0),
                ],
                instrument: "flute".to_string(),
                amplitude: 0.3,
            },
            counterpoint: Some(CounterpointSpec {
                instrument: "recorder".to_string(),
                offset: 0.25,
                amplitude: 0.2,
                gain: 1.0,
            }),
            drone: DroneSpec {
                root_index: 0,
                fifth_index: 4,
                instrument: "viol".to_string(),
                gain: 0.7,
            },
            percussion: Some(PercussionSpec {
                pattern: vec![Hit::Drum, Hit::Silence, Hit::Tambourine, Hit::Silence],
                tempo: 0.5,
                gain: 1.0,
            }),
            overtones: None,
        }
    }

    #[test]
    fn layers_share_track_length() {
        let spec = small_spec();
        let layers = render_layers(&spec, SampleRate::CD, &mut Pcg32::seed_from_u64(1)).unwrap();
        assert_eq!(layers.len(), 4);
        for layer in &layers {
            assert_eq!(layer.len(), 88200);
        }
    }

    #[test]
    fn long_melody_is_truncated() {
        let mut spec = small_spec();
        spec.duration = 1.0;
        let pcm = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(1)).unwrap();
        assert_eq!(pcm.len(), 44100);
    }

    #[test]
    fn short_melody_is_padded_with_silence() {
        let mut spec = small_spec();
        spec.duration = 5.0;
        spec.counterpoint = None;
        let layers = render_layers(&spec, SampleRate::CD, &mut Pcg32::seed_from_u64(1)).unwrap();
        let melody = &layers[0];
        assert_eq!(melody.len(), 220_500);
        assert!(melody[88200..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn gain_scales_layer() {
        let mut spec = small_spec();
        spec.drone.gain = 1.0;
        let full = render_layers(&spec, SampleRate::CD, &mut Pcg32::seed_from_u64(1)).unwrap();
        spec.drone.gain = 0.5;
        let half = render_layers(&spec, SampleRate::CD, &mut Pcg32::seed_from_u64(1)).unwrap();
        for (a, b) in full[2].iter().zip(&half[2]).step_by(97) {
            assert!((a * 0.5 - b).abs() < 1e-12);
        }
    }

    #[test]
    fn same_seed_bit_identical() {
        let spec = small_spec();
        let a = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(77)).unwrap();
        let b = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_names_fall_back() {
        let mut spec = small_spec();
        spec.scale = "locrian".to_string();
        spec.melody.instrument = "sackbut".to_string();
        let fallback = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(3)).unwrap();

        spec.melody.instrument = "flute".to_string();
        spec.scale = "dorian".to_string();
        let explicit = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(fallback, explicit);
    }

    #[test]
    fn invalid_tempo_propagates() {
        let mut spec = small_spec();
        if let Some(p) = spec.percussion.as_mut() {
            p.tempo = 0.0;
        }
        let result = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(3));
        assert!(matches!(result, Err(SynthError::InvalidTempo(_))));
    }

    #[test]
    fn unbounded_or_empty_durations_are_rejected() {
        for bad in [f64::INFINITY, f64::NAN, 0.0, -1.0] {
            let mut spec = small_spec();
            spec.duration = bad;
            let result = spec.render(SampleRate::CD, &mut Pcg32::seed_from_u64(1));
            assert!(matches!(result, Err(SynthError::InvalidDuration(_))), "{bad}");
        }
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let result = small_spec().render(SampleRate(0), &mut Pcg32::seed_from_u64(1));
        assert!(matches!(result, Err(SynthError::InvalidSampleRate(0))));
    }

    #[test]
    fn json_defaults_fill_gains() {
        let json = r#"{
            "name": "custom",
            "scale": "aeolian",
            "duration": 1.0,
            "melody": {
                "events": [{"degree": 0, "duration": 0.5}, {"degree": -1, "duration": 0.5}],
                "instrument": "harp",
                "amplitude": 0.25
            },
            "counterpoint": {"instrument": "viol", "offset": 0.5},
            "drone": {"root_index": 0, "fifth_index": 4, "instrument": "viol"},
            "percussion": {"pattern": [1, 0, 0, 0], "tempo": 0.25}
        }"#;
        let spec = TrackSpec::from_json(json).unwrap();
        let cp = spec.counterpoint.as_ref().unwrap();
        assert_eq!(cp.amplitude, counterpoint::DEFAULT_AMPLITUDE);
        assert_eq!(cp.gain, 1.0);
        assert_eq!(spec.drone.gain, 1.0);
        assert_eq!(spec.percussion.as_ref().unwrap().pattern[0], Hit::Drum);
        assert!(spec.overtones.is_none());

        let back = TrackSpec::from_json(&spec.to_json().unwrap()).unwrap();
        assert_eq!(back, spec);
    }
}
