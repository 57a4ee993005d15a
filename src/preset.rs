//! Track presets — one fixed arrangement per time of day, plus the legacy
//! background track.
//!
//! Each preset is pure data: a scale, two hand-written phrases, instrument
//! choices, layer gains and a percussion pattern. [`Preset::track_spec`]
//! turns that data into a [`TrackSpec`] of the requested length.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::counterpoint;
use crate::dsp::percussion::Hit::{self, Drum, Silence, Tambourine};
use crate::dsp::rate::check_duration;
use crate::dsp::sequencer::{NoteEvent, total_duration};
use crate::error::SynthError;
use crate::track::{CounterpointSpec, DroneSpec, OvertoneSpec, PercussionSpec, TrackSpec, Voice};

/// Default track length in seconds.
pub const DEFAULT_DURATION: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Legacy single-phrase track kept for older builds of the game.
    Background,
    Morning,
    Midday,
    Afternoon,
    Evening,
    Night,
}

impl Preset {
    /// The five time-of-day tracks.
    pub const TIME_OF_DAY: [Preset; 5] = [
        Preset::Morning,
        Preset::Midday,
        Preset::Afternoon,
        Preset::Evening,
        Preset::Night,
    ];

    /// Every track, in generation order.
    pub const ALL: [Preset; 6] = [
        Preset::Background,
        Preset::Morning,
        Preset::Midday,
        Preset::Afternoon,
        Preset::Evening,
        Preset::Night,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Background => "background",
            Preset::Morning => "morning",
            Preset::Midday => "midday",
            Preset::Afternoon => "afternoon",
            Preset::Evening => "evening",
            Preset::Night => "night",
        }
    }

    /// Output file name, e.g. `medieval_night.wav`.
    pub fn file_name(self) -> String {
        format!("medieval_{}.wav", self.name())
    }

    /// Position in [`Preset::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Build the track spec for `duration` seconds. The duration must be
    /// finite and positive.
    pub fn track_spec(self, duration: f64) -> Result<TrackSpec, SynthError> {
        let duration = check_duration(duration)?;
        let table = self.table();
        Ok(TrackSpec {
            name: self.name().to_string(),
            scale: table.scale.to_string(),
            duration,
            melody: Voice {
                events: arrange(table.phrases, duration),
                instrument: table.melody.to_string(),
                amplitude: table.melody_amplitude,
            },
            counterpoint: table.counterpoint.map(|(instrument, offset, gain)| CounterpointSpec {
                instrument: instrument.to_string(),
                offset,
                amplitude: counterpoint::DEFAULT_AMPLITUDE,
                gain,
            }),
            drone: DroneSpec {
                root_index: 0,
                fifth_index: 4,
                instrument: "viol".to_string(),
                gain: table.drone_gain,
            },
            percussion: table.percussion.map(|(pattern, tempo, gain)| PercussionSpec {
                pattern: pattern.to_vec(),
                tempo,
                gain,
            }),
            overtones: table.overtones.map(|weights| OvertoneSpec {
                weights: weights.to_vec(),
            }),
        })
    }

    fn table(self) -> &'static PresetTable {
        match self {
            Preset::Background => &BACKGROUND,
            Preset::Morning => &MORNING,
            Preset::Midday => &MIDDAY,
            Preset::Afternoon => &AFTERNOON,
            Preset::Evening => &EVENING,
            Preset::Night => &NIGHT,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| SynthError::UnknownName {
                kind: "preset",
                name: s.to_string(),
            })
    }
}

/// Repeat the phrases in order (A, B, A, B, ...) until they cover `duration`.
/// The last phrase may overhang; the track renderer cuts it off. A
/// non-finite duration arranges nothing.
pub fn arrange(phrases: &[&[NoteEvent]], duration: f64) -> Vec<NoteEvent> {
    let mut events = Vec::new();
    if !duration.is_finite() || phrases.iter().all(|p| total_duration(p) <= 0.0) {
        return events;
    }
    let mut covered = 0.0;
    for phrase in phrases.iter().cycle() {
        if covered >= duration {
            break;
        }
        events.extend_from_slice(phrase);
        covered += total_duration(phrase);
    }
    events
}

/// Static description of one preset.
struct PresetTable {
    scale: &'static str,
    phrases: &'static [&'static [NoteEvent]],
    melody: &'static str,
    melody_amplitude: f64,
    /// (instrument, offset seconds, layer gain)
    counterpoint: Option<(&'static str, f64, f64)>,
    drone_gain: f64,
    /// (pattern, seconds per slot, layer gain)
    percussion: Option<(&'static [Hit], f64, f64)>,
    overtones: Option<&'static [f64]>,
}

const fn note(degree: i32, duration: f64) -> NoteEvent {
    NoteEvent::note(degree, duration)
}

const fn rest(duration: f64) -> NoteEvent {
    NoteEvent::rest(duration)
}

// Morning: lydian, bright ascending lines.

const MORNING_A: &[NoteEvent] = &[
    note(0, 1.0), note(1, 0.5), note(2, 0.5), note(3, 0.5), note(4, 0.5), note(5, 1.0),
    note(4, 0.5), note(3, 0.5), note(2, 0.5), note(1, 0.5), note(0, 1.0), note(1, 0.5),
    note(2, 0.5), note(3, 0.5), note(4, 0.5), note(5, 1.0), note(6, 0.5), note(7, 1.0),
    note(6, 0.5), note(5, 0.5), note(4, 0.5), note(3, 0.5), note(2, 0.5), note(1, 0.5),
    note(0, 1.0),
];

const MORNING_B: &[NoteEvent] = &[
    note(4, 0.5), note(5, 0.5), note(6, 0.5), note(7, 1.0), note(6, 0.5), note(5, 0.5),
    note(4, 1.0), note(3, 0.5), note(4, 0.5), note(5, 1.0), note(4, 0.5), note(3, 0.5),
    note(2, 0.5), note(1, 0.5), note(2, 0.5), note(3, 0.5), note(4, 1.0), note(3, 0.5),
    note(2, 0.5), note(1, 0.5), note(0, 0.5), note(1, 0.5), note(2, 0.5), note(3, 0.5),
    note(4, 1.0),
];

static MORNING: PresetTable = PresetTable {
    scale: "lydian",
    phrases: &[MORNING_A, MORNING_B],
    melody: "flute",
    melody_amplitude: 0.3,
    counterpoint: Some(("recorder", 0.25, 1.0)),
    drone_gain: 0.7,
    percussion: Some((&[Drum, Silence, Tambourine, Silence, Drum, Silence, Tambourine, Silence], 0.5, 1.0)),
    overtones: None,
};

// Midday: mixolydian, busy eighth-note figures.

const MIDDAY_A: &[NoteEvent] = &[
    note(0, 0.5), note(2, 0.5), note(4, 0.5), note(2, 0.5), note(0, 0.5), note(2, 0.5),
    note(4, 0.5), note(5, 0.5), note(4, 0.5), note(2, 0.5), note(0, 1.0), rest(0.5),
    note(0, 0.5), note(2, 0.5), note(4, 0.5), note(5, 0.5), note(7, 1.0), note(5, 0.5),
    note(4, 0.5), note(2, 0.5), note(4, 0.5), note(5, 0.5), note(4, 0.5), note(2, 0.5),
    note(0, 1.0),
];

const MIDDAY_B: &[NoteEvent] = &[
    note(7, 0.5), note(5, 0.5), note(4, 0.5), note(5, 0.5), note(7, 1.0), note(5, 0.5),
    note(4, 0.5), note(2, 0.5), note(0, 0.5), note(2, 0.5), note(4, 0.5), note(2, 0.5),
    note(0, 1.0), rest(0.5), note(0, 0.5), note(2, 0.5), note(4, 0.5), note(5, 0.5),
    note(4, 0.5), note(2, 0.5), note(0, 1.0), note(2, 0.5), note(0, 0.5), rest(0.5),
    note(0, 1.0),
];

static MIDDAY: PresetTable = PresetTable {
    scale: "mixolydian",
    phrases: &[MIDDAY_A, MIDDAY_B],
    melody: "recorder",
    melody_amplitude: 0.3,
    counterpoint: Some(("lute", 0.25, 1.0)),
    drone_gain: 0.6,
    percussion: Some((&[Drum, Tambourine, Drum, Silence, Drum, Tambourine, Drum, Tambourine], 0.4, 1.0)),
    overtones: None,
};

// Afternoon: dorian, relaxed and flowing.

const AFTERNOON_A: &[NoteEvent] = &[
    note(0, 1.0), note(2, 0.5), note(3, 0.5), note(5, 1.0), note(3, 0.5), note(2, 0.5),
    note(0, 1.0), note(2, 0.5), note(3, 0.5), note(2, 0.5), note(0, 1.0), rest(0.5),
    note(0, 1.0), note(2, 0.5), note(3, 0.5), note(5, 1.0), note(7, 1.0), note(5, 0.5),
    note(3, 0.5), note(2, 0.5), note(3, 0.5), note(2, 0.5), note(0, 1.5),
];

const AFTERNOON_B: &[NoteEvent] = &[
    note(5, 1.0), note(7, 1.0), note(5, 0.5), note(3, 0.5), note(5, 0.5), note(3, 0.5),
    note(2, 0.5), note(0, 1.0), note(2, 0.5), note(3, 0.5), note(5, 1.0), note(3, 0.5),
    note(2, 0.5), note(0, 1.0), rest(0.5), note(0, 0.5), note(2, 0.5), note(3, 0.5),
    note(2, 0.5), note(0, 1.5),
];

static AFTERNOON: PresetTable = PresetTable {
    scale: "dorian",
    phrases: &[AFTERNOON_A, AFTERNOON_B],
    melody: "lute",
    melody_amplitude: 0.3,
    counterpoint: Some(("flute", 0.25, 1.0)),
    drone_gain: 0.8,
    percussion: Some((&[Drum, Silence, Silence, Tambourine, Silence, Silence, Drum, Silence], 0.6, 0.7)),
    overtones: None,
};

// Evening: aeolian, descending and contemplative.

const EVENING_A: &[NoteEvent] = &[
    note(7, 1.5), note(5, 0.5), note(4, 0.5), note(2, 0.5), note(0, 1.5), note(2, 0.5),
    note(4, 0.5), note(2, 0.5), note(0, 1.5), rest(0.5), note(0, 0.5), note(2, 0.5),
    note(0, 0.5), rest(0.5), note(0, 1.0), note(2, 0.5), note(4, 0.5), note(2, 0.5),
    note(0, 1.5),
];

const EVENING_B: &[NoteEvent] = &[
    note(4, 0.5), note(5, 0.5), note(7, 1.5), note(5, 0.5), note(4, 0.5), note(2, 0.5),
    note(4, 0.5), note(2, 0.5), note(0, 1.5), note(2, 0.5), note(0, 0.5), rest(0.5),
    note(0, 1.0), note(2, 0.5), note(0, 1.5),
];

static EVENING: PresetTable = PresetTable {
    scale: "aeolian",
    phrases: &[EVENING_A, EVENING_B],
    melody: "harp",
    melody_amplitude: 0.25,
    counterpoint: Some(("viol", 0.5, 0.7)),
    drone_gain: 0.9,
    percussion: Some((&[Drum, Silence, Silence, Silence, Silence, Silence, Silence, Silence], 0.8, 0.5)),
    overtones: None,
};

// Night: phrygian, sparse. No percussion.

const NIGHT_A: &[NoteEvent] = &[
    note(0, 1.5), note(1, 0.5), note(3, 1.0), note(1, 0.5), note(0, 1.5), rest(0.5),
    note(0, 1.0), note(1, 0.5), note(3, 1.0), note(5, 1.5), note(3, 0.5), note(1, 0.5),
    note(0, 1.5), rest(0.5), note(0, 1.0), note(1, 0.5), note(0, 2.0),
];

const NIGHT_B: &[NoteEvent] = &[
    note(5, 1.0), note(7, 1.5), note(5, 0.5), note(3, 1.0), note(1, 0.5), note(0, 1.5),
    note(1, 0.5), note(3, 1.0), note(1, 0.5), note(0, 1.5), rest(0.5), note(0, 1.0),
    note(1, 0.5), note(0, 2.0),
];

static NIGHT: PresetTable = PresetTable {
    scale: "phrygian",
    phrases: &[NIGHT_A, NIGHT_B],
    melody: "flute",
    melody_amplitude: 0.2,
    counterpoint: Some(("harp", 0.75, 0.6)),
    drone_gain: 1.0,
    percussion: None,
    overtones: None,
};

// Background: one dorian phrase on recorder over the drone and root overtones.

const BACKGROUND_PHRASE: &[NoteEvent] = &[
    note(0, 2.0), note(2, 1.0), note(4, 1.0), note(3, 2.0), note(2, 1.0), note(1, 1.0),
    note(0, 2.0), note(4, 1.0), note(2, 1.0), note(3, 2.0), note(1, 1.0), note(2, 1.0),
    note(0, 2.0),
];

static BACKGROUND: PresetTable = PresetTable {
    scale: "dorian",
    phrases: &[BACKGROUND_PHRASE],
    melody: "recorder",
    melody_amplitude: 0.3,
    counterpoint: None,
    drone_gain: 1.0,
    percussion: None,
    overtones: Some(&[0.0, 0.1 / 2.0, 0.1 / 3.0, 0.1 / 4.0]),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::scale::Scale;
    use crate::dsp::timbre::Timbre;

    #[test]
    fn phrase_lengths() {
        assert_eq!(total_duration(MORNING_A), 15.5);
        assert_eq!(total_duration(MORNING_B), 15.0);
        assert_eq!(total_duration(MIDDAY_A), 14.0);
        assert_eq!(total_duration(MIDDAY_B), 14.5);
        assert_eq!(total_duration(AFTERNOON_A), 16.0);
        assert_eq!(total_duration(AFTERNOON_B), 13.5);
        assert_eq!(total_duration(EVENING_A), 14.0);
        assert_eq!(total_duration(EVENING_B), 11.0);
        assert_eq!(total_duration(NIGHT_A), 16.0);
        assert_eq!(total_duration(NIGHT_B), 13.5);
        assert_eq!(total_duration(BACKGROUND_PHRASE), 18.0);
    }

    #[test]
    fn arrangement_covers_duration() {
        for preset in Preset::ALL {
            for duration in [1.0, 10.0, 60.0, DEFAULT_DURATION] {
                let spec = preset.track_spec(duration).unwrap();
                assert!(
                    spec.melody.total_duration() >= duration,
                    "{preset} melody too short for {duration}s"
                );
            }
        }
    }

    #[test]
    fn arrangement_alternates_phrases() {
        let events = arrange(&[NIGHT_A, NIGHT_B], 20.0);
        assert_eq!(events.len(), NIGHT_A.len() + NIGHT_B.len());
        assert_eq!(&events[..NIGHT_A.len()], NIGHT_A);
        assert_eq!(&events[NIGHT_A.len()..], NIGHT_B);
    }

    #[test]
    fn background_repeats_to_full_length() {
        let events = arrange(&[BACKGROUND_PHRASE], DEFAULT_DURATION);
        assert_eq!(events.len(), BACKGROUND_PHRASE.len() * 10);
    }

    #[test]
    fn empty_phrases_arrange_to_nothing() {
        assert!(arrange(&[&[]], 10.0).is_empty());
        assert!(arrange(&[MORNING_A], 0.0).is_empty());
    }

    #[test]
    fn non_finite_durations_arrange_to_nothing() {
        assert!(arrange(&[NIGHT_A, NIGHT_B], f64::NAN).is_empty());
        assert!(arrange(&[NIGHT_A, NIGHT_B], f64::INFINITY).is_empty());
    }

    #[test]
    fn track_spec_rejects_bad_durations() {
        for bad in [f64::NAN, f64::INFINITY, 0.0, -5.0] {
            assert!(
                matches!(Preset::Night.track_spec(bad), Err(SynthError::InvalidDuration(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn tables_reference_registered_names() {
        for preset in Preset::ALL {
            let spec = preset.track_spec(10.0).unwrap();
            assert!(Scale::by_name(&spec.scale).is_ok(), "{preset} scale");
            assert!(Timbre::by_name(&spec.melody.instrument).is_ok(), "{preset} melody");
            assert!(Timbre::by_name(&spec.drone.instrument).is_ok(), "{preset} drone");
            if let Some(cp) = &spec.counterpoint {
                assert!(Timbre::by_name(&cp.instrument).is_ok(), "{preset} counterpoint");
                assert_ne!(cp.instrument, spec.melody.instrument, "{preset} voices should differ");
            }
        }
    }

    #[test]
    fn night_has_no_percussion() {
        let spec = Preset::Night.track_spec(DEFAULT_DURATION).unwrap();
        assert!(spec.percussion.is_none());
        assert!(spec.counterpoint.is_some());
        for preset in [Preset::Morning, Preset::Midday, Preset::Afternoon, Preset::Evening] {
            assert!(preset.track_spec(DEFAULT_DURATION).unwrap().percussion.is_some(), "{preset}");
        }
    }

    #[test]
    fn modes_per_time_of_day() {
        let scales: Vec<String> = Preset::TIME_OF_DAY
            .iter()
            .map(|p| p.track_spec(1.0).unwrap().scale)
            .collect();
        assert_eq!(scales, ["lydian", "mixolydian", "dorian", "aeolian", "phrygian"]);
    }

    #[test]
    fn parse_names() {
        assert_eq!("night".parse::<Preset>().unwrap(), Preset::Night);
        assert_eq!(" Morning ".parse::<Preset>().unwrap(), Preset::Morning);
        assert!(matches!(
            "dusk".parse::<Preset>(),
            Err(SynthError::UnknownName { kind: "preset", .. })
        ));
    }

    #[test]
    fn file_names() {
        assert_eq!(Preset::Night.file_name(), "medieval_night.wav");
        assert_eq!(Preset::Background.file_name(), "medieval_background.wav");
    }

    #[test]
    fn index_matches_all_order() {
        for (i, preset) in Preset::ALL.into_iter().enumerate() {
            assert_eq!(preset.index(), i);
        }
    }
}
