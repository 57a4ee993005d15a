//! Scale registry — the five medieval modes as one-octave frequency ladders.
//!
//! Each scale holds eight frequencies: the final, six steps, and the final
//! an octave up. Degree lookups wrap modulo the ladder length, so degree 8
//! sounds the same pitch as degree 0 rather than climbing another octave.

use tracing::warn;

use crate::error::SynthError;

/// Name used when a caller asks for a scale that does not exist.
pub const DEFAULT_SCALE: &str = "dorian";

/// A named, immutable frequency ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    pub name: &'static str,
    pub frequencies: [f64; 8],
}

/// Every registered scale.
pub static SCALES: [Scale; 5] = [
    // A3 B3 C4 D4 E4 F4 G4 A4
    Scale {
        name: "dorian",
        frequencies: [220.0, 246.94, 261.63, 293.66, 329.63, 349.23, 392.0, 440.0],
    },
    // C4 D4 E4 F4 G4 A4 B4 C5
    Scale {
        name: "lydian",
        frequencies: [261.63, 293.66, 329.63, 349.23, 392.0, 440.0, 493.88, 523.25],
    },
    // E4 F4 G4 A4 B4 C5 D5 E5
    Scale {
        name: "phrygian",
        frequencies: [329.63, 349.23, 392.0, 440.0, 493.88, 523.25, 587.33, 659.26],
    },
    // D4 E4 F#4 G4 A4 B4 C5 D5
    Scale {
        name: "mixolydian",
        frequencies: [293.66, 329.63, 369.99, 392.0, 440.0, 493.88, 523.25, 587.33],
    },
    // A4 B4 C5 D5 E5 F5 G5 A5
    Scale {
        name: "aeolian",
        frequencies: [440.0, 493.88, 523.25, 587.33, 659.26, 698.46, 783.99, 880.0],
    },
];

impl Scale {
    /// Look up a scale by exact name.
    pub fn by_name(name: &str) -> Result<&'static Scale, SynthError> {
        SCALES
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SynthError::UnknownName {
                kind: "scale",
                name: name.to_string(),
            })
    }

    /// Look up a scale, falling back to [`DEFAULT_SCALE`] on a miss.
    pub fn by_name_or_default(name: &str) -> &'static Scale {
        match Scale::by_name(name) {
            Ok(scale) => scale,
            Err(e) => {
                let known: Vec<&str> = Scale::names().collect();
                warn!("{e} (known: {}); falling back to {DEFAULT_SCALE}", known.join(", "));
                &SCALES[0]
            }
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency of a scale degree. Wraps modulo the ladder length in both
    /// directions, so any integer is a valid degree.
    pub fn frequency(&self, degree: i32) -> f64 {
        let idx = degree.rem_euclid(self.len() as i32) as usize;
        self.frequencies[idx]
    }

    /// All registered scale names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        SCALES.iter().map(|s| s.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scale_has_eight_ascending_positive_steps() {
        for scale in &SCALES {
            assert_eq!(scale.len(), 8, "{} should have 8 entries", scale.name);
            assert!(scale.frequencies.iter().all(|&f| f > 0.0));
            for pair in scale.frequencies.windows(2) {
                assert!(
                    pair[1] > pair[0],
                    "{} is not strictly increasing: {} -> {}",
                    scale.name,
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn last_step_is_the_octave() {
        for scale in &SCALES {
            let ratio = scale.frequencies[7] / scale.frequencies[0];
            assert!((ratio - 2.0).abs() < 0.001, "{} octave ratio {ratio}", scale.name);
        }
    }

    #[test]
    fn lookup_by_name() {
        for name in ["dorian", "lydian", "phrygian", "mixolydian", "aeolian"] {
            assert_eq!(Scale::by_name(name).map(|s| s.name).ok(), Some(name));
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = Scale::by_name("locrian").unwrap_err();
        assert!(matches!(err, SynthError::UnknownName { kind: "scale", .. }));
    }

    #[test]
    fn unknown_name_falls_back_to_dorian() {
        assert_eq!(Scale::by_name_or_default("locrian").name, "dorian");
    }

    #[test]
    fn degrees_wrap_without_octave_doubling() {
        let scale = Scale::by_name("lydian").unwrap();
        assert_eq!(scale.frequency(8), scale.frequency(0));
        assert_eq!(scale.frequency(9), scale.frequency(1));
        assert_eq!(scale.frequency(-1), scale.frequency(7));
        assert_eq!(scale.frequency(-3), scale.frequency(5));
    }

    #[test]
    fn names_in_registry_order() {
        let names: Vec<&str> = Scale::names().collect();
        assert_eq!(names, ["dorian", "lydian", "phrygian", "mixolydian", "aeolian"]);
        assert_eq!(names[0], DEFAULT_SCALE);
    }
}
