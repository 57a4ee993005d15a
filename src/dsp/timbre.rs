//! Timbre registry — harmonic profiles that give each instrument its colour.

use tracing::warn;

use crate::error::SynthError;

/// Name used when a caller asks for an instrument that does not exist.
pub const DEFAULT_TIMBRE: &str = "flute";

/// A named set of harmonic weights. `weights[i]` scales harmonic `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timbre {
    pub name: &'static str,
    pub weights: &'static [f64],
}

/// Every registered instrument.
pub static TIMBRES: [Timbre; 5] = [
    Timbre {
        name: "flute",
        weights: &[1.0, 0.6, 0.1, 0.05, 0.02],
    },
    Timbre {
        name: "lute",
        weights: &[1.0, 0.5, 0.3, 0.2, 0.1, 0.05],
    },
    Timbre {
        name: "recorder",
        weights: &[1.0, 0.7, 0.2, 0.1],
    },
    Timbre {
        name: "viol",
        weights: &[1.0, 0.8, 0.6, 0.4, 0.2, 0.1],
    },
    Timbre {
        name: "harp",
        weights: &[1.0, 0.4, 0.2, 0.1, 0.05],
    },
];

impl Timbre {
    pub fn by_name(name: &str) -> Result<&'static Timbre, SynthError> {
        TIMBRES
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SynthError::UnknownName {
                kind: "instrument",
                name: name.to_string(),
            })
    }

    /// Look up an instrument, falling back to [`DEFAULT_TIMBRE`] on a miss.
    pub fn by_name_or_default(name: &str) -> &'static Timbre {
        match Timbre::by_name(name) {
            Ok(timbre) => timbre,
            Err(e) => {
                let known: Vec<&str> = Timbre::names().collect();
                warn!("{e} (known: {}); falling back to {DEFAULT_TIMBRE}", known.join(", "));
                &TIMBRES[0]
            }
        }
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        TIMBRES.iter().map(|t| t.name)
    }
}
