//! Percussion — a tiled pattern of drum and tambourine hits.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SynthError;

use super::rate::SampleRate;

/// Length of every hit in seconds.
pub const HIT_SECONDS: f64 = 0.2;

const DRUM_FREQ: f64 = 80.0;
const DRUM_DECAY: f64 = 0.1;
const DRUM_LEVEL: f64 = 0.15;

const TAMBOURINE_FREQ: f64 = 800.0;
const TAMBOURINE_DECAY: f64 = 0.05;
const TAMBOURINE_LEVEL: f64 = 0.1;
const TAMBOURINE_NOISE_MIX: f64 = 0.7;

/// One pattern slot. Serialized as its numeric code (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Hit {
    Silence = 0,
    Drum = 1,
    Tambourine = 2,
}

impl TryFrom<u8> for Hit {
    type Error = SynthError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Hit::Silence),
            1 => Ok(Hit::Drum),
            2 => Ok(Hit::Tambourine),
            _ => Err(SynthError::UnknownName {
                kind: "hit code",
                name: code.to_string(),
            }),
        }
    }
}

impl From<Hit> for u8 {
    fn from(hit: Hit) -> u8 {
        hit as u8
    }
}

/// Parse a slice of numeric hit codes.
pub fn pattern_from_codes(codes: &[u8]) -> Result<Vec<Hit>, SynthError> {
    codes.iter().map(|&c| Hit::try_from(c)).collect()
}

/// Render `round(duration * rate)` samples of `pattern`, tiled end to end
/// with `tempo` seconds per slot.
///
/// Tiling stops at the first hit whose full 0.2 s body would not fit in the
/// buffer. Tambourine noise is drawn from `rng`. A tempo shorter than one
/// sample is rejected.
pub fn render_percussion<R: Rng + ?Sized>(
    duration: f64,
    pattern: &[Hit],
    tempo: f64,
    rate: SampleRate,
    rng: &mut R,
) -> Result<Vec<f64>, SynthError> {
    // A slot shorter than one sample would pile every hit onto the same
    // few indices and tile almost forever.
    if !tempo.is_finite() || tempo * rate.hz() < 1.0 {
        return Err(SynthError::InvalidTempo(tempo));
    }

    let len = rate.samples_for(duration);
    let mut out = vec![0.0; len];
    if pattern.iter().all(|&h| h == Hit::Silence) {
        return Ok(out);
    }

    let hit_len = rate.samples_for(HIT_SECONDS);
    let drum = drum_hit(hit_len, rate);
    let pattern_seconds = pattern.len() as f64 * tempo;
    let repeats = (duration.max(0.0) / pattern_seconds) as usize + 1;

    'tiles: for repeat in 0..repeats {
        let tile_start = repeat as f64 * pattern_seconds;
        for (slot, &hit) in pattern.iter().enumerate() {
            if hit == Hit::Silence {
                continue;
            }
            let start = rate.samples_for(tile_start + slot as f64 * tempo);
            let end = start + hit_len;
            if end > len {
                break 'tiles;
            }
            let dst = &mut out[start..end];
            match hit {
                Hit::Drum => {
                    for (d, s) in dst.iter_mut().zip(&drum) {
                        *d += s;
                    }
                }
                Hit::Tambourine => {
                    for (d, s) in dst.iter_mut().zip(tambourine_hit(hit_len, rate, rng)) {
                        *d += s;
                    }
                }
                Hit::Silence => {}
            }
        }
    }

    Ok(out)
}

/// Exponentially decaying 80 Hz sine.
fn drum_hit(len: usize, rate: SampleRate) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = rate.seconds_at(n);
            DRUM_LEVEL * (-t / DRUM_DECAY).exp() * (2.0 * PI * DRUM_FREQ * t).sin()
        })
        .collect()
}

/// Exponentially decaying mix of Gaussian noise and an 800 Hz sine.
fn tambourine_hit<R: Rng + ?Sized>(len: usize, rate: SampleRate, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = rate.seconds_at(n);
            let noise = standard_normal(rng);
            let tone = (2.0 * PI * TAMBOURINE_FREQ * t).sin();
            TAMBOURINE_LEVEL
                * (-t / TAMBOURINE_DECAY).exp()
                * (TAMBOURINE_NOISE_MIX * noise + (1.0 - TAMBOURINE_NOISE_MIX) * tone)
        })
        .collect()
}

/// Box-Muller draw from N(0, 1).
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u keeps the log argument in (0, 1].
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
