//! Counterpoint — a second voice a third or sixth away from the melody.

use rand::Rng;

use crate::error::SynthError;

use super::rate::SampleRate;
use super::scale::Scale;
use super::sequencer::{NoteEvent, render_sequence};
use super::timbre::Timbre;

/// Diatonic steps for a third and a sixth.
pub const INTERVALS: [i32; 2] = [2, 5];

/// Level of the counterpoint voice, about two thirds of a melody at 0.3.
pub const DEFAULT_AMPLITUDE: f64 = 0.2;

/// Derive the counterpoint line from a melody.
///
/// Rests stay rests. Every note moves up or down by a third or a sixth,
/// chosen uniformly at random, and the result wraps into the scale. Durations
/// are copied unchanged. Two draws are taken from `rng` per sounding note
/// (interval first, then direction) and none for rests.
pub fn derive_counterpoint<R: Rng + ?Sized>(
    scale_len: usize,
    melody: &[NoteEvent],
    rng: &mut R,
) -> Vec<NoteEvent> {
    let len = scale_len.max(1) as i32;
    melody
        .iter()
        .map(|event| {
            if event.is_rest() {
                return NoteEvent::rest(event.duration);
            }
            let interval = INTERVALS[rng.random_range(0..INTERVALS.len())];
            let direction = if rng.random_bool(0.5) { 1 } else { -1 };
            NoteEvent::note(
                (event.degree + interval * direction).rem_euclid(len),
                event.duration,
            )
        })
        .collect()
}

/// Derive and render the counterpoint, delayed by `time_offset` seconds.
///
/// The result spans the melody plus the lead silence.
pub fn render_counterpoint<R: Rng + ?Sized>(
    scale: &Scale,
    melody: &[NoteEvent],
    time_offset: f64,
    timbre: &Timbre,
    amplitude: f64,
    rate: SampleRate,
    rng: &mut R,
) -> Result<Vec<f64>, SynthError> {
    let line = derive_counterpoint(scale.len(), melody, rng);
    render_sequence(scale, &line, timbre, amplitude, time_offset, rate)
}
