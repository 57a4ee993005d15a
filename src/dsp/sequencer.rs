//! Melody sequencer — lays scale-degree/duration events end to end.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

use super::note::synthesize_note;
use super::rate::SampleRate;
use super::scale::Scale;
use super::timbre::Timbre;

/// One step of a melodic line. A negative degree is a rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub degree: i32,
    /// Length of the slot in seconds.
    pub duration: f64,
}

impl NoteEvent {
    pub const fn note(degree: i32, duration: f64) -> Self {
        NoteEvent { degree, duration }
    }

    pub const fn rest(duration: f64) -> Self {
        NoteEvent {
            degree: -1,
            duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.degree < 0
    }
}

/// Sum of all event durations, rests included.
pub fn total_duration(events: &[NoteEvent]) -> f64 {
    events.iter().map(|e| e.duration.max(0.0)).sum()
}

/// Render a melody spanning exactly `round(total_duration * rate)` samples.
pub fn render_melody(
    scale: &Scale,
    events: &[NoteEvent],
    timbre: &Timbre,
    amplitude: f64,
    rate: SampleRate,
) -> Result<Vec<f64>, SynthError> {
    render_sequence(scale, events, timbre, amplitude, 0.0, rate)
}

/// Render `events` after `lead` seconds of silence.
///
/// Each event starts where the previous one's slot ended. Notes are mixed
/// additively into the buffer; anything that would run past the end of the
/// buffer is cut off.
pub(crate) fn render_sequence(
    scale: &Scale,
    events: &[NoteEvent],
    timbre: &Timbre,
    amplitude: f64,
    lead: f64,
    rate: SampleRate,
) -> Result<Vec<f64>, SynthError> {
    let lead = lead.max(0.0);
    let mut out = vec![0.0; rate.samples_for(lead + total_duration(events))];

    let mut cursor = lead;
    for event in events {
        if event.is_rest() {
            cursor += event.duration.max(0.0);
            continue;
        }

        let start = rate.samples_for(cursor);
        let note = synthesize_note(
            scale.frequency(event.degree),
            event.duration,
            amplitude,
            timbre,
            rate,
        )?;
        if start < out.len() {
            let end = (start + note.len()).min(out.len());
            for (dst, src) in out[start..end].iter_mut().zip(&note) {
                *dst += src;
            }
        }

        cursor += event.duration;
    }

    Ok(out)
}
