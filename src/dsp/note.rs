//! Note synthesis — one additive tone shaped by the note envelope.

use crate::error::SynthError;

use super::envelope::NoteEnvelope;
use super::oscillator::HarmonicOscillator;
use super::rate::SampleRate;
use super::timbre::Timbre;

/// Render one enveloped note of `round(duration * rate)` samples.
///
/// Rejects non-positive (or non-finite) frequencies and durations.
pub fn synthesize_note(
    frequency: f64,
    duration: f64,
    amplitude: f64,
    timbre: &Timbre,
    rate: SampleRate,
) -> Result<Vec<f64>, SynthError> {
    if !(frequency > 0.0 && frequency.is_finite() && duration > 0.0 && duration.is_finite()) {
        return Err(SynthError::InvalidNote {
            frequency,
            duration,
        });
    }

    let len = rate.samples_for(duration);
    let mut samples = HarmonicOscillator::new(frequency, amplitude, timbre.weights).render(len, rate);
    NoteEnvelope::new().apply(&mut samples);
    Ok(samples)
}
