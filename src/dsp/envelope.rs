//! Note envelope — attack / decay / sustain / release proportional to note length.

/// Four-segment envelope whose segment lengths are fractions of the note.
///
/// Segment boundaries are computed independently of each other. When a note
/// is short enough for the release to reach back into the attack or decay,
/// the later segment simply overwrites the earlier one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEnvelope {
    /// Fraction of the note spent ramping 0 → 1.
    pub attack: f64,
    /// Fraction of the note spent ramping 1 → sustain.
    pub decay: f64,
    /// Sustain level [0, 1].
    pub sustain: f64,
    /// Fraction of the note spent ramping sustain → 0 at the very end.
    pub release: f64,
}

impl NoteEnvelope {
    pub fn new() -> Self {
        NoteEnvelope {
            attack: 0.1,
            decay: 0.1,
            sustain: 0.7,
            release: 0.2,
        }
    }

    /// Build the gain curve for a note of `len` samples.
    pub fn shape(&self, len: usize) -> Vec<f64> {
        let mut env = vec![self.sustain; len];

        let attack = segment(len, self.attack);
        let decay = segment(len, self.decay);
        let release = segment(len, self.release);

        let decay_end = (attack + decay).min(len);
        ramp(&mut env[..attack], 0.0, 1.0);
        ramp(&mut env[attack..decay_end], 1.0, self.sustain);
        ramp(&mut env[len - release..], self.sustain, 0.0);

        env
    }

    /// Multiply `samples` by the envelope in place.
    pub fn apply(&self, samples: &mut [f64]) {
        let env = self.shape(samples.len());
        for (s, g) in samples.iter_mut().zip(env) {
            *s *= g;
        }
    }
}

impl Default for NoteEnvelope {
    fn default() -> Self {
        NoteEnvelope::new()
    }
}

/// Segment length in samples: floor(len * fraction), never longer than the note.
fn segment(len: usize, fraction: f64) -> usize {
    let n = (len as f64 * fraction.max(0.0)) as usize;
    n.min(len)
}

/// Inclusive linear ramp across `out`: first sample `from`, last sample `to`.
/// A one-sample ramp holds `from`.
fn ramp(out: &mut [f64], from: f64, to: f64) {
    let n = out.len();
    if n == 1 {
        out[0] = from;
        return;
    }
    let step = if n > 1 { (to - from) / (n - 1) as f64 } else { 0.0 };
    for (i, s) in out.iter_mut().enumerate() {
        *s = from + step * i as f64;
    }
    // Pin the endpoint exactly, as linspace does.
    if let Some(last) = out.last_mut() {
        *last = to;
    }
}
