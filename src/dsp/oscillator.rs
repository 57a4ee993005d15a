//! Additive oscillator — a fundamental plus weighted integer harmonics.

use std::f64::consts::PI;

use super::rate::SampleRate;

/// A stateless additive tone generator.
///
/// Sample `n` is `amplitude * Σ weights[k-1] * sin(2π · frequency · k · n / rate)`.
/// Time is absolute from the start of the rendered span, so every render of
/// the same tone is bit-identical.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicOscillator<'a> {
    pub frequency: f64,
    pub amplitude: f64,
    pub weights: &'a [f64],
}

impl<'a> HarmonicOscillator<'a> {
    pub fn new(frequency: f64, amplitude: f64, weights: &'a [f64]) -> Self {
        HarmonicOscillator {
            frequency,
            amplitude,
            weights,
        }
    }

    /// Render `len` samples.
    pub fn render(&self, len: usize, rate: SampleRate) -> Vec<f64> {
        let mut out = vec![0.0; len];
        self.add_into(&mut out, rate);
        out
    }

    /// Add the tone onto an existing buffer, starting at t = 0.
    ///
    /// Works one harmonic at a time over the whole buffer rather than one
    /// sample at a time over all harmonics.
    pub fn add_into(&self, out: &mut [f64], rate: SampleRate) {
        for (i, &weight) in self.weights.iter().enumerate() {
            if weight == 0.0 {
                continue;
            }
            let harmonic = (i + 1) as f64;
            let omega = 2.0 * PI * self.frequency * harmonic / rate.hz();
            let gain = self.amplitude * weight;
            for (n, sample) in out.iter_mut().enumerate() {
                *sample += gain * (omega * n as f64).sin();
            }
        }
    }
}
