//! Mixer — sums equal-length layers, peak-normalizes, quantizes to i16.

use crate::error::SynthError;

/// A summing mixer over a fixed-length buffer.
///
/// Layers may push the sum well outside [-1, 1]; normalization happens once,
/// on output.
#[derive(Debug, Clone)]
pub struct Mixer {
    buffer: Vec<f64>,
    layers: usize,
}

impl Mixer {
    /// Prepare a silent buffer of `num_samples`.
    pub fn new(num_samples: usize) -> Self {
        Mixer {
            buffer: vec![0.0; num_samples],
            layers: 0,
        }
    }

    /// Add a whole layer. The layer must be exactly as long as the buffer.
    pub fn add_layer(&mut self, samples: &[f64]) -> Result<(), SynthError> {
        if samples.len() != self.buffer.len() {
            return Err(SynthError::LayerLengthMismatch {
                index: self.layers,
                expected: self.buffer.len(),
                found: samples.len(),
            });
        }
        for (dst, src) in self.buffer.iter_mut().zip(samples) {
            *dst += src;
        }
        self.layers += 1;
        Ok(())
    }

    /// Largest absolute sample in the mix so far.
    pub fn peak(&self) -> f64 {
        self.buffer.iter().fold(0.0_f64, |m, s| m.max(s.abs()))
    }

    /// The summed, un-normalized buffer.
    pub fn raw(&self) -> &[f64] {
        &self.buffer
    }

    /// Peak-normalized copy of the mix. A silent mix stays silent.
    pub fn normalized(&self) -> Vec<f64> {
        let peak = self.peak();
        if peak == 0.0 {
            return self.buffer.clone();
        }
        self.buffer.iter().map(|&s| s / peak).collect()
    }

    /// Peak-normalize and quantize to 16-bit PCM.
    pub fn to_pcm_i16(&self) -> Vec<i16> {
        self.normalized().into_iter().map(quantize).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Sum `layers`, normalize to the peak and quantize to i16.
///
/// Every layer must have the same length; a mismatch is a sequencing bug and
/// is reported, not padded.
pub fn mix_and_quantize<L: AsRef<[f64]>>(layers: &[L]) -> Result<Vec<i16>, SynthError> {
    let Some(first) = layers.first() else {
        return Ok(Vec::new());
    };
    let mut mixer = Mixer::new(first.as_ref().len());
    for layer in layers {
        mixer.add_layer(layer.as_ref())?;
    }
    Ok(mixer.to_pcm_i16())
}

/// Scale a [-1, 1] sample to full-scale 16-bit.
fn quantize(s: f64) -> i16 {
    (s * 32767.0).round().clamp(-32768.0, 32767.0) as i16
}
