//! Sample clock — converts between seconds and sample indices.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Output sample rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleRate(pub u32);

impl SampleRate {
    /// Reference rate used for every shipped track.
    pub const CD: SampleRate = SampleRate(44_100);

    /// Reject a zero rate, which would make every span empty.
    pub fn checked(self) -> Result<Self, SynthError> {
        if self.0 == 0 {
            return Err(SynthError::InvalidSampleRate(self.0));
        }
        Ok(self)
    }

    pub fn hz(self) -> f64 {
        self.0 as f64
    }

    /// Number of samples covering `seconds`, rounded to the nearest sample.
    /// Negative or NaN durations cover nothing.
    pub fn samples_for(self, seconds: f64) -> usize {
        let n = (seconds * self.hz()).round();
        if n > 0.0 { n as usize } else { 0 }
    }

    /// Time in seconds of sample `index`.
    pub fn seconds_at(self, index: usize) -> f64 {
        index as f64 / self.hz()
    }
}

/// A track length must be finite and positive.
pub fn check_duration(seconds: f64) -> Result<f64, SynthError> {
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(SynthError::InvalidDuration(seconds))
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        SampleRate::CD
    }
}
