//! Render configuration.
//!
//! Loaded from an optional JSON file; any field left out takes its default.
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dsp::rate::{SampleRate, check_duration};
use crate::error::{ExportError, SynthError};
use crate::preset::DEFAULT_DURATION;

/// Seed used when none is given, so a plain run is reproducible.
pub const DEFAULT_SEED: u64 = 0x4d45_4449_4556_414c;

pub const DEFAULT_OUTPUT_DIR: &str = "assets/music";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub sample_rate: SampleRate,
    /// Track length in seconds.
    pub duration: f64,
    pub seed: u64,
    pub output_dir: PathBuf,
    /// Render tracks on the rayon pool instead of one after another.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sample_rate: SampleRate::CD,
            duration: DEFAULT_DURATION,
            seed: DEFAULT_SEED,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a render depends on: a finite, positive duration
    /// and a non-zero sample rate.
    pub fn validate(&self) -> Result<(), SynthError> {
        self.sample_rate.checked()?;
        check_duration(self.duration)?;
        Ok(())
    }
}
