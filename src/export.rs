//! Export — render presets and write them to disk.
//!
//! Every preset gets its own RNG stream derived from the configured seed, so
//! rendering in parallel or one at a time produces the same files.

use std::path::PathBuf;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use rayon::prelude::*;
use tracing::{error, info};

use crate::config::RenderConfig;
use crate::dsp::renderer::write_wav;
use crate::error::{ExportError, SynthError};
use crate::preset::Preset;

/// RNG for one preset's render.
pub fn preset_rng(seed: u64, preset: Preset) -> Pcg32 {
    Pcg32::seed_from_u64(seed.wrapping_add(preset.index() as u64))
}

/// Render `preset` to 16-bit PCM at the configured length and rate.
pub fn render_preset(preset: Preset, config: &RenderConfig) -> Result<Vec<i16>, SynthError> {
    config.validate()?;
    let spec = preset.track_spec(config.duration)?;
    let mut rng = preset_rng(config.seed, preset);
    spec.render(config.sample_rate, &mut rng)
}

/// Render `preset` and write it into the output directory.
pub fn export_preset(preset: Preset, config: &RenderConfig) -> Result<PathBuf, ExportError> {
    let pcm = render_preset(preset, config)?;
    std::fs::create_dir_all(&config.output_dir)?;
    let path = config.output_dir.join(preset.file_name());
    write_wav(&path, &pcm, config.sample_rate)?;
    info!(preset = %preset, path = %path.display(), samples = pcm.len(), "track written");
    Ok(path)
}

/// Outcome of exporting a batch of presets.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<(Preset, PathBuf)>,
    pub failed: Vec<(Preset, ExportError)>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, preset: Preset, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => self.written.push((preset, path)),
            Err(e) => {
                error!(preset = %preset, "export failed: {e}");
                self.failed.push((preset, e));
            }
        }
    }
}

/// Export every preset. A failing track is recorded and the rest carry on.
pub fn export_all(config: &RenderConfig) -> ExportReport {
    export_presets(&Preset::ALL, config)
}

pub fn export_presets(presets: &[Preset], config: &RenderConfig) -> ExportReport {
    info!(
        tracks = presets.len(),
        duration = config.duration,
        parallel = config.parallel,
        dir = %config.output_dir.display(),
        "exporting tracks"
    );

    let results: Vec<(Preset, Result<PathBuf, ExportError>)> = if config.parallel {
        presets
            .par_iter()
            .map(|&p| (p, export_preset(p, config)))
            .collect()
    } else {
        presets.iter().map(|&p| (p, export_preset(p, config))).collect()
    };

    let mut report = ExportReport::default();
    for (preset, result) in results {
        report.record(preset, result);
    }
    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "export finished"
    );
    report
}
