//! hortus-music - render the medieval soundtrack
//!
//! With no subcommand, writes every track into the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use hortus_music::config::RenderConfig;
use hortus_music::dsp::renderer::write_wav;
use hortus_music::export::{ExportReport, export_all, export_presets};
use hortus_music::preset::Preset;
use hortus_music::track::TrackSpec;

#[derive(Parser)]
#[command(name = "hortus-music")]
#[command(about = "Procedural medieval music generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON render config (fields left out take defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Track length in seconds
    #[arg(short, long, global = true)]
    duration: Option<f64>,

    /// Random seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Output directory
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Render tracks one at a time
    #[arg(long, global = true)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every track (the default)
    All,

    /// Render one preset
    Preset {
        /// background, morning, midday, afternoon, evening or night
        name: String,
    },

    /// Print a preset's track spec as JSON
    Spec {
        name: String,
    },

    /// Render a track spec JSON file
    Render {
        /// Input spec file
        input: PathBuf,

        /// Output .wav file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match cli.command.unwrap_or(Commands::All) {
        Commands::All => finish(export_all(&config)),
        Commands::Preset { name } => {
            let preset: Preset = name.parse()?;
            finish(export_presets(&[preset], &config))
        }
        Commands::Spec { name } => {
            let preset: Preset = name.parse()?;
            println!("{}", preset.track_spec(config.duration)?.to_json()?);
            Ok(())
        }
        Commands::Render { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let spec = TrackSpec::from_json(&text)
                .with_context(|| format!("Invalid track spec in {}", input.display()))?;
            let pcm = spec.render(config.sample_rate, &mut Pcg32::seed_from_u64(config.seed))?;
            let path = output.unwrap_or_else(|| input.with_extension("wav"));
            write_wav(&path, &pcm, config.sample_rate)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(duration) = cli.duration {
        config.duration = duration;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(out) = &cli.out {
        config.output_dir = out.clone();
    }
    if cli.sequential {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn finish(report: ExportReport) -> Result<()> {
    for (preset, path) in &report.written {
        println!("{:>10}  {}", preset.name(), path.display());
    }
    if !report.is_success() {
        let total = report.failed.len() + report.written.len();
        bail!("{} of {total} tracks failed", report.failed.len());
    }
    Ok(())
}
