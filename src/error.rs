use thiserror::Error;

/// Errors raised while synthesizing or mixing audio.
///
/// All of these are deterministic given their inputs, so none of them are
/// worth retrying.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Invalid note: frequency {frequency} Hz, duration {duration} s (both must be > 0)")]
    InvalidNote { frequency: f64, duration: f64 },

    #[error("Unknown {kind} name '{name}'")]
    UnknownName { kind: &'static str, name: String },

    #[error("Layer {index} has {found} samples, expected {expected}")]
    LayerLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid percussion tempo {0} s per slot (must be at least one sample long)")]
    InvalidTempo(f64),

    #[error("Invalid track duration {0} s (must be finite and > 0)")]
    InvalidDuration(f64),

    #[error("Invalid sample rate {0} Hz (must be > 0)")]
    InvalidSampleRate(u32),
}

/// Errors raised while turning a rendered track into a file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Synthesis error: {0}")]
    Synth(#[from] SynthError),

    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
