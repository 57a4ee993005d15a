pub mod config;
pub mod dsp;
pub mod error;
pub mod export;
pub mod preset;
pub mod track;

use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::config::RenderConfig;
use crate::dsp::rate::SampleRate;
use crate::error::SynthError;
use crate::preset::Preset;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the hortus-music version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render a named preset to 44.1 kHz PCM.
pub fn render_named_preset(name: &str, duration: f64, seed: u64) -> Result<Vec<i16>, SynthError> {
    let preset = Preset::from_str(name)?;
    let config = RenderConfig {
        duration,
        seed,
        sample_rate: SampleRate::CD,
        ..RenderConfig::default()
    };
    export::render_preset(preset, &config)
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: render a preset to a WAV byte array.
#[wasm_bindgen]
pub fn render_preset_wav(name: &str, duration: f64, seed: u64) -> Result<Vec<u8>, JsValue> {
    let pcm = render_named_preset(name, duration, seed).map_err(js_err)?;
    dsp::renderer::encode_wav(&pcm, SampleRate::CD).map_err(js_err)
}

/// WASM-exposed: render a preset to mono f32 samples in [-1, 1] for
/// AudioWorklet playback.
#[wasm_bindgen]
pub fn render_preset_samples(name: &str, duration: f64, seed: u64) -> Result<Vec<f32>, JsValue> {
    let pcm = render_named_preset(name, duration, seed).map_err(js_err)?;
    Ok(pcm.iter().map(|&s| s as f32 / 32768.0).collect())
}

/// WASM-exposed: the full track spec of a preset as a JS object.
#[wasm_bindgen]
pub fn preset_spec(name: &str, duration: f64) -> Result<JsValue, JsValue> {
    let preset = Preset::from_str(name).map_err(js_err)?;
    let spec = preset.track_spec(duration).map_err(js_err)?;
    serde_wasm_bindgen::to_value(&spec).map_err(js_err)
}

/// WASM-exposed: names of every preset, in generation order.
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    Preset::ALL.iter().map(|p| p.name().to_string()).collect()
}
