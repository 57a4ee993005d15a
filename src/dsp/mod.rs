//! DSP — the synthesis building blocks.
//!
//! Everything here renders whole buffers at once: a call either returns the
//! complete sample span or an error. No state is kept between calls, so
//! independent renders can run on separate threads.

pub mod counterpoint;
pub mod drone;
pub mod envelope;
pub mod mixer;
pub mod note;
pub mod oscillator;
pub mod percussion;
pub mod rate;
pub mod renderer;
pub mod scale;
pub mod sequencer;
pub mod timbre;
