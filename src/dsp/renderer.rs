//! WAV renderer — wraps 16-bit PCM in a mono RIFF/WAVE container.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use super::rate::SampleRate;

fn spec(rate: SampleRate) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: rate.0,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn write_pcm<W: Write + Seek>(writer: W, pcm: &[i16], rate: SampleRate) -> Result<(), hound::Error> {
    let mut wav = WavWriter::new(writer, spec(rate))?;
    for &s in pcm {
        wav.write_sample(s)?;
    }
    wav.finalize()
}

/// Encode mono i16 PCM to WAV bytes in memory.
pub fn encode_wav(pcm: &[i16], rate: SampleRate) -> Result<Vec<u8>, hound::Error> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + pcm.len() * 2));
    write_pcm(&mut cursor, pcm, rate)?;
    Ok(cursor.into_inner())
}

/// Write mono i16 PCM to a WAV file, replacing any existing file.
pub fn write_wav(path: &Path, pcm: &[i16], rate: SampleRate) -> Result<(), hound::Error> {
    let file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_pcm(file, pcm, rate)
}
