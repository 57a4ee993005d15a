//! Drone — an unshaped root + fifth pad held for the whole track.

use super::oscillator::HarmonicOscillator;
use super::rate::SampleRate;
use super::scale::Scale;
use super::timbre::Timbre;

/// Level of the root tone.
pub const ROOT_AMPLITUDE: f64 = 0.2;
/// Level of the fifth, half the root.
pub const FIFTH_AMPLITUDE: f64 = 0.1;

/// Render `round(duration * rate)` samples of root + fifth.
///
/// Both indices wrap modulo the scale length. No envelope is applied; the
/// pad is at full level from the first sample to the last.
pub fn render_drone(
    scale: &Scale,
    duration: f64,
    root_index: i32,
    fifth_index: i32,
    timbre: &Timbre,
    rate: SampleRate,
) -> Vec<f64> {
    let len = rate.samples_for(duration);
    let mut out = vec![0.0; len];
    for (degree, amplitude) in [(root_index, ROOT_AMPLITUDE), (fifth_index, FIFTH_AMPLITUDE)] {
        HarmonicOscillator::new(scale.frequency(degree), amplitude, timbre.weights)
            .add_into(&mut out, rate);
    }
    out
}

/// Render an unshaped harmonic series over `fundamental`.
///
/// `weights[i]` is the absolute level of harmonic `i + 1`; a zero weight
/// leaves that harmonic out. The legacy background track uses this to
/// thicken its drone with upper partials of the root.
pub fn render_overtones(fundamental: f64, duration: f64, weights: &[f64], rate: SampleRate) -> Vec<f64> {
    HarmonicOscillator::new(fundamental, 1.0, weights).render(rate.samples_for(duration), rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::scale::SCALES;
    use crate::dsp::timbre::TIMBRES;

    fn viol() -> &'static Timbre {
        &TIMBRES[3]
    }

    #[test]
    fn length_matches_duration() {
        let out = render_drone(&SCALES[0], 2.5, 0, 4, viol(), SampleRate::CD);
        assert_eq!(out.len(), 110_250);
    }

    #[test]
    fn no_envelope_full_level_at_end() {
        let rate = SampleRate::CD;
        let out = render_drone(&SCALES[0], 2.0, 0, 4, viol(), rate);
        let head = out[..4410].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        let tail = out[out.len() - 4410..].iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!(tail > 0.5 * head, "Drone should not fade: head {head}, tail {tail}");
    }

    #[test]
    fn equals_sum_of_two_tones() {
        let rate = SampleRate::CD;
        let scale = &SCALES[4];
        let out = render_drone(scale, 0.1, 0, 4, viol(), rate);
        let root = HarmonicOscillator::new(scale.frequency(0), 0.2, viol().weights).render(out.len(), rate);
        let fifth = HarmonicOscillator::new(scale.frequency(4), 0.1, viol().weights).render(out.len(), rate);
        for i in 0..out.len() {
            assert!((out[i] - (root[i] + fifth[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn fifth_index_wraps() {
        let rate = SampleRate::CD;
        let a = render_drone(&SCALES[0], 0.1, 0, 12, viol(), rate);
        let b = render_drone(&SCALES[0], 0.1, 0, 4, viol(), rate);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_duration_is_empty() {
        assert!(render_drone(&SCALES[0], 0.0, 0, 4, viol(), SampleRate::CD).is_empty());
    }

    #[test]
    fn overtones_skip_fundamental() {
        let rate = SampleRate::CD;
        let pad = render_overtones(220.0, 0.05, &[0.0, 0.05], rate);
        let pure = HarmonicOscillator::new(440.0, 0.05, &[1.0]).render(pad.len(), rate);
        for (a, b) in pad.iter().zip(&pure) {
            assert!((a - b).abs() < 1e-9);
        }
    }
}
