//! Formula-driven waveform generation.
//!
//! A generator is anything that can answer "what is the amplitude at phase
//! `p`" for `p` in [0, 1). The editor evaluates it once per output position
//! to produce a fixed-length raw signal, optionally pre-warping the phase,
//! and resamples the result into the editing buffer. User-supplied formula
//! sources plug in through the same trait; the built-in formulas live in
//! [`presets`].

pub mod presets;

pub use presets::Preset;

/// A single-cycle wave formula, evaluated per phase position in [0, 1).
pub trait WaveFormula {
    fn eval(&self, phase: f64) -> f64;
}

impl<F: Fn(f64) -> f64> WaveFormula for F {
    fn eval(&self, phase: f64) -> f64 {
        self(phase)
    }
}

/// Evaluate `formula` at `length` evenly spaced phase positions.
///
/// `phase_distort` warps each position through [`distort_phase`] first;
/// zero leaves the phase untouched.
pub fn compute_wave(formula: &impl WaveFormula, length: usize, phase_distort: f64) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let phase = i as f64 / length as f64;
            formula.eval(distort_phase(phase, phase_distort))
        })
        .collect()
}

/// Warp a phase position in [0, 1] by `amt`.
///
/// Positive amounts squash the phase toward the edges through a tanh curve;
/// negative amounts pinch it toward the center through an exponential. The
/// endpoints and the midpoint map to themselves, so the warped cycle still
/// closes.
pub fn distort_phase(phase: f64, amt: f64) -> f64 {
    let mut phase = phase * 2.0 - 1.0;

    if amt > 0.0 {
        let amin = 0.5;
        let amax = 5.0;
        let a = amin + amt * (amax - amin);
        let p = (phase * a).tanh();
        phase = p / (-a).tanh().abs();
    } else if amt < 0.0 {
        let amt = -16.0 * amt;
        let g = |x: f64, a: f64| 2.0f64.powf(-a * (1.0 - x));
        let g0 = g(0.0, amt);
        let g1 = g(1.0, amt);
        let p = (g(phase.abs(), amt) - g0) / (g1 - g0);
        phase = if phase < 0.0 { -p } else { p };
    }

    (phase + 1.0) * 0.5
}
