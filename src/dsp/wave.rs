use std::f64::consts::TAU;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::window::tukey_window;
use crate::grid::{Grid, GridPoint};

/// Which half of the buffer an operation applies to, split at `len / 2`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Both,
}

/// Direction of a mirror operation about the vertical center.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorDir {
    /// Copy the left half into the reversed right half.
    LeftToRight,
    /// Copy the right half into the reversed left half.
    RightToLeft,
}

/// One cycle of a waveform under edit.
///
/// The length is fixed at construction; every operation mutates the samples
/// in place. Sample values live nominally in [-1, 1] but editing is free to
/// push them outside — clamping only happens at render and encode
/// boundaries. Out-of-domain parameters make an operation a silent no-op
/// rather than an error.
pub struct WaveBuffer {
    samples: Vec<f64>,
}

/// Blend-coefficient scale for `smooth`; larger values soften the cutoff
/// sweep of the strength parameter.
const SMOOTH_CUTOFF_ADJUST: f64 = 100.0;

impl WaveBuffer {
    /// Create a buffer of `len` samples (at least 2) holding one sine cycle.
    pub fn new(len: usize) -> Self {
        debug_assert!(len >= 2, "wave buffer needs at least two samples");
        let samples = (0..len)
            .map(|i| (TAU * i as f64 / (len - 1) as f64).sin())
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Immutable copy handed to the playback side.
    pub fn snapshot(&self) -> Arc<[f64]> {
        Arc::from(self.samples.as_slice())
    }

    /// Overwrite the contents with an equal-length slice (import path).
    /// Slices of any other length are ignored — the length never changes.
    pub fn replace(&mut self, data: &[f64]) {
        if data.len() == self.samples.len() {
            self.samples.copy_from_slice(data);
        }
    }

    /// One causal low-pass pass over the buffer.
    ///
    /// Each sample blends toward its original successor with coefficient
    /// `s = exp(-1 / (100 * (1 - strength)))`; the last sample acts as its
    /// own successor. A single forward pass, not iterated to convergence.
    /// Strength outside (0, 1] is a no-op.
    pub fn smooth(&mut self, strength: f64) {
        if strength <= 0.0 || strength > 1.0 {
            return;
        }

        let s = (-1.0 / (SMOOTH_CUTOFF_ADJUST * (1.0 - strength))).exp();
        let n = self.samples.len();
        for i in 0..n {
            let input = self.samples[i];
            // Successor not yet rewritten: the pass runs left to right.
            let next = if i + 1 < n { self.samples[i + 1] } else { input };
            self.samples[i] = next * (1.0 - s) + input * s;
        }
    }

    /// Multiply the buffer by a Tukey window of taper fraction `strength`.
    pub fn window(&mut self, strength: f64) {
        let n = self.samples.len();
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let x = i as f64 / (n - 1) as f64;
            *sample *= tukey_window(strength, x);
        }
    }

    /// Shift the waveform by `offset` samples, holding the edge values.
    ///
    /// Source indices falling outside the buffer clamp to the first or last
    /// sample rather than wrapping around.
    pub fn shift(&mut self, offset: i32) {
        let n = self.samples.len();
        let src = self.samples.clone();
        for (x, sample) in self.samples.iter_mut().enumerate() {
            let from = x as i64 - offset as i64;
            let from = from.clamp(0, n as i64 - 1) as usize;
            *sample = src[from];
        }
    }

    /// Negate the selected half (or both halves) of the buffer.
    pub fn invert(&mut self, side: Side) {
        let mid = self.samples.len() / 2;
        if matches!(side, Side::Left | Side::Both) {
            for sample in &mut self.samples[..mid] {
                *sample = -*sample;
            }
        }
        if matches!(side, Side::Right | Side::Both) {
            for sample in &mut self.samples[mid..] {
                *sample = -*sample;
            }
        }
    }

    /// Overwrite one half with the mirror image of the other.
    pub fn mirror(&mut self, dir: MirrorDir) {
        let n = self.samples.len();
        for i in 0..n / 2 {
            match dir {
                MirrorDir::LeftToRight => self.samples[n - i - 1] = self.samples[i],
                MirrorDir::RightToLeft => self.samples[i] = self.samples[n - i - 1],
            }
        }
    }

    /// Set sample `x` to `value` (already in the sample domain). No-op out
    /// of range.
    pub fn set_sample(&mut self, x: usize, value: f64) {
        if let Some(sample) = self.samples.get_mut(x) {
            *sample = value;
        }
    }

    /// Zero sample `x`. No-op out of range.
    pub fn clear_sample(&mut self, x: usize) {
        if let Some(sample) = self.samples.get_mut(x) {
            *sample = 0.0;
        }
    }

    /// Write the amplitude of grid dot `p` into the sample it covers.
    /// Rejected silently when `p` lies outside the grid.
    pub fn paint_dot(&mut self, grid: &Grid, p: GridPoint) {
        if !grid.contains(p) {
            return;
        }
        self.set_sample(p.x as usize, grid.amplitude(p.y));
    }

    /// Rasterize a line between two grid dots, painting every traversed dot.
    ///
    /// Endpoints are normalized so the step runs left to right; the
    /// activated dot set is identical for swapped endpoints.
    pub fn connect_line(&mut self, grid: &Grid, from: GridPoint, to: GridPoint) {
        trace_line(from, to, |p| self.paint_dot(grid, p));
    }
}

impl Default for WaveBuffer {
    fn default() -> Self {
        Self::new(crate::WAVE_SIZE)
    }
}

/// Incremental line stepping between two grid dots.
///
/// Vertical lines fill directly; otherwise an error accumulator advances Y
/// by at most one dot per X column, so each column gets exactly one dot.
fn trace_line(from: GridPoint, to: GridPoint, mut plot: impl FnMut(GridPoint)) {
    let (mut x0, mut y0) = (from.x, from.y);
    let (mut x1, mut y1) = (to.x, to.y);

    if x0 == x1 {
        if y0 > y1 {
            std::mem::swap(&mut y0, &mut y1);
        }
        for y in y0..=y1 {
            plot(GridPoint::new(x0, y));
        }
        return;
    }

    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let yinc = if y0 < y1 { 1 } else { -1 };
    let xmax = x1 + 1;
    let ymax = y1 + yinc;

    let deltax = (xmax - x0) as f64;
    let deltay = (ymax - y0) as f64;
    let deltaerr = (deltay / deltax).abs();
    let mut error = -1.0;

    let mut y = y0;
    for x in x0..xmax {
        plot(GridPoint::new(x, y));
        error += deltaerr;
        if error >= 0.0 {
            y += yinc;
            error -= 1.0;
        }
    }
}
