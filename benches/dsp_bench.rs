//! Benchmarks for the waveform editor's DSP primitives.
//!
//! Run with: cargo bench
//!
//! The oscillator benchmarks are the realtime-critical ones: a render block
//! must complete well inside the audio callback deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline

use criterion::{criterion_group, criterion_main};

mod dsp;

/// Common audio callback block sizes.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_wave,
    dsp::bench_resample,
    dsp::bench_oscillator,
);
criterion_main!(benches);
