//! Benchmarks for wavetable playback.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use wavedraw::dsp::oscillator::WavetableOscillator;
use wavedraw::dsp::wave::WaveBuffer;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let table: Arc<[f64]> = WaveBuffer::new(1024).snapshot();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Interpolated table playback at a musical frequency.
        let mut osc = WavetableOscillator::new();
        osc.set_wavetable(table.clone());
        osc.set_frequency(220.0);
        osc.start(size, 48_000.0);
        group.bench_with_input(BenchmarkId::new("render", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // High-ratio playback exercises the phase wrap loop.
        let mut osc = WavetableOscillator::new();
        osc.set_wavetable(table.clone());
        osc.set_frequency(96_000.0);
        osc.start(size, 48_000.0);
        group.bench_with_input(BenchmarkId::new("render_fast", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Silence path (no wavetable set).
        let mut osc = WavetableOscillator::new();
        osc.start(size, 48_000.0);
        group.bench_with_input(BenchmarkId::new("render_silent", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
