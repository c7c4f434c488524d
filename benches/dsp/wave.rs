//! Benchmarks for buffer editing operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavedraw::dsp::wave::{MirrorDir, Side, WaveBuffer};
use wavedraw::grid::{Grid, GridPoint};

pub fn bench_wave(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/wave");

    for &size in &[256usize, 1024, 4096] {
        let mut buffer = WaveBuffer::new(size);

        group.bench_with_input(BenchmarkId::new("smooth", size), &size, |b, _| {
            b.iter(|| buffer.smooth(black_box(0.8)))
        });

        group.bench_with_input(BenchmarkId::new("window", size), &size, |b, _| {
            b.iter(|| buffer.window(black_box(0.5)))
        });

        group.bench_with_input(BenchmarkId::new("shift", size), &size, |b, _| {
            b.iter(|| buffer.shift(black_box(5)))
        });

        group.bench_with_input(BenchmarkId::new("mirror", size), &size, |b, _| {
            b.iter(|| buffer.mirror(black_box(MirrorDir::LeftToRight)))
        });

        group.bench_with_input(BenchmarkId::new("invert", size), &size, |b, _| {
            b.iter(|| buffer.invert(black_box(Side::Both)))
        });

        let grid = Grid::compact(size, 512);
        group.bench_with_input(BenchmarkId::new("connect_line", size), &size, |b, _| {
            b.iter(|| {
                buffer.connect_line(
                    &grid,
                    black_box(GridPoint::new(0, 10)),
                    black_box(GridPoint::new(size as i32 - 1, 500)),
                )
            })
        });
    }

    group.finish();
}
