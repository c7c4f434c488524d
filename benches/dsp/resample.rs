//! Benchmarks for band-limited length conversion.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use wavedraw::dsp::resample::resample;
use wavedraw::dsp::wave::WaveBuffer;

pub fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resample");
    // Resampling runs on the editing thread at file-import rate, so larger
    // budgets than the audio callback apply; sizes span the export range.
    group.sample_size(20);

    let input = WaveBuffer::new(1024).snapshot();

    for &out_len in &[256usize, 1024, 4096] {
        group.bench_with_input(
            BenchmarkId::new("from_1024", out_len),
            &out_len,
            |b, &out_len| {
                b.iter(|| resample(black_box(&input), black_box(out_len)).unwrap())
            },
        );
    }

    group.finish();
}
