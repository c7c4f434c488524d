//! Render a few cycles of wavetable playback offline and print a summary.
//!
//! Run with: cargo run --example offline_bounce

use wavedraw::dsp::oscillator::WavetableOscillator;
use wavedraw::dsp::wave::WaveBuffer;

fn main() {
    let buffer = WaveBuffer::new(1024);

    let mut osc = WavetableOscillator::new();
    osc.set_wavetable(buffer.snapshot());
    osc.set_frequency(220.0);
    osc.start(512, 48_000.0);

    let mut out = vec![0.0f32; 48_000];
    osc.render(&mut out);

    let peak = out.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let rms = (out.iter().map(|&s| s as f64 * s as f64).sum::<f64>() / out.len() as f64).sqrt();

    println!("Rendered {} samples", out.len());
    println!("Peak: {peak:.3}  RMS: {rms:.3}");
}
