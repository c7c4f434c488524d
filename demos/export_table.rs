//! Generate a preset waveform and print it as a C++ table literal.
//!
//! Run with: cargo run --example export_table

use wavedraw::generator::{compute_wave, Preset};
use wavedraw::io::codec::write_wave;
use wavedraw::io::{WaveDataType, WaveFormat};
use wavedraw::GENERATOR_SIZE;

fn main() {
    let samples = compute_wave(&Preset::Spike, GENERATOR_SIZE, 0.0);

    let mut out = Vec::new();
    write_wave(&samples, 256, WaveFormat::Cpp, WaveDataType::Int16, &mut out)
        .expect("export failed");

    print!("{}", String::from_utf8(out).expect("generated table is UTF-8"));
}
