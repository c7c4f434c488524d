//! End-to-end tests spanning generation, editing, codec, and playback.

use std::path::PathBuf;

use wavedraw::dsp::oscillator::{OscCommand, WavetableOscillator};
use wavedraw::dsp::resample::resample;
use wavedraw::dsp::wave::{Side, WaveBuffer};
use wavedraw::generator::{compute_wave, Preset};
use wavedraw::grid::{Grid, GridPoint};
use wavedraw::io::codec::{read_wave, write_wave};
use wavedraw::io::{save_wave_file, WaveDataType, WaveFormat};
use wavedraw::{GENERATOR_SIZE, WAVE_SIZE};

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("wavedraw-pipeline-{}-{name}", std::process::id()));
    path
}

#[test]
fn painted_wave_survives_a_dat_round_trip() {
    let mut buffer = WaveBuffer::new(WAVE_SIZE);
    let grid = Grid::compact(WAVE_SIZE, 512);

    buffer.connect_line(&grid, GridPoint::new(0, 0), GridPoint::new(511, 511));
    buffer.connect_line(&grid, GridPoint::new(512, 511), GridPoint::new(1023, 0));
    buffer.invert(Side::Right);

    let mut text = Vec::new();
    write_wave(
        buffer.samples(),
        WAVE_SIZE,
        WaveFormat::Dat,
        WaveDataType::Float,
        &mut text,
    )
    .unwrap();

    let text = String::from_utf8(text).unwrap();
    let (back, ty) = read_wave(&text, WAVE_SIZE, WaveFormat::Dat, 0).unwrap();

    assert_eq!(ty, WaveDataType::Float);
    assert_eq!(back.len(), WAVE_SIZE);
    for (got, want) in back.iter().zip(buffer.samples()) {
        assert!((got - want).abs() < 1e-6, "got {got}, want {want}");
    }
}

#[test]
fn generated_preset_feeds_the_oscillator() {
    let raw = compute_wave(&Preset::Triangle, GENERATOR_SIZE, 0.0);
    let samples = resample(&raw, WAVE_SIZE).unwrap();

    let mut buffer = WaveBuffer::new(WAVE_SIZE);
    buffer.replace(&samples);

    let mut osc = WavetableOscillator::new();
    osc.set_wavetable(buffer.snapshot());
    osc.set_frequency(220.0);
    osc.start(256, 48_000.0);

    let mut out = [0.0f32; 4096];
    osc.render(&mut out);

    let peak = out.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    assert!(peak > 0.5, "expected audible output, peak {peak}");
    assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.01));
}

#[test]
fn snapshots_published_over_the_ring_reach_playback() {
    let (mut producer, mut consumer) = rtrb::RingBuffer::<OscCommand>::new(16);

    let mut buffer = WaveBuffer::new(64);
    let flat = vec![0.25; 64];
    buffer.replace(&flat);

    producer
        .push(OscCommand::SetWavetable(buffer.snapshot()))
        .unwrap();
    producer.push(OscCommand::SetFrequency(100.0)).unwrap();
    producer.push(OscCommand::Play).unwrap();

    let mut osc = WavetableOscillator::new();
    let mut out = [0.0f32; 32];
    osc.process_block(&mut consumer, &mut out, 48_000.0);
    assert!(out.iter().all(|&s| (s - 0.25).abs() < 1e-6));

    // An edit republishes; the next block reflects the new table.
    let louder = vec![0.5; 64];
    buffer.replace(&louder);
    producer
        .push(OscCommand::SetWavetable(buffer.snapshot()))
        .unwrap();

    osc.process_block(&mut consumer, &mut out, 48_000.0);
    assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6));

    producer.push(OscCommand::Stop).unwrap();
    osc.process_block(&mut consumer, &mut out, 48_000.0);
    assert!(out.iter().all(|&s| s == 0.0));
}

#[test]
fn editing_keeps_the_buffer_length_and_values_finite() {
    let mut buffer = WaveBuffer::new(WAVE_SIZE);
    let grid = Grid::compact(WAVE_SIZE, 512);

    buffer.smooth(0.8);
    buffer.window(0.5);
    buffer.shift(-5);
    buffer.invert(Side::Both);
    buffer.mirror(wavedraw::dsp::wave::MirrorDir::RightToLeft);
    buffer.connect_line(&grid, GridPoint::new(100, 40), GridPoint::new(300, 470));
    buffer.clear_sample(7);

    assert_eq!(buffer.len(), WAVE_SIZE);
    assert!(buffer.samples().iter().all(|s| s.is_finite()));
}

#[test]
fn int16_table_export_through_a_file_round_trips() {
    let path = scratch_path("table.h");
    let raw = compute_wave(&Preset::Sine, GENERATOR_SIZE, 0.0);

    save_wave_file(&path, &raw, 1024, WaveFormat::Cpp, WaveDataType::Int16).unwrap();
    let (back, ty) = wavedraw::io::load_wave_file(&path, 1024, WaveFormat::Cpp, 0).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(ty, WaveDataType::Int16);
    assert_eq!(back.len(), 1024);
    for (got, want) in back.iter().zip(&raw) {
        assert!(
            (got - want).abs() <= 2.0 / 32767.0,
            "got {got}, want {want}"
        );
    }
}

#[test]
fn generator_output_resamples_into_any_buffer_length() {
    let raw = compute_wave(&Preset::Charge, GENERATOR_SIZE, 0.25);
    for &len in &[256usize, 1024, 2048] {
        let fitted = resample(&raw, len).unwrap();
        assert_eq!(fitted.len(), len);
        assert!(fitted.iter().all(|s| s.is_finite()));
    }
}
