pub mod dsp;
pub mod generator; // Formula-driven waveform generation
pub mod grid;
pub mod io; // Wavetable import/export

/// Number of samples in one editing buffer / wavetable cycle.
pub const WAVE_SIZE: usize = 1024;
/// Vertical resolution of the editing grid (amplitude steps).
pub const GRID_HEIGHT: usize = 512;
/// Length of the raw signal produced by the generator before resampling.
pub const GENERATOR_SIZE: usize = 1024;
