//! Low-level DSP primitives behind the waveform editor.
//!
//! `wave` and `oscillator` hold the dense logic: the editing operations on
//! the fixed-length sample buffer and the realtime wavetable playback.
//! `resample` is thin glue around a streaming band-limited resampler, and
//! `window` is a single pure function shared by the editing operations.

/// Realtime wavetable playback and the editor-to-audio command channel.
pub mod oscillator;
/// Band-limited length conversion between sample sequences.
pub mod resample;
/// The editing buffer and its in-place transform operations.
pub mod wave;
/// Tukey (tapered cosine) window function.
pub mod window;

pub use wave::WaveBuffer;
