//! Wavetable import and export.
//!
//! `codec` owns the textual formats; this module adds the file boundary:
//! export size validation, removal of partially written files on failure,
//! and an import that only hands data back once the whole pipeline has
//! succeeded.

pub mod codec;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use codec::{CodecError, WaveDataType, WaveFormat};

/// Smallest exportable sample count.
pub const MIN_EXPORT_SIZE: usize = 32;
/// Largest exportable sample count.
pub const MAX_EXPORT_SIZE: usize = 8192;

/// Export `samples` to a file.
///
/// The size is validated before the file is created; if writing fails
/// partway, the destination is removed rather than left truncated.
pub fn save_wave_file(
    path: &Path,
    samples: &[f64],
    out_len: usize,
    fmt: WaveFormat,
    ty: WaveDataType,
) -> Result<(), CodecError> {
    if !(MIN_EXPORT_SIZE..=MAX_EXPORT_SIZE).contains(&out_len) {
        return Err(CodecError::InvalidSize(out_len));
    }

    let mut file = fs::File::create(path)?;
    let result = codec::write_wave(samples, out_len, fmt, ty, &mut file)
        .and_then(|()| file.flush().map_err(CodecError::from));
    drop(file);

    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

/// Import one channel of a wave file, resampled to `out_len` samples.
/// Returns the samples and the detected data type; the caller's buffer is
/// only touched on success.
pub fn load_wave_file(
    path: &Path,
    out_len: usize,
    fmt: WaveFormat,
    channel: usize,
) -> Result<(Vec<f64>, WaveDataType), CodecError> {
    let text = fs::read_to_string(path)?;
    codec::read_wave(&text, out_len, fmt, channel)
}
