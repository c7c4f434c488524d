//! Textual wavetable serialization.
//!
//! Two container formats: `Dat` (one row of numeric columns per line) and
//! C/C++ source fragments holding a brace-delimited array literal. Sample
//! values can be stored as 32-bit float, 16-bit or 8-bit signed integers;
//! on import the integer widths are auto-detected from the parsed values.

use std::io::Write;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dsp::resample::{resample, ResampleError};

/// Container format of an imported or exported wavetable.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveFormat {
    /// Plain text, one row of whitespace-separated values per line.
    Dat,
    /// C source fragment with a `static const` array.
    C,
    /// C++ source fragment with a `constexpr std::array`.
    Cpp,
}

impl WaveFormat {
    /// Default file extension for the format.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            WaveFormat::Dat => ".dat",
            WaveFormat::C | WaveFormat::Cpp => ".h",
        }
    }
}

/// Scalar representation of stored samples.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveDataType {
    Float,
    Int16,
    Int8,
}

impl WaveDataType {
    pub fn name(&self) -> &'static str {
        match self {
            WaveDataType::Float => "32-bit float",
            WaveDataType::Int16 => "16-bit signed integer",
            WaveDataType::Int8 => "8-bit signed integer",
        }
    }

    fn c_type_name(&self) -> &'static str {
        match self {
            WaveDataType::Float => "float",
            WaveDataType::Int16 => "int16_t",
            WaveDataType::Int8 => "int8_t",
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    /// The input holds fewer sample arrays than the requested channel.
    #[error("input has no sample array for channel {0}")]
    MissingChannel(usize),
    /// A token inside a brace group failed the numeric grammar.
    #[error("malformed numeric literal at byte {0}")]
    MalformedNumber(usize),
    /// A brace group ended before its closing brace.
    #[error("unterminated sample array at byte {0}")]
    UnterminatedArray(usize),
    /// Export length outside the supported range.
    #[error(
        "output size {0} outside the supported {min}..={max} range",
        min = crate::io::MIN_EXPORT_SIZE,
        max = crate::io::MAX_EXPORT_SIZE
    )]
    InvalidSize(usize),
    #[error(transparent)]
    Resample(#[from] ResampleError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Clamp a float sample into [-1, 1]; non-finite values become 0.
fn sat_float(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    v.clamp(-1.0, 1.0)
}

/// Map float samples in [-1, 1] to their stored numeric values.
///
/// Integer types scale, round, and saturate; the resulting values are
/// whole numbers carried in f64.
pub fn convert_from_float(samples: &mut [f64], ty: WaveDataType) {
    for s in samples {
        *s = match ty {
            WaveDataType::Float => sat_float(*s),
            WaveDataType::Int16 => ((*s * 32767.0).round() as i32).clamp(-32768, 32767) as f64,
            WaveDataType::Int8 => ((*s * 127.0).round() as i32).clamp(-128, 127) as f64,
        };
    }
}

/// Map stored numeric values back to float samples in [-1, 1].
pub fn convert_to_float(samples: &mut [f64], ty: WaveDataType) {
    for s in samples {
        let v = match ty {
            WaveDataType::Float => *s,
            WaveDataType::Int16 => *s / 32767.0,
            WaveDataType::Int8 => *s / 127.0,
        };
        *s = sat_float(v);
    }
}

/// Pick the narrowest type that can hold every parsed value exactly:
/// whole numbers within i8 range, whole numbers, otherwise float.
pub fn detect_data_type(samples: &[f64]) -> WaveDataType {
    if samples.is_empty() {
        return WaveDataType::Float;
    }

    let mut all_integer = true;
    let mut min = samples[0];
    let mut max = samples[0];
    for &s in samples {
        min = min.min(s);
        max = max.max(s);
        if s != s.trunc() {
            all_integer = false;
        }
    }

    if all_integer {
        if min >= -128.0 && max <= 127.0 {
            WaveDataType::Int8
        } else {
            WaveDataType::Int16
        }
    } else {
        WaveDataType::Float
    }
}

fn write_value<W: Write>(out: &mut W, v: f64, ty: WaveDataType) -> std::io::Result<()> {
    match ty {
        WaveDataType::Float => write!(out, "{}", v as f32),
        WaveDataType::Int16 | WaveDataType::Int8 => write!(out, "{}", v as i64),
    }
}

/// Resample `samples` to `out_len`, quantize to `ty`, and serialize as
/// `fmt` into `out`.
pub fn write_wave<W: Write>(
    samples: &[f64],
    out_len: usize,
    fmt: WaveFormat,
    ty: WaveDataType,
    out: &mut W,
) -> Result<(), CodecError> {
    let mut values = resample(samples, out_len)?;
    convert_from_float(&mut values, ty);

    match fmt {
        WaveFormat::Dat => {
            for &v in &values {
                write_value(out, v, ty)?;
                writeln!(out)?;
            }
        }
        WaveFormat::C | WaveFormat::Cpp => {
            let ctype = ty.c_type_name();
            if fmt == WaveFormat::Cpp {
                write!(
                    out,
                    "#include <array>\n#include <cstdint>\n\n\
                     [[gnu::unused]] static constexpr std::array<{ctype}, {out_len}> table {{\n"
                )?;
            } else {
                write!(
                    out,
                    "#include <stdint.h>\n\nstatic const {ctype} table [{out_len}] = {{\n"
                )?;
            }
            for &v in &values {
                write!(out, " ")?;
                write_value(out, v, ty)?;
                write!(out, ",")?;
            }
            writeln!(out, " }};")?;
        }
    }

    Ok(())
}

/// Decode one channel of `input`, auto-detect the stored type, and convert
/// the values to float samples.
pub fn decode(
    input: &str,
    fmt: WaveFormat,
    channel: usize,
) -> Result<(Vec<f64>, WaveDataType), CodecError> {
    let mut raw = match fmt {
        WaveFormat::Dat => decode_dat(input, channel),
        WaveFormat::C | WaveFormat::Cpp => decode_array(input, channel)?,
    };
    let ty = detect_data_type(&raw);
    convert_to_float(&mut raw, ty);
    Ok((raw, ty))
}

/// Decode plus resampling to the caller's buffer length.
pub fn read_wave(
    input: &str,
    out_len: usize,
    fmt: WaveFormat,
    channel: usize,
) -> Result<(Vec<f64>, WaveDataType), CodecError> {
    let (raw, ty) = decode(input, fmt, channel)?;
    Ok((resample(&raw, out_len)?, ty))
}

/// Scan a numeric literal prefix of `bytes`: optional sign, decimal digits
/// with optional fraction, optional exponent. Returns the value and the
/// number of bytes consumed.
fn scan_float(bytes: &[u8]) -> Option<(f64, usize)> {
    let mut i = 0;
    if matches!(bytes.first(), Some(&b'+') | Some(&b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    // Only consume an exponent when it is complete; "1e" is the number 1
    // followed by a stray letter.
    let mantissa_end = i;
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        i = if j > exp_start { j } else { mantissa_end };
    }

    let text = std::str::from_utf8(&bytes[..i]).ok()?;
    text.parse::<f64>().ok().map(|v| (v, i))
}

/// One sample per line: strip a trailing `#` comment (from the last `#`),
/// trim, then collect whitespace-separated numeric fields until the first
/// token that is not a number. The selected channel's field is emitted, or
/// zero when the row is shorter — so a blank line yields one zero sample.
fn decode_dat(input: &str, channel: usize) -> Vec<f64> {
    let mut samples = Vec::new();
    let mut row = Vec::new();

    for line in input.lines() {
        let line = match line.rfind('#') {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();

        row.clear();
        let mut rest = line.as_bytes();
        loop {
            while matches!(rest.first(), Some(&b' ') | Some(&b'\t')) {
                rest = &rest[1..];
            }
            match scan_float(rest) {
                Some((v, n)) => {
                    row.push(v);
                    rest = &rest[n..];
                }
                None => break,
            }
        }

        samples.push(row.get(channel).copied().unwrap_or(0.0));
    }

    samples
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n') {
        i += 1;
    }
    i
}

/// Extract the `channel`-th brace-delimited numeric list from raw source
/// text, ignoring everything outside braces.
fn decode_array(input: &str, channel: usize) -> Result<Vec<f64>, CodecError> {
    let bytes = input.as_bytes();
    let mut index = 0;
    let mut found = 0;

    while index < bytes.len() {
        if bytes[index] != b'{' {
            index += 1;
            continue;
        }
        let (samples, end) = parse_brace_group(bytes, index + 1)?;
        index = end;
        if found == channel {
            return Ok(samples);
        }
        found += 1;
    }

    Err(CodecError::MissingChannel(channel))
}

/// Parse `value (, value)* ,? }` starting just past the opening brace.
/// Returns the values and the index one past the closing brace.
fn parse_brace_group(bytes: &[u8], mut i: usize) -> Result<(Vec<f64>, usize), CodecError> {
    let mut samples = Vec::new();

    loop {
        i = skip_whitespace(bytes, i);
        match bytes.get(i) {
            None => return Err(CodecError::UnterminatedArray(i)),
            Some(&b'}') => return Ok((samples, i + 1)),
            Some(_) => {}
        }

        let (v, n) = scan_float(&bytes[i..]).ok_or(CodecError::MalformedNumber(i))?;
        samples.push(v);
        i += n;

        i = skip_whitespace(bytes, i);
        match bytes.get(i) {
            None => return Err(CodecError::UnterminatedArray(i)),
            Some(&b',') => i += 1,
            Some(&b'}') => {}
            Some(_) => return Err(CodecError::MalformedNumber(i)),
        }
    }
}
