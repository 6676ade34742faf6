//! WAV decode and encode at the container boundary.
//!
//! hound owns the RIFF plumbing; this module owns the sample-scaling
//! contract on top of it:
//!
//!   8-bit int    (byte - 128) / 128
//!   16-bit int   value / 32768
//!   24-bit int   value / 2^23
//!   32-bit float as is
//!
//! Mono sources fan out to both channels scaled by `sqrt(1/2)` so decoded
//! power matches the source. Anything the engine does not speak (more than
//! two channels, exotic bit depths, a malformed container) comes back as a
//! recoverable [`WavError`], never a panic.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use crate::frame::{Frame, Track};

/// A decoded recording: frames plus the rate they were sampled at.
#[derive(Debug)]
pub struct Recording {
    pub frames: Track,
    pub sample_rate: u32,
}

/// Why a WAV source could not become a [`Recording`].
#[derive(Debug)]
pub enum WavError {
    /// The container failed to parse or its sample data is truncated.
    Malformed(hound::Error),
    /// The container parsed but uses a layout this engine does not speak.
    Unsupported(&'static str),
    /// The source could not be read at all.
    Io(io::Error),
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavError::Malformed(inner) => write!(f, "malformed wav data: {inner}"),
            WavError::Unsupported(what) => write!(f, "unsupported wav layout: {what}"),
            WavError::Io(inner) => write!(f, "wav source unreadable: {inner}"),
        }
    }
}

impl Error for WavError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WavError::Malformed(inner) => Some(inner),
            WavError::Unsupported(_) => None,
            WavError::Io(inner) => Some(inner),
        }
    }
}

impl From<hound::Error> for WavError {
    fn from(error: hound::Error) -> Self {
        match error {
            hound::Error::IoError(inner) => WavError::Io(inner),
            other => WavError::Malformed(other),
        }
    }
}

impl From<io::Error> for WavError {
    fn from(error: io::Error) -> Self {
        WavError::Io(error)
    }
}

/// Decodes a WAV container held in memory.
pub fn decode(bytes: &[u8]) -> Result<Recording, WavError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.channels > 2 {
        return Err(WavError::Unsupported("only mono and stereo sources"));
    }

    let frames = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 8) => {
            collect(reader.samples::<i8>(), spec.channels, |v| {
                f32::from(v) / 128.0
            })?
        }
        (hound::SampleFormat::Int, 16) => {
            collect(reader.samples::<i16>(), spec.channels, |v| {
                f32::from(v) / 32_768.0
            })?
        }
        (hound::SampleFormat::Int, 24) => {
            collect(reader.samples::<i32>(), spec.channels, |v| {
                v as f32 / 8_388_608.0
            })?
        }
        (hound::SampleFormat::Float, 32) => {
            collect(reader.samples::<f32>(), spec.channels, |v| v)?
        }
        _ => return Err(WavError::Unsupported("unhandled bit depth")),
    };

    Ok(Recording {
        frames,
        sample_rate: spec.sample_rate,
    })
}

/// Decodes a WAV file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Recording, WavError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

/// Writes `track` to `path` as 16-bit stereo WAV.
pub fn write<P: AsRef<Path>>(path: P, track: &[Frame], sample_rate: u32) -> Result<(), WavError> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for frame in track {
        writer.write_sample(to_i16(frame.left))?;
        writer.write_sample(to_i16(frame.right))?;
    }
    writer.finalize()?;
    Ok(())
}

fn to_i16(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * 32_767.0) as i16
}

fn collect<R, S, F>(
    samples: hound::WavSamples<'_, R, S>,
    channels: u16,
    scale: F,
) -> Result<Track, WavError>
where
    R: Read,
    S: hound::Sample,
    F: Fn(S) -> f32,
{
    let mut frames = Track::new();

    if channels == 1 {
        for sample in samples {
            frames.push(Frame::from_mono(scale(sample?)));
        }
    } else {
        let mut samples = samples;
        while let Some(left) = samples.next() {
            let left = scale(left?);
            // A dangling final sample cannot form a frame; drop it.
            let Some(right) = samples.next() else { break };
            frames.push(Frame::new(left, scale(right?)));
        }
    }

    Ok(frames)
}
