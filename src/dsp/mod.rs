//! Low-level DSP primitives used by the generator and modifier units.
//!
//! These components are allocation-free on the per-sample path and carry no
//! dispatch plumbing of their own; the units wrapping them own the method
//! tables.

/// Two-pole band-pass filter section.
pub mod biquad;
/// Fixed-length stereo FIFO delay line.
pub mod delay;
/// Attack/release envelope follower.
pub mod follower;
/// Fractional-cursor linear-interpolation resampler.
pub mod resampler;
