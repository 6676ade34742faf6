pub mod control;
pub mod dsp;
pub mod engine;
pub mod frame;
pub mod generators; // Signal sources: oscillators and the sample player
pub mod graph; // Layered node graph and the vocoder composition
pub mod io;
pub mod modifiers; // Signal transforms: gain, echo, band-pass, follower

pub use frame::{Frame, Track};

/// Tick rate assumed by the demo binary and most tests.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
