//! Graph units that transform one input frame into one output frame.
//!
//! Like the generators, concrete modifiers are built through factory
//! functions returning shared, type-erased handles, and expose their tunable
//! parameters only through [`call_method`](crate::control::Controlled::call_method).

use std::cell::RefCell;
use std::rc::Rc;

use crate::control::Controlled;
use crate::frame::Frame;

mod bandpass;
mod echo;
mod envelope;
mod gain;

pub use bandpass::BandPass;
pub use echo::Echo;
pub use envelope::EnvelopeFollower;
pub use gain::Gain;

/// A stateful transform of exactly one input frame per tick.
pub trait Modifier: Controlled {
    /// Transforms the dry input frame into one output frame.
    fn process(&mut self, dry: Frame) -> Frame;
}

/// Shared handle to a type-erased modifier.
pub type ModHandle = Rc<RefCell<dyn Modifier>>;

/// A flat gain. Negative values invert the signal.
pub fn gain(amount: f64) -> ModHandle {
    Rc::new(RefCell::new(Gain::new(amount)))
}

/// A feedback echo `delay` frames deep, feeding back at `decay_ratio`.
pub fn echo(delay: usize, decay_ratio: f64) -> ModHandle {
    Rc::new(RefCell::new(Echo::new(delay, decay_ratio)))
}

/// A band-pass filter centered on `center` Hz with quality `quality`.
pub fn band_pass(center: f64, quality: f64, sample_rate: u32) -> ModHandle {
    Rc::new(RefCell::new(BandPass::new(center, quality, sample_rate)))
}

/// An envelope follower releasing at `down_hz` and attacking at `up_hz`.
pub fn envelope_follower(down_hz: f64, up_hz: f64, sample_rate: u32) -> ModHandle {
    Rc::new(RefCell::new(EnvelopeFollower::new(down_hz, up_hz, sample_rate)))
}
