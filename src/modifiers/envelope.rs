use super::Modifier;
use crate::control::{HasMethods, MethodTable};
use crate::dsp::follower::Follower;
use crate::frame::Frame;

/// Envelope follower modifier: emits the tracked magnitude of its input.
///
/// The output is a control signal rather than audio; a node pairing this
/// with a carrier oscillator turns it into an amplitude modulator. No
/// methods are registered; the attack and release corners are fixed at
/// construction.
pub struct EnvelopeFollower {
    follower: Follower,
    methods: MethodTable<Self>,
}

impl EnvelopeFollower {
    pub(crate) fn new(down_hz: f64, up_hz: f64, sample_rate: u32) -> Self {
        Self {
            follower: Follower::new(down_hz, up_hz, sample_rate),
            methods: MethodTable::new(),
        }
    }
}

impl HasMethods for EnvelopeFollower {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Modifier for EnvelopeFollower {
    fn process(&mut self, dry: Frame) -> Frame {
        self.follower.process(dry)
    }
}
