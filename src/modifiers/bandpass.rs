use super::Modifier;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::dsp::biquad::BandPassSection;
use crate::frame::Frame;

/// Band-pass filter around a tunable center frequency.
///
/// Registered methods: `"SetCentralFrequency"`, `"GetCentralFrequency"`,
/// `"SetQuality"`, `"GetQuality"`.
pub struct BandPass {
    section: BandPassSection,
    methods: MethodTable<Self>,
}

impl BandPass {
    pub(crate) fn new(center: f64, quality: f64, sample_rate: u32) -> Self {
        let mut methods = MethodTable::new();
        methods.register("SetCentralFrequency", |bp: &mut Self, args: &mut Args| {
            bp.section.set_center(args.float(0)?);
            Ok(())
        });
        methods.register("GetCentralFrequency", |bp: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(bp.section.center()))
        });
        methods.register("SetQuality", |bp: &mut Self, args: &mut Args| {
            bp.section.set_quality(args.float(0)?);
            Ok(())
        });
        methods.register("GetQuality", |bp: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(bp.section.quality()))
        });

        Self {
            section: BandPassSection::new(center, quality, sample_rate),
            methods,
        }
    }

    pub fn center(&self) -> f64 {
        self.section.center()
    }
}

impl HasMethods for BandPass {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Modifier for BandPass {
    fn process(&mut self, dry: Frame) -> Frame {
        self.section.process(dry)
    }
}
