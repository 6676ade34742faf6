use super::Generator;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::frame::Frame;

/// Square oscillator, full scale at a 50% duty cycle.
///
/// Cheap by construction: a cycle-fraction accumulator and a comparison, no
/// transcendentals.
pub struct Square {
    phase: f64,
    step: f64,
    tick: f64,
    methods: MethodTable<Self>,
}

impl Square {
    pub(crate) fn new(frequency: f64, sample_rate: u32) -> Self {
        let tick = 1.0 / f64::from(sample_rate);
        let mut methods = MethodTable::new();
        methods.register("SetFrequency", |osc: &mut Self, args: &mut Args| {
            osc.set_frequency(args.float(0)?);
            Ok(())
        });
        methods.register("GetFrequency", |osc: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(osc.frequency()))
        });

        Self {
            phase: 0.0,
            step: frequency * tick,
            tick,
            methods,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.step / self.tick
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.step = frequency * self.tick;
    }
}

impl HasMethods for Square {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Generator for Square {
    fn next_frame(&mut self) -> Frame {
        let sample = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase += self.step;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        Frame::splat(sample)
    }
}
