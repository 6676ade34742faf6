use super::Modifier;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::frame::Frame;

/// Flat gain. The amount can be negative, inverting the signal.
///
/// Registered methods: `"SetGain"`, `"GetGain"`.
pub struct Gain {
    amount: f64,
    methods: MethodTable<Self>,
}

impl Gain {
    pub(crate) fn new(amount: f64) -> Self {
        let mut methods = MethodTable::new();
        methods.register("SetGain", |gain: &mut Self, args: &mut Args| {
            gain.amount = args.float(0)?;
            Ok(())
        });
        methods.register("GetGain", |gain: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(gain.amount))
        });

        Self { amount, methods }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl HasMethods for Gain {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Modifier for Gain {
    fn process(&mut self, dry: Frame) -> Frame {
        dry * self.amount as f32
    }
}
