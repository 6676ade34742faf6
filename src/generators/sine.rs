use super::Generator;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::frame::Frame;

/// Sine oscillator: a phase accumulator in radians, wrapped at `2π`.
pub struct Sine {
    phase: f64,
    step: f64,
    tick: f64,
    methods: MethodTable<Self>,
}

impl Sine {
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
            step: std::f64::consts::TAU * frequency * tick,
            tick,
            methods,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.step / (std::f64::consts::TAU * self.tick)
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.step = std::f64::consts::TAU * frequency * self.tick;
    }
}

impl HasMethods for Sine {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Generator for Sine {
    fn next_frame(&mut self) -> Frame {
        let sample = self.phase.sin();
        self.phase += self.step;
        if self.phase >= std::f64::consts::TAU {
            self.phase -= std::f64::consts::TAU;
        }
        Frame::splat(sample as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_stays_in_range() {
        let mut osc = Sine::new(440.0, 48_000);
        assert_eq!(osc.next_frame(), Frame::ZERO);
        for _ in 0..48_000 {
            let sample = osc.next_frame().left;
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn completes_a_cycle_per_period() {
        // 1 kHz at 48 kHz: back near zero after 48 samples.
        let mut osc = Sine::new(1_000.0, 48_000);
        let mut last = 0.0;
        for _ in 0..49 {
            last = osc.next_frame().left;
        }
        assert!(last.abs() < 1e-3, "cycle did not close: {last}");
    }

    #[test]
    fn peaks_at_a_quarter_period() {
        let mut osc = Sine::new(1_000.0, 48_000);
        let mut peak = 0.0;
        for _ in 0..13 {
            peak = osc.next_frame().left;
        }
        assert!((peak - 1.0).abs() < 1e-3, "quarter-period sample: {peak}");
    }
}
