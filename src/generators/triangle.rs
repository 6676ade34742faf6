use super::Generator;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::frame::Frame;

/// Triangle-wave oscillator.
///
/// A phase accumulator climbs by `4 * frequency / sampleRate` per tick and
/// reflects off the `[-1, 1]` bounds, flipping its direction. The accumulator
/// itself is the output, duplicated to both channels.
pub struct Triangle {
    inc: f64,
    irate: f64,
    tick: f64,
    methods: MethodTable<Self>,
}

impl Triangle {
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
            inc: 0.0,
            irate: 4.0 * frequency * tick,
            tick,
            methods,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.irate.abs() / (4.0 * self.tick)
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        // Keep the current ramp direction.
        let frequency = if self.irate < 0.0 {
            -frequency
        } else {
            frequency
        };
        self.irate = 4.0 * frequency * self.tick;
    }
}

impl HasMethods for Triangle {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Generator for Triangle {
    fn next_frame(&mut self) -> Frame {
        self.inc += self.irate;

        if self.inc >= 1.0 || self.inc <= -1.0 {
            self.irate = -self.irate;
            self.inc = if self.inc >= 1.0 {
                2.0 - self.inc
            } else {
                -2.0 - self.inc
            };
        }

        Frame::splat(self.inc as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::Controlled;

    fn collect(osc: &mut Triangle, count: usize) -> Vec<f32> {
        (0..count).map(|_| osc.next_frame().left).collect()
    }

    #[test]
    fn stays_within_unit_range() {
        let mut osc = Triangle::new(439.0, 48_000);
        for sample in collect(&mut osc, 48_000) {
            assert!((-1.0..=1.0).contains(&sample), "out of range: {sample}");
        }
    }

    #[test]
    fn repeats_with_period_rate_over_frequency() {
        // 480 Hz at 48 kHz: one cycle every 100 samples.
        let mut osc = Triangle::new(480.0, 48_000);
        let samples = collect(&mut osc, 300);
        for n in 0..200 {
            assert!(
                (samples[n] - samples[n + 100]).abs() < 1e-9,
                "sample {n} not periodic"
            );
        }
    }

    #[test]
    fn crosses_zero_where_the_ramp_says() {
        // irate = 0.04: peak at sample 24, descending zero at sample 49.
        let mut osc = Triangle::new(480.0, 48_000);
        let samples = collect(&mut osc, 100);
        assert!((samples[24] - 1.0).abs() < 1e-9);
        assert!(samples[49].abs() < 1e-9);
        assert!((samples[74] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn retuning_through_dispatch_changes_the_period() {
        let mut osc = Triangle::new(480.0, 48_000);
        osc.call_method("SetFrequency", &mut [Value::Float(240.0)])
            .unwrap();

        let samples = collect(&mut osc, 500);
        for n in 0..300 {
            assert!(
                (samples[n] - samples[n + 200]).abs() < 1e-9,
                "sample {n} not periodic at the new rate"
            );
        }

        let mut slots = [Value::Float(0.0)];
        osc.call_method("GetFrequency", &mut slots).unwrap();
        let Value::Float(frequency) = slots[0] else {
            panic!("GetFrequency must fill a float slot");
        };
        assert!((frequency - 240.0).abs() < 1e-9);
    }

    #[test]
    fn block_render_matches_repeated_single_frames() {
        let mut by_frame = Triangle::new(311.0, 48_000);
        let mut by_block = Triangle::new(311.0, 48_000);

        let mut block = [Frame::ZERO; 257];
        by_block.next_block(&mut block);

        for (n, frame) in block.iter().enumerate() {
            assert_eq!(*frame, by_frame.next_frame(), "diverged at {n}");
        }
    }
}
