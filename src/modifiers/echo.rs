use super::Modifier;
use crate::control::{Args, HasMethods, MethodTable, Value};
use crate::dsp::delay::DelayLine;
use crate::frame::Frame;

/// Integer-delay feedback comb: each output re-enters the line, so echoes
/// decay geometrically at `decay_ratio` per pass.
///
/// Per tick: pop the frame stored `delay` ticks ago, emit
/// `wet * ratio + dry`, and push that same output back onto the line.
///
/// Registered methods: `"SetDecayRatio"`, `"GetDecayRatio"`.
pub struct Echo {
    line: DelayLine,
    ratio: f64,
    methods: MethodTable<Self>,
}

impl Echo {
    pub(crate) fn new(delay: usize, decay_ratio: f64) -> Self {
        let mut methods = MethodTable::new();
        methods.register("SetDecayRatio", |echo: &mut Self, args: &mut Args| {
            echo.ratio = args.float(0)?;
            Ok(())
        });
        methods.register("GetDecayRatio", |echo: &mut Self, args: &mut Args| {
            args.set(0, Value::Float(echo.ratio))
        });

        Self {
            // A zero-length line would feed the output straight back into
            // itself; one frame is the shortest honest delay.
            line: DelayLine::new(delay.max(1)),
            ratio: decay_ratio,
            methods,
        }
    }

    pub fn decay_ratio(&self) -> f64 {
        self.ratio
    }
}

impl HasMethods for Echo {
    fn method_table(&self) -> &MethodTable<Self> {
        &self.methods
    }
}

impl Modifier for Echo {
    fn process(&mut self, dry: Frame) -> Frame {
        let wet = self.line.pop();
        let out = wet * self.ratio as f32 + dry;
        self.line.push(out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_the_input_through_before_the_delay_elapses() {
        let mut echo = Echo::new(5, 0.5);
        for n in 0..5 {
            let dry = Frame::splat(n as f32 * 0.1);
            assert_eq!(echo.process(dry), dry, "tick {n}");
        }
    }

    #[test]
    fn obeys_the_feedback_recurrence() {
        // output[n] = input[n] + ratio * output[n - delay] for n >= delay.
        let delay = 3;
        let ratio = 0.5f32;
        let mut echo = Echo::new(delay, f64::from(ratio));

        let input: Vec<Frame> = (0..32)
            .map(|n| Frame::new((n as f32 * 0.37).sin(), (n as f32 * 0.61).cos()))
            .collect();
        let output: Vec<Frame> = input.iter().map(|dry| echo.process(*dry)).collect();

        for n in delay..input.len() {
            let expected = input[n] + output[n - delay] * ratio;
            assert!(
                (output[n].left - expected.left).abs() < 1e-6
                    && (output[n].right - expected.right).abs() < 1e-6,
                "recurrence broken at {n}"
            );
        }
    }

    #[test]
    fn decay_ratio_is_tunable_by_name() {
        use crate::control::{Controlled, Value};

        let mut echo = Echo::new(4, 0.5);
        echo.call_method("SetDecayRatio", &mut [Value::Float(0.125)])
            .unwrap();
        assert_eq!(echo.decay_ratio(), 0.125);

        let mut slots = [Value::Float(0.0)];
        echo.call_method("GetDecayRatio", &mut slots).unwrap();
        assert_eq!(slots[0], Value::Float(0.125));
    }

    #[test]
    fn an_impulse_decays_geometrically() {
        let mut echo = Echo::new(2, 0.25);
        let mut samples = Vec::new();
        samples.push(echo.process(Frame::splat(1.0)).left);
        for _ in 0..8 {
            samples.push(echo.process(Frame::ZERO).left);
        }
        assert_eq!(&samples[..7], &[1.0, 0.0, 0.25, 0.0, 0.0625, 0.0, 0.015625]);
    }
}
