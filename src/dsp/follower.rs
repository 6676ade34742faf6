use crate::frame::Frame;

/// Attack/release envelope follower.
///
/// Tracks the magnitude of its input with two one-pole smoothers: a fast one
/// while the magnitude is rising and a slow one while it is falling. The
/// coefficients are parameterized as cutoff frequencies, so a follower built
/// with `(20.0, 20_000.0)` snaps onto transients and lets go over tens of
/// milliseconds.
pub struct Follower {
    // Smoothing coefficients; `up` applies while the input magnitude
    // exceeds the tracked level.
    up: f64,
    down: f64,
    level_left: f64,
    level_right: f64,
}

impl Follower {
    pub fn new(down_hz: f64, up_hz: f64, sample_rate: u32) -> Self {
        Self {
            up: one_pole(up_hz, sample_rate),
            down: one_pole(down_hz, sample_rate),
            level_left: 0.0,
            level_right: 0.0,
        }
    }

    /// Advances the follower by one frame and returns the tracked envelope,
    /// per channel.
    pub fn process(&mut self, input: Frame) -> Frame {
        self.level_left = track(self.level_left, f64::from(input.left).abs(), self.up, self.down);
        self.level_right = track(
            self.level_right,
            f64::from(input.right).abs(),
            self.up,
            self.down,
        );
        Frame::new(self.level_left as f32, self.level_right as f32)
    }

    pub fn reset(&mut self) {
        self.level_left = 0.0;
        self.level_right = 0.0;
    }
}

fn one_pole(cutoff_hz: f64, sample_rate: u32) -> f64 {
    (-std::f64::consts::TAU * cutoff_hz / f64::from(sample_rate)).exp()
}

fn track(level: f64, magnitude: f64, up: f64, down: f64) -> f64 {
    let coefficient = if magnitude > level { up } else { down };
    coefficient * level + (1.0 - coefficient) * magnitude
}
