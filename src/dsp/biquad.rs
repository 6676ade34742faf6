use crate::frame::Frame;

/// Two-pole band-pass section.
///
/// Built as a cascade of one-pole low- and high-pass stages placed at the
/// band's corner frequencies. The corners come from solving
/// `f^2 - (fc/Q)f - fc^2 = 0`, which keeps `fc` the geometric mean of the
/// corners and `fc/Q` their spacing.
pub struct BandPassSection {
    center: f64,
    quality: f64,
    inv_rate: f64,

    // Difference-equation coefficients, recomputed on any parameter change.
    a0: f64,
    b1: f64,
    b2: f64,

    // Two frames of input/output history per channel.
    x1: Frame,
    x2: Frame,
    y1: Frame,
    y2: Frame,
}

impl BandPassSection {
    pub fn new(center: f64, quality: f64, sample_rate: u32) -> Self {
        let mut section = Self {
            center,
            quality,
            inv_rate: 1.0 / f64::from(sample_rate),
            a0: 0.0,
            b1: 0.0,
            b2: 0.0,
            x1: Frame::ZERO,
            x2: Frame::ZERO,
            y1: Frame::ZERO,
            y2: Frame::ZERO,
        };
        section.update_coefficients();
        section
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn set_center(&mut self, center: f64) {
        self.center = center;
        self.update_coefficients();
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: f64) {
        self.quality = quality;
        self.update_coefficients();
    }

    /// Runs one frame through the section.
    pub fn process(&mut self, x: Frame) -> Frame {
        let y = Frame::new(
            (self.a0 * f64::from(x.left - self.x2.left) + self.b1 * f64::from(self.y1.left)
                - self.b2 * f64::from(self.y2.left)) as f32,
            (self.a0 * f64::from(x.right - self.x2.right) + self.b1 * f64::from(self.y1.right)
                - self.b2 * f64::from(self.y2.right)) as f32,
        );

        self.y2 = self.y1;
        self.y1 = y;
        self.x2 = self.x1;
        self.x1 = x;

        y
    }

    fn update_coefficients(&mut self) {
        // Corner frequencies of the band around `center`.
        let spacing = self.center / self.quality;
        let upper = quadratic_positive_root(1.0, -spacing, -self.center * self.center);
        let lower = upper - spacing;

        let theta_u = (std::f64::consts::PI * upper * self.inv_rate).tan();
        let theta_d = (std::f64::consts::PI * lower * self.inv_rate).tan();

        let au = 1.0 / (1.0 + theta_u);
        let ad = 1.0 / (1.0 + theta_d);

        let bu = (1.0 - theta_u) / (1.0 + theta_u);
        let bd = (1.0 - theta_d) / (1.0 + theta_d);

        self.a0 = (1.0 - au) * ad;
        self.b1 = bu + bd;
        self.b2 = bu * bd;
    }
}

fn quadratic_positive_root(a: f64, b: f64, c: f64) -> f64 {
    (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}
