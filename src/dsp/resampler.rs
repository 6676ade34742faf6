use std::rc::Rc;

use crate::frame::{Frame, Track};

/*
Variable-Rate Playback
======================

The resampler turns a fixed recorded track into a continuous stream at an
arbitrary playback rate. A fractional cursor walks the track; each call
linearly interpolates between the two frames around the cursor, then advances
it by

    increment = sourceRate / outputRate * playbackSpeed

Speed 1.0 with matching rates advances the cursor by exactly 1.0 per call,
so the fraction stays 0 and the track is reproduced untouched.

Three regimes, by cursor position:

  before the end    interpolate between floor(cursor) and floor(cursor)+1
  looping           same, but the neighbor past the end wraps back by the
                    loop window; after advancing, a cursor at or past the
                    loop end is pulled back by (loopEnd - loopStart)
  past the end      no loop configured: silence, forever; the cursor stops
                    advancing

A loop window [start, end) is configured with `end != 0`; `end == 0` means
one-shot playback. The playback speed may be negative (reverse) and may
change sign at any time; the cursor never goes below zero.
*/

pub struct Resampler {
    data: Rc<Track>,
    cursor: f64,
    increment: f64,
    speed: f64,
    loop_start: u64,
    loop_end: u64,
}

impl Resampler {
    /// Wraps `data` recorded at `source_rate` for playback at `output_rate`.
    pub fn new(data: Rc<Track>, source_rate: u32, output_rate: u32) -> Self {
        Self {
            data,
            cursor: 0.0,
            increment: f64::from(source_rate) / f64::from(output_rate),
            speed: 1.0,
            loop_start: 0,
            loop_end: 0,
        }
    }

    /// Configures the loop window `[start, end)` in source frames.
    /// An `end` of 0 disables looping.
    pub fn set_loop(&mut self, start: u64, end: u64) {
        self.loop_start = start;
        self.loop_end = end;
    }

    pub fn playback_speed(&self) -> f64 {
        self.speed
    }

    pub fn set_playback_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Rewinds the cursor to the start of the track.
    pub fn reset(&mut self) {
        self.cursor = 0.0;
    }

    /// Produces the next output frame and advances the cursor.
    pub fn process(&mut self) -> Frame {
        let length = self.data.len();
        let index = self.cursor as usize;

        if index >= length && self.loop_end == 0 {
            return Frame::ZERO;
        }

        let fraction = (self.cursor - index as f64) as f32;
        let here = self.frame_at(index);
        let next = if index + 1 >= length {
            if self.loop_end != 0 {
                let window = (self.loop_end - self.loop_start) as f64;
                self.frame_at((self.cursor - window).max(0.0) as usize)
            } else {
                here
            }
        } else {
            self.frame_at(index + 1)
        };

        let sample = Frame::new(
            here.left + fraction * (next.left - here.left),
            here.right + fraction * (next.right - here.right),
        );

        self.cursor += self.increment * self.speed;

        if self.loop_end != 0 && self.cursor >= self.loop_end as f64 {
            self.cursor -= (self.loop_end - self.loop_start) as f64;
        }
        if self.cursor < 0.0 {
            self.cursor = 0.0;
        }

        sample
    }

    fn frame_at(&self, index: usize) -> Frame {
        self.data.get(index).copied().unwrap_or(Frame::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(length: usize) -> Rc<Track> {
        Rc::new((0..length).map(|n| Frame::splat(n as f32)).collect())
    }

    #[test]
    fn unit_speed_at_matching_rates_is_the_identity() {
        let data = ramp(16);
        let mut resampler = Resampler::new(data.clone(), 48_000, 48_000);
        for frame in data.iter() {
            assert_eq!(resampler.process(), *frame);
        }
    }

    #[test]
    fn past_the_end_without_a_loop_is_silence_forever() {
        let mut resampler = Resampler::new(ramp(4), 48_000, 48_000);
        for _ in 0..4 {
            resampler.process();
        }
        for _ in 0..16 {
            assert_eq!(resampler.process(), Frame::ZERO);
        }
    }

    #[test]
    fn half_speed_interpolates_between_neighbors() {
        let mut resampler = Resampler::new(ramp(8), 48_000, 48_000);
        resampler.set_playback_speed(0.5);

        assert_eq!(resampler.process(), Frame::splat(0.0));
        assert_eq!(resampler.process(), Frame::splat(0.5));
        assert_eq!(resampler.process(), Frame::splat(1.0));
        assert_eq!(resampler.process(), Frame::splat(1.5));
    }

    #[test]
    fn crossing_the_loop_end_wraps_into_the_window() {
        let mut resampler = Resampler::new(ramp(8), 48_000, 48_000);
        resampler.set_loop(2, 6);

        // 0 1 2 3 4 5 then back to 2.
        let expected = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 2.0, 3.0, 4.0, 5.0, 2.0];
        for value in expected {
            assert_eq!(resampler.process(), Frame::splat(value));
        }
    }

    #[test]
    fn wrapped_cursor_matches_the_window_offset() {
        // After passing loopEnd the next read sits at cursor - (end - start).
        let mut looped = Resampler::new(ramp(8), 48_000, 48_000);
        looped.set_loop(0, 5);
        looped.set_playback_speed(1.5);

        let mut cursor = 0.0f64;
        for _ in 0..20 {
            let got = looped.process().left;
            assert!((got - cursor as f32).abs() < 1e-4, "cursor {cursor} got {got}");
            cursor += 1.5;
            if cursor >= 5.0 {
                cursor -= 5.0;
            }
        }
    }

    #[test]
    fn negative_speed_walks_backwards_and_stops_at_zero() {
        let mut resampler = Resampler::new(ramp(8), 48_000, 48_000);
        for _ in 0..5 {
            resampler.process();
        }

        resampler.set_playback_speed(-1.0);
        assert_eq!(resampler.process(), Frame::splat(5.0));
        assert_eq!(resampler.process(), Frame::splat(4.0));
        assert_eq!(resampler.process(), Frame::splat(3.0));

        // Runs into the front of the buffer and holds there.
        for _ in 0..8 {
            resampler.process();
        }
        assert_eq!(resampler.process(), Frame::splat(0.0));
    }

    #[test]
    fn rate_mismatch_scales_the_step() {
        let mut resampler = Resampler::new(ramp(64), 24_000, 48_000);
        // Source at half the tick rate: cursor advances by 0.5.
        assert_eq!(resampler.process(), Frame::splat(0.0));
        assert_eq!(resampler.process(), Frame::splat(0.5));
        assert_eq!(resampler.process(), Frame::splat(1.0));
    }

    #[test]
    fn empty_track_is_silent() {
        let mut resampler = Resampler::new(Rc::new(Track::new()), 48_000, 48_000);
        assert_eq!(resampler.process(), Frame::ZERO);
    }
}
