use crate::frame::{Frame, Track};
use crate::graph::Sound;

/// Pulls a sound one tick per output frame on behalf of an external audio
/// callback.
///
/// The driver adds no buffering of its own: if nothing calls it, the graph
/// simply stops advancing.
pub struct Driver {
    sound: Sound,
}

impl Driver {
    pub fn new(sound: Sound) -> Self {
        Self { sound }
    }

    /// The owned sound, for reconfiguration between ticks.
    pub fn sound_mut(&mut self) -> &mut Sound {
        &mut self.sound
    }

    /// Advances the graph by one frame.
    pub fn tick(&mut self) -> Frame {
        self.sound.tick()
    }

    /// Renders `frames` ticks into a fresh track.
    pub fn render(&mut self, frames: usize) -> Track {
        let mut track = Track::with_capacity(frames);
        for _ in 0..frames {
            track.push(self.sound.tick());
        }
        track
    }

    /// Fills an interleaved output buffer, one tick per frame slot.
    ///
    /// Stereo pairs land in channels 0 and 1; a mono layout gets the two
    /// channels averaged; any further channels are zeroed. A ragged tail
    /// shorter than one frame is left untouched.
    pub fn fill_interleaved(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        if channels == 1 {
            for slot in out.iter_mut() {
                *slot = self.sound.tick().mono();
            }
            return;
        }
        for slot in out.chunks_exact_mut(channels) {
            let frame = self.sound.tick();
            slot[0] = frame.left;
            slot[1] = frame.right;
            for extra in &mut slot[2..] {
                *extra = 0.0;
            }
        }
    }
}
