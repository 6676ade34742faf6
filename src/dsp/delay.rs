use std::collections::VecDeque;

use crate::frame::Frame;

/// Fixed-length stereo FIFO, primed with silence.
///
/// The line always holds exactly its constructed length between calls:
/// every [`pop`](DelayLine::pop) is paired with a [`push`](DelayLine::push)
/// by the owning effect.
pub struct DelayLine {
    line: VecDeque<Frame>,
}

impl DelayLine {
    /// Creates a line `length` frames deep, filled with silence, so the
    /// first `length` pops return zero frames.
    pub fn new(length: usize) -> Self {
        let mut line = VecDeque::with_capacity(length);
        line.extend(std::iter::repeat(Frame::ZERO).take(length));
        Self { line }
    }

    /// Removes and returns the oldest stored frame.
    pub fn pop(&mut self) -> Frame {
        self.line.pop_front().unwrap_or(Frame::ZERO)
    }

    /// Appends `frame` at the tail.
    pub fn push(&mut self, frame: Frame) {
        self.line.push_back(frame);
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Refills the line with silence without changing its length.
    pub fn reset(&mut self) {
        for frame in self.line.iter_mut() {
            *frame = Frame::ZERO;
        }
    }
}
