use std::mem;

use crate::error::{Error, Result};
use crate::frame::FrameBuffer;

/// Output side of the double buffer: a simulator window, a headless
/// preview, or panel hardware.
pub trait Display {
    /// Physical size in LEDs.
    fn size(&self) -> (usize, usize);

    /// Make `frame` the visible picture in one step and hand back the buffer
    /// that the next frame should be drawn into.
    fn commit(&mut self, frame: FrameBuffer) -> Result<FrameBuffer>;

    /// The last committed frame.
    fn front(&self) -> &FrameBuffer;
}

pub fn check_size(display: (usize, usize), frame: &FrameBuffer) -> Result<()> {
    if frame.size() != display {
        let (width, height) = frame.size();
        return Err(Error::Display(format!(
            "cannot commit a {}x{} frame to a {}x{} display",
            width, height, display.0, display.1
        )));
    }
    Ok(())
}

/// Keeps the visible frame in memory.
pub struct MemoryDisplay {
    front: FrameBuffer,
    commits: usize,
}

impl MemoryDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            front: FrameBuffer::new(width, height),
            commits: 0,
        }
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Display for MemoryDisplay {
    fn size(&self) -> (usize, usize) {
        self.front.size()
    }

    fn commit(&mut self, frame: FrameBuffer) -> Result<FrameBuffer> {
        check_size(self.size(), &frame)?;
        self.commits += 1;
        Ok(mem::replace(&mut self.front, frame))
    }

    fn front(&self) -> &FrameBuffer {
        &self.front
    }
}
