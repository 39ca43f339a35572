//! Captured frames, the bounded frame history and the pull-based source
//! contract the stabilizer consumes.

mod ring;
mod source;

pub use ring::{FrameRing, DEFAULT_RING_CAPACITY};
pub use source::FrameSource;

use crate::image::PixelBuffer;
use std::time::Instant;

/// Where a frame was captured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameOrigin {
    /// A single window, identified by its platform handle.
    Window(u64),
    /// A whole screen, identified by its index.
    Screen(u32),
}

/// One captured image. Immutable once produced; shared as `Arc<Frame>`.
#[derive(Debug)]
pub struct Frame {
    pixels: PixelBuffer,
    sequence: u64,
    captured_at: Instant,
    origin: Option<FrameOrigin>,
}

impl Frame {
    /// Wraps captured pixels, stamping the capture time as now.
    pub fn new(pixels: PixelBuffer, sequence: u64) -> Self {
        Self {
            pixels,
            sequence,
            captured_at: Instant::now(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: FrameOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_captured_at(mut self, captured_at: Instant) -> Self {
        self.captured_at = captured_at;
        self
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Monotonically increasing capture counter assigned by the producer.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    pub fn origin(&self) -> Option<FrameOrigin> {
        self.origin
    }
}
