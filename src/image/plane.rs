//! Owned single- or three-channel images produced by preprocessing.

use crate::image::ImageView;
use crate::util::{LiveMatchError, LiveMatchResult};

/// Owned contiguous `u8` image with 1 (grayscale) or 3 (RGB) interleaved
/// channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl Plane {
    /// Creates a plane from a contiguous buffer of exactly
    /// `width * height * channels` bytes.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> LiveMatchResult<Self> {
        if channels != 1 && channels != 3 {
            return Err(LiveMatchError::InvalidInput("planes have 1 or 3 channels"));
        }
        if width == 0 || height == 0 {
            return Err(LiveMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(LiveMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(LiveMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(LiveMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a grayscale plane.
    pub fn gray(data: Vec<u8>, width: usize, height: usize) -> LiveMatchResult<Self> {
        Self::new(data, width, height, 1)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of elements in one row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.width * self.channels
    }

    /// Returns the interleaved data in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns row `y` as `width * channels` interleaved elements.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let len = self.row_len();
        self.data.get(y * len..(y + 1) * len)
    }

    /// Returns channel `c` of pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<u8> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        self.data.get((y * self.width + x) * self.channels + c).copied()
    }

    /// Element view of the plane (`width * channels` elements per row).
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.row_len(),
            height: self.height,
            stride: self.row_len(),
        }
    }

    /// True when `other` fits inside this plane in both axes.
    pub fn fits(&self, other: &Plane) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}
