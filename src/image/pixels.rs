//! Four-byte-per-pixel colour buffers as produced by capture back-ends.

use crate::image::ImageView;
use crate::util::{LiveMatchError, LiveMatchResult};

/// Bytes per pixel of every supported `PixelFormat`.
pub const BYTES_PER_PIXEL: usize = 4;

/// Channel order of a 4-byte colour pixel. The fourth byte is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Blue, green, red, alpha (desktop capture APIs).
    #[default]
    Bgra8,
    /// Red, green, blue, alpha (decoded image files).
    Rgba8,
}

impl PixelFormat {
    /// Returns `[r, g, b]` for one pixel in this format.
    #[inline]
    pub fn rgb(self, px: &[u8]) -> [u8; 3] {
        match self {
            PixelFormat::Bgra8 => [px[2], px[1], px[0]],
            PixelFormat::Rgba8 => [px[0], px[1], px[2]],
        }
    }
}

/// Owned colour pixel buffer with an explicit row stride in bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl PixelBuffer {
    /// Wraps a strided buffer, validating its geometry.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> LiveMatchResult<Self> {
        let row_bytes = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(LiveMatchError::InvalidDimensions { width, height })?;
        // Validates dimensions, stride and length in one place.
        ImageView::new(&data, row_bytes, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Wraps a tightly packed buffer (`stride == width * 4`).
    pub fn from_packed(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> LiveMatchResult<Self> {
        let stride = width.saturating_mul(BYTES_PER_PIXEL);
        Self::new(data, width, height, stride, format)
    }

    /// Builds a packed buffer by evaluating `f(x, y) -> [r, g, b]` per pixel.
    pub fn from_fn<F>(
        width: usize,
        height: usize,
        format: PixelFormat,
        mut f: F,
    ) -> LiveMatchResult<Self>
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let len = width.saturating_mul(height).saturating_mul(BYTES_PER_PIXEL);
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = f(x, y);
                match format {
                    PixelFormat::Bgra8 => data.extend_from_slice(&[b, g, r, 255]),
                    PixelFormat::Rgba8 => data.extend_from_slice(&[r, g, b, 255]),
                }
            }
        }
        Self::from_packed(data, width, height, format)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the backing bytes including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Byte view of the buffer: one element per byte, `width * 4` per row.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width * BYTES_PER_PIXEL,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Returns `[r, g, b]` at `(x, y)` if it is within bounds.
    pub fn rgb_at(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride + x * BYTES_PER_PIXEL;
        let px = self.data.get(start..start + BYTES_PER_PIXEL)?;
        Some(self.format.rgb(px))
    }

    /// Copies a region into a new packed buffer.
    ///
    /// The region must lie entirely within the buffer.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> LiveMatchResult<Self> {
        let region = self
            .view()
            .roi(x * BYTES_PER_PIXEL, y, width * BYTES_PER_PIXEL, height)?;
        let mut data = Vec::with_capacity(width * height * BYTES_PER_PIXEL);
        for row in 0..height {
            if let Some(bytes) = region.row(row) {
                data.extend_from_slice(bytes);
            }
        }
        Self::from_packed(data, width, height, self.format)
    }

    /// Copies `src` into this buffer with its top-left at `(x, y)`, clipping
    /// anything that falls outside.
    pub fn blit(&mut self, src: &PixelBuffer, x: usize, y: usize) {
        for sy in 0..src.height {
            let dy = y + sy;
            if dy >= self.height {
                break;
            }
            for sx in 0..src.width {
                let dx = x + sx;
                if dx >= self.width {
                    break;
                }
                let Some([r, g, b]) = src.rgb_at(sx, sy) else {
                    continue;
                };
                let start = dy * self.stride + dx * BYTES_PER_PIXEL;
                let px = &mut self.data[start..start + BYTES_PER_PIXEL];
                match self.format {
                    PixelFormat::Bgra8 => px[..3].copy_from_slice(&[b, g, r]),
                    PixelFormat::Rgba8 => px[..3].copy_from_slice(&[r, g, b]),
                }
            }
        }
    }
}
