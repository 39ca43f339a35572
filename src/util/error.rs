//! Error types for livematch.

use thiserror::Error;

/// Result alias for livematch operations.
pub type LiveMatchResult<T> = std::result::Result<T, LiveMatchError>;

/// Errors that can occur when building inputs or running a match.
///
/// "No match" is never an error: searches report it as `Ok(None)` or an
/// empty vector. Errors are reserved for malformed inputs and cancellation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LiveMatchError {
    /// Width or height is zero or overflows the addressable range.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than a row of pixels.
    #[error("stride {stride} is smaller than row length {width}")]
    InvalidStride { width: usize, stride: usize },
    /// A region does not fit inside the image it was taken from.
    #[error("roi {x},{y} {width}x{height} outside image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The backing buffer is shorter than the declared geometry needs.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The caller cancelled a wait before it completed.
    #[error("operation cancelled")]
    Cancelled,
    /// A template store has no asset for the requested key.
    #[error("template not found: {key}")]
    TemplateNotFound { key: String },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Decoding an image from disk or memory failed.
    #[cfg(feature = "image-io")]
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
