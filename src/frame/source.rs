//! Pull-based frame source contract.

use crate::frame::{Frame, FrameRing};
use crate::util::LiveMatchResult;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Supplier of captured frames.
///
/// Capture back-ends stay outside this crate; they push into a `FrameRing`
/// (which implements this trait) or implement it directly.
pub trait FrameSource: Send + Sync {
    /// Suspends until a frame newer than `after` exists (any frame when
    /// `after` is `None`) and returns the newest one.
    ///
    /// Must resolve to `Err(LiveMatchError::Cancelled)` promptly once
    /// `cancel` fires.
    fn next_frame(
        &self,
        after: Option<u64>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = LiveMatchResult<Arc<Frame>>> + Send;

    /// Returns the newest frame without waiting.
    fn last_frame(&self) -> Option<Arc<Frame>>;
}

impl FrameSource for FrameRing {
    fn next_frame(
        &self,
        after: Option<u64>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = LiveMatchResult<Arc<Frame>>> + Send {
        self.next_after(after, cancel)
    }

    fn last_frame(&self) -> Option<Arc<Frame>> {
        self.last()
    }
}

impl<T: FrameSource> FrameSource for Arc<T> {
    fn next_frame(
        &self,
        after: Option<u64>,
        cancel: &CancellationToken,
    ) -> impl Future<Output = LiveMatchResult<Arc<Frame>>> + Send {
        (**self).next_frame(after, cancel)
    }

    fn last_frame(&self) -> Option<Arc<Frame>> {
        (**self).last_frame()
    }
}
