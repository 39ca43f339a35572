//! Fixed-capacity history of recently captured frames.
//!
//! All reads and writes serialize through one mutex, so readers never see a
//! frame half-evicted. Frames are handed out as `Arc` clones: the ring owns
//! one reference per stored frame and drops it on eviction, `clear`, or when
//! the ring itself is dropped. Arrival of a new frame is broadcast on a
//! `watch` channel carrying the newest sequence number, which is what
//! `next_after` suspends on.

use crate::frame::Frame;
use crate::trace::trace_debug;
use crate::util::{LiveMatchError, LiveMatchResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Capacity used by `FrameRing::default`.
pub const DEFAULT_RING_CAPACITY: usize = 30;

/// Bounded frame buffer with oldest-first eviction.
#[derive(Debug)]
pub struct FrameRing {
    capacity: usize,
    frames: Mutex<VecDeque<Arc<Frame>>>,
    latest: watch::Sender<Option<u64>>,
}

impl FrameRing {
    /// Creates a ring holding at most `capacity` frames.
    ///
    /// A capacity of 0 is coerced to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (latest, _) = watch::channel(None);
        Self {
            capacity,
            frames: Mutex::new(VecDeque::with_capacity(capacity)),
            latest,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }

    /// Appends a frame, evicting the oldest one when the ring is full.
    ///
    /// Returns the shared handle now stored in the ring.
    pub fn push(&self, frame: Frame) -> Arc<Frame> {
        let frame = Arc::new(frame);
        self.push_shared(Arc::clone(&frame));
        frame
    }

    /// Appends an already shared frame.
    pub fn push_shared(&self, frame: Arc<Frame>) {
        let sequence = frame.sequence();
        let evicted = {
            let mut frames = self.frames.lock();
            let evicted = if frames.len() >= self.capacity {
                frames.pop_front()
            } else {
                None
            };
            frames.push_back(frame);
            evicted
        };
        if let Some(old) = evicted {
            trace_debug!("frame_evicted", sequence = old.sequence());
            drop(old);
        }
        self.latest.send_replace(Some(sequence));
    }

    /// Returns the most recently pushed frame.
    pub fn last(&self) -> Option<Arc<Frame>> {
        self.frames.lock().back().cloned()
    }

    /// Returns up to `k` frames, most recent first.
    pub fn recent(&self, k: usize) -> Vec<Arc<Frame>> {
        let frames = self.frames.lock();
        frames.iter().rev().take(k).cloned().collect()
    }

    /// Sequence number of the newest frame, if any.
    pub fn latest_sequence(&self) -> Option<u64> {
        self.frames.lock().back().map(|f| f.sequence())
    }

    /// Drops every stored frame.
    pub fn clear(&self) {
        let drained: Vec<_> = self.frames.lock().drain(..).collect();
        drop(drained);
    }

    fn newer_than(&self, after: Option<u64>) -> Option<Arc<Frame>> {
        let frames = self.frames.lock();
        let newest = frames.back()?;
        match after {
            Some(seq) if newest.sequence() <= seq => None,
            _ => Some(Arc::clone(newest)),
        }
    }

    /// Waits for a frame newer than `after` (any frame when `None`) and
    /// returns the newest one.
    ///
    /// Returns `Err(Cancelled)` as soon as `cancel` fires. The lock is never
    /// held while waiting.
    pub async fn next_after(
        &self,
        after: Option<u64>,
        cancel: &CancellationToken,
    ) -> LiveMatchResult<Arc<Frame>> {
        // Subscribe before inspecting the ring so a push racing with the
        // check still marks the channel as changed.
        let mut rx = self.latest.subscribe();
        loop {
            if cancel.is_cancelled() {
                return Err(LiveMatchError::Cancelled);
            }
            if let Some(frame) = self.newer_than(after) {
                return Ok(frame);
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LiveMatchError::Cancelled),
                changed = rx.changed() => {
                    if changed.is_err() {
                        return Err(LiveMatchError::InvalidInput("frame ring closed"));
                    }
                }
            }
        }
    }
}

impl Default for FrameRing {
    fn default() -> Self {
        Self::new(DEFAULT_RING_CAPACITY)
    }
}
