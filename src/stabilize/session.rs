//! Per-call search state and the per-matcher memory of last hits.

use crate::image::Point;
use crate::template::TemplateId;
use parking_lot::Mutex;
use std::collections::HashMap;

/// State of one find or wait call.
///
/// Seeded from `HitMemory` when the call starts and dropped when it
/// returns; only a confirmed hit is written back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    last_hit: Option<Point>,
    previous: Option<Point>,
    consecutive_hits: u32,
    ticks: u64,
}

impl SessionState {
    pub fn new(last_hit: Option<Point>) -> Self {
        Self {
            last_hit,
            ..Self::default()
        }
    }

    /// Centre the next local search is anchored on.
    pub fn last_hit(&self) -> Option<Point> {
        self.last_hit
    }

    /// Centre of the previous accepted poll, if the streak is alive.
    pub fn previous(&self) -> Option<Point> {
        self.previous
    }

    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive_hits
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the poll counter and reports whether this poll must search
    /// the full frame. `refresh_every == 0` never forces.
    pub fn tick(&mut self, refresh_every: u32) -> bool {
        self.ticks += 1;
        refresh_every > 0 && self.ticks % u64::from(refresh_every) == 0
    }

    /// Records an accepted poll and returns the updated streak length.
    ///
    /// The streak grows when `center` is within `tolerance` of the previous
    /// accepted centre and restarts at 1 otherwise.
    pub fn record_hit(&mut self, center: Point, tolerance: u32) -> u32 {
        self.consecutive_hits = match self.previous {
            Some(prev) if prev.is_near(center, tolerance) => {
                self.consecutive_hits.saturating_add(1)
            }
            _ => 1,
        };
        self.previous = Some(center);
        self.last_hit = Some(center);
        self.consecutive_hits
    }

    /// Records a rejected poll: the streak and its anchor are dropped.
    pub fn record_miss(&mut self) {
        self.consecutive_hits = 0;
        self.previous = None;
    }
}

/// Last confirmed centre per template, shared by calls on one matcher.
#[derive(Debug, Default)]
pub struct HitMemory {
    hits: Mutex<HashMap<TemplateId, Point>>,
}

impl HitMemory {
    pub fn get(&self, id: &TemplateId) -> Option<Point> {
        self.hits.lock().get(id).copied()
    }

    pub fn remember(&self, id: &TemplateId, center: Point) {
        self.hits.lock().insert(id.clone(), center);
    }

    pub fn forget(&self, id: &TemplateId) -> Option<Point> {
        self.hits.lock().remove(id)
    }

    pub fn clear(&self) {
        self.hits.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.hits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.lock().is_empty()
    }
}
