//! High-level facade tying a frame source to the search functions.

use crate::frame::{Frame, FrameSource};
use crate::image::{Point, Rect};
use crate::search::{find_all, find_best, MatchOptions, MatchResult};
use crate::stabilize::{HitMemory, SessionState, StabilizerConfig, WaitOptions};
use crate::template::Template;
use crate::trace::{trace_debug, trace_event};
use crate::util::{LiveMatchError, LiveMatchResult};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Template matcher over a live frame source.
///
/// Searches read frames and cached template variants; the only state they
/// change is the matcher's `HitMemory`, which anchors later searches for
/// the same template near its last confirmed position.
pub struct LiveMatcher<S> {
    source: S,
    config: StabilizerConfig,
    hits: HitMemory,
}

impl<S: FrameSource> LiveMatcher<S> {
    /// Creates a matcher with the default stabilizer configuration.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: StabilizerConfig::default(),
            hits: HitMemory::default(),
        }
    }

    /// Replaces the stabilizer configuration.
    pub fn with_config(mut self, config: StabilizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }

    pub fn hits(&self) -> &HitMemory {
        &self.hits
    }

    /// Single-shot search on the newest frame; `Ok(None)` without frames.
    pub fn find_best_match(
        &self,
        template: &Template,
        options: &MatchOptions,
    ) -> LiveMatchResult<Option<MatchResult>> {
        match self.source.last_frame() {
            Some(frame) => self.find_best_in(&frame, template, options),
            None => Ok(None),
        }
    }

    /// Single-shot search on an explicit frame.
    ///
    /// A remembered hit is tried first with a local ROI around it, clipped
    /// to the caller's ROI; when that finds nothing acceptable the search is
    /// repeated with the caller's own ROI (the full frame when unset).
    pub fn find_best_in(
        &self,
        frame: &Frame,
        template: &Template,
        options: &MatchOptions,
    ) -> LiveMatchResult<Option<MatchResult>> {
        let session = SessionState::new(self.hits.get(template.id()));
        let accepted = |r: &MatchResult| r.hard_pass || !options.require_hard_pass;

        let mut result = None;
        if let Some(roi) = session
            .last_hit()
            .and_then(|center| self.local_roi(center, template, options.roi))
        {
            let local = MatchOptions {
                roi: Some(roi),
                ..options.clone()
            };
            result = find_best(frame, template, &local)?;
        }
        if !result.as_ref().is_some_and(accepted) {
            if session.last_hit().is_some() {
                trace_debug!("local_fallback", sequence = frame.sequence());
            }
            result = find_best(frame, template, options)?;
        }

        if let Some(found) = result.as_ref() {
            if accepted(found) {
                self.hits.remember(template.id(), found.center);
            }
        }
        Ok(result)
    }

    /// Polls frames until the template is found stably, the timeout
    /// elapses (`Ok(None)`) or `cancel` fires (`Err(Cancelled)`).
    ///
    /// Each poll evaluates a frame newer than the previous one. A poll is
    /// accepted on a hard pass, or on a near pass when `wait.allow_near`;
    /// the call returns once `options.consecutive_hits_required` accepted
    /// polls in a row have centres within the stability tolerance.
    pub async fn wait_for_match(
        &self,
        template: &Template,
        wait: &WaitOptions,
        options: &MatchOptions,
        cancel: &CancellationToken,
    ) -> LiveMatchResult<Option<MatchResult>> {
        let deadline = Instant::now() + wait.timeout;
        let refresh = wait.global_refresh_ticks.unwrap_or(self.config.global_refresh_ticks);
        let required = options.consecutive_hits_required.max(1);
        let mut session = SessionState::new(self.hits.get(template.id()));
        let mut last_sequence = None;
        trace_event!(
            "wait_started",
            template = template.id().as_str(),
            required = required
        );

        loop {
            if cancel.is_cancelled() {
                trace_event!("wait_cancelled", ticks = session.ticks());
                return Err(LiveMatchError::Cancelled);
            }
            if Instant::now() >= deadline {
                trace_event!("wait_timeout", ticks = session.ticks());
                return Ok(None);
            }

            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    trace_event!("wait_cancelled", ticks = session.ticks());
                    return Err(LiveMatchError::Cancelled);
                }
                _ = sleep_until(deadline) => {
                    trace_event!("wait_timeout", ticks = session.ticks());
                    return Ok(None);
                }
                frame = self.source.next_frame(last_sequence, cancel) => frame?,
            };
            last_sequence = Some(frame.sequence());

            let force_global = session.tick(refresh);
            let roi = match session.last_hit() {
                Some(center) if !force_global => self
                    .local_roi(center, template, options.roi)
                    .or(options.roi),
                _ => options.roi,
            };
            let attempt = MatchOptions { roi, ..options.clone() };
            let result = find_best(&frame, template, &attempt)?;

            match result.filter(|r| self.accepts(r, options, wait.allow_near)) {
                Some(found) => {
                    let tolerance = self.config.stability_tolerance_px;
                    let streak = session.record_hit(found.center, tolerance);
                    trace_debug!(
                        "poll_hit",
                        sequence = frame.sequence(),
                        streak = streak,
                        score = found.score
                    );
                    if streak >= required {
                        self.hits.remember(template.id(), found.center);
                        trace_event!(
                        "wait_matched",
                        score = found.score,
                        ticks = session.ticks()
                    );
                        return Ok(Some(found));
                    }
                }
                None => {
                    trace_debug!(
                        "poll_miss",
                        sequence = frame.sequence(),
                        global = force_global
                    );
                    session.record_miss();
                }
            }

            let wake = (Instant::now() + wait.poll_interval).min(deadline);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    trace_event!("wait_cancelled", ticks = session.ticks());
                    return Err(LiveMatchError::Cancelled);
                }
                _ = sleep_until(wake) => {}
            }
        }
    }

    /// Multi-match search on the newest frame; empty without frames.
    pub fn find_all_matches(
        &self,
        template: &Template,
        options: &MatchOptions,
        max_results: usize,
        nms_overlap: f32,
    ) -> LiveMatchResult<Vec<MatchResult>> {
        match self.source.last_frame() {
            Some(frame) => {
                self.find_all_in(&frame, template, options, max_results, nms_overlap)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Multi-match search on an explicit frame.
    pub fn find_all_in(
        &self,
        frame: &Frame,
        template: &Template,
        options: &MatchOptions,
        max_results: usize,
        nms_overlap: f32,
    ) -> LiveMatchResult<Vec<MatchResult>> {
        find_all(frame, template, options, max_results, nms_overlap)
    }

    /// Window of `locality_factor` template sizes centred on `center`,
    /// clipped to `bounds`; `None` when the two do not overlap.
    fn local_roi(&self, center: Point, template: &Template, bounds: Option<Rect>) -> Option<Rect> {
        let factor = self.config.locality_factor.max(0.0);
        let width = (template.width() as f32 * factor).round() as u32;
        let height = (template.height() as f32 * factor).round() as u32;
        let window = Rect::centered(center, width, height);
        match bounds {
            Some(bounds) => window.intersect(&bounds),
            None => Some(window),
        }
    }

    fn accepts(&self, result: &MatchResult, options: &MatchOptions, allow_near: bool) -> bool {
        result.hard_pass
            || (allow_near
                && options
                    .metric
                    .near_passes(result.score, options.threshold, self.config.near_margin))
    }
}
