//! Match stabilization: locality-first single-shot search and polling
//! waits that only accept placements seen stable across frames.

mod matcher;
mod session;

pub use matcher::LiveMatcher;
pub use session::{HitMemory, SessionState};

use std::time::Duration;

/// Tuning shared by every call on one `LiveMatcher`.
#[derive(Clone, Debug, PartialEq)]
pub struct StabilizerConfig {
    /// Local search window size as a multiple of the template size.
    pub locality_factor: f32,
    /// Every n-th poll of a wait searches the full frame (0 disables).
    pub global_refresh_ticks: u32,
    /// Accepted centres closer than this (both axes) count as the same hit.
    pub stability_tolerance_px: u32,
    /// Threshold slack for near passes when a wait allows them.
    pub near_margin: f32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            locality_factor: 3.0,
            global_refresh_ticks: 8,
            stability_tolerance_px: 2,
            near_margin: 0.05,
        }
    }
}

/// Per-call parameters of `LiveMatcher::wait_for_match`.
#[derive(Clone, Debug, PartialEq)]
pub struct WaitOptions {
    pub timeout: Duration,
    /// Pause between polls; the last pause is cut short by the deadline.
    pub poll_interval: Duration,
    /// Accept near passes as hits.
    pub allow_near: bool,
    /// Overrides `StabilizerConfig::global_refresh_ticks` for this wait.
    pub global_refresh_ticks: Option<u32>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            allow_near: false,
            global_refresh_ticks: None,
        }
    }
}
