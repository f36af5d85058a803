//! Uncleaned-bin timeout.
//!
//! Measures how long the bin has been non-empty since it was last seen
//! empty, in whole seconds from the 1 Hz counter.  The seconds counter is
//! a `u32` and may wrap; a single wrap between two resets is tolerated by
//! latching an overflow flag the first time `now` is seen below the
//! baseline.

use log::{info, warn};

use super::occupancy::BinStatus;

/// Elapsed seconds between `last_reset` and `now`, accounting for at most
/// one wrap of the counter when `overflow_seen` is set.
pub fn elapsed_secs(now: u32, last_reset: u32, overflow_seen: bool) -> u32 {
    if overflow_seen {
        (u32::MAX - last_reset).saturating_add(now)
    } else {
        now.saturating_sub(last_reset)
    }
}

/// Tracks time since the bin was last emptied.
#[derive(Debug, Clone)]
pub struct CleanupTracker {
    last_reset_secs: u32,
    overflow_seen: bool,
    timeout_secs: u32,
    elapsed: u32,
    active: bool,
}

impl CleanupTracker {
    /// Baseline starts at `now_secs` (boot).
    pub fn new(timeout_secs: u32, now_secs: u32) -> Self {
        Self {
            last_reset_secs: now_secs,
            overflow_seen: false,
            timeout_secs,
            elapsed: 0,
            active: false,
        }
    }

    /// Restart the baseline.  Called when the bin transitions to `Empty`.
    pub fn reset(&mut self, now_secs: u32) {
        self.last_reset_secs = now_secs;
        self.overflow_seen = false;
        self.elapsed = 0;
    }

    /// Evaluate the alert for this cycle.  Returns `Some(active)` when the
    /// alert state flips.
    pub fn update(&mut self, status: BinStatus, now_secs: u32) -> Option<bool> {
        if now_secs < self.last_reset_secs {
            self.overflow_seen = true;
        }
        let elapsed = elapsed_secs(now_secs, self.last_reset_secs, self.overflow_seen);
        self.elapsed = elapsed;
        let active = status != BinStatus::Empty && elapsed >= self.timeout_secs;
        if active == self.active {
            return None;
        }
        self.active = active;
        if active {
            warn!("CLEANUP: bin {} for {}s, alert raised", status, elapsed);
        } else {
            info!("CLEANUP: alert cleared");
        }
        Some(active)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Elapsed seconds as of the last [`update`](Self::update).
    pub fn uncleaned_secs(&self) -> u32 {
        self.elapsed
    }

    pub fn last_reset_secs(&self) -> u32 {
        self.last_reset_secs
    }

    pub fn overflow_seen(&self) -> bool {
        self.overflow_seen
    }
}
