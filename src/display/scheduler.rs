//! Dirty-flag redraw gating.
//!
//! The display is only redrawn on cycles where something visible changed
//! or a new second began (so the `MM:SS` readout stays live).  At a 10 ms
//! poll cadence that is roughly one redraw per hundred cycles.

/// Redraw bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayScheduler {
    dirty: bool,
    last_rendered_second: u32,
}

impl Default for DisplayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayScheduler {
    /// Starts dirty so the first cycle paints a frame.
    pub const fn new() -> Self {
        Self {
            dirty: true,
            last_rendered_second: 0,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark dirty if `now_secs` differs from the second last rendered.
    pub fn observe_second(&mut self, now_secs: u32) {
        if now_secs != self.last_rendered_second {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a completed redraw.
    pub fn rendered(&mut self, now_secs: u32) {
        self.dirty = false;
        self.last_rendered_second = now_secs;
    }

    pub fn last_rendered_second(&self) -> u32 {
        self.last_rendered_second
    }
}
