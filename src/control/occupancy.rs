//! Bin fill-level classification from the two IR occupancy sensors.
//!
//! ```text
//!   ┌──────────┐
//!   │  top  ●──┼── obstructed only when the bin is full
//!   │          │
//!   │ bottom ●─┼── obstructed as soon as anything is inside
//!   └──────────┘
//! ```
//!
//! | bottom       | top          | status  |
//! |--------------|--------------|---------|
//! | unobstructed | unobstructed | `Empty` |
//! | obstructed   | unobstructed | `Some`  |
//! | unobstructed | obstructed   | `Some`  |
//! | obstructed   | obstructed   | `Full`  |
//!
//! Inputs are already polarity-corrected: `true` always means "fill
//! material present at this sensor's height".

use core::fmt;

use serde::{Deserialize, Serialize};

/// How full the bin is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BinStatus {
    #[default]
    Empty,
    Some,
    Full,
}

impl BinStatus {
    /// Short upper-case label used on the display and in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Some => "SOME",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map the two obstruction readings to a fill level.
pub const fn classify(bottom: bool, top: bool) -> BinStatus {
    match (bottom, top) {
        (false, false) => BinStatus::Empty,
        (true, false) | (false, true) => BinStatus::Some,
        (true, true) => BinStatus::Full,
    }
}

/// A change of fill level reported by [`OccupancyClassifier::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: BinStatus,
    pub to: BinStatus,
}

impl StatusChange {
    /// The bin was just emptied; the cleanup baseline must restart.
    pub fn became_empty(&self) -> bool {
        self.to == BinStatus::Empty
    }
}

/// Tracks the current fill level and reports transitions.
#[derive(Debug, Default)]
pub struct OccupancyClassifier {
    status: BinStatus,
}

impl OccupancyClassifier {
    /// Start at `Empty`, the boot state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify this cycle's readings.  Returns `Some` only when the
    /// fill level differs from the previous cycle.
    pub fn update(&mut self, bottom: bool, top: bool) -> Option<StatusChange> {
        let next = classify(bottom, top);
        if next == self.status {
            return None;
        }
        let change = StatusChange { from: self.status, to: next };
        self.status = next;
        Some(change)
    }

    pub fn status(&self) -> BinStatus {
        self.status
    }
}
