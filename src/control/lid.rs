//! Proximity-driven lid actuation.
//!
//! ```text
//!  raw cm ──▶ DistanceWindow (N=5, truncating mean)
//!                  │
//!          mean < threshold? ──yes──▶ TriggerCounter += 1 (saturating)
//!                  │                       │
//!                  no                 reached? ──▶ OPEN, cancel pending close
//!                  │
//!   counter had reached? && nothing pending ──▶ schedule close at now + delay
//!   counter = 0
//!
//!   pending close && now ≥ deadline ──▶ CLOSE
//! ```
//!
//! The window smooths single-sample echo noise, the counter demands a
//! sustained approach before opening, and the delayed close keeps the lid
//! from slamming the moment a hand withdraws.
//!
//! All deadlines are compared with wrapping arithmetic so the 49-day
//! rollover of the millisecond counter cannot stall or trigger a close.

use log::{debug, info};

use crate::app::commands::LidCommand;
use crate::config::SystemConfig;

/// Number of raw samples in the sliding window.
pub const WINDOW_LEN: usize = 5;

// ---------------------------------------------------------------------------
// DistanceWindow
// ---------------------------------------------------------------------------

/// Fixed-capacity circular buffer of the most recent distance samples.
///
/// Always holds exactly [`WINDOW_LEN`] entries; unwritten slots are zero
/// from boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceWindow {
    samples: [u16; WINDOW_LEN],
    cursor: usize,
}

impl Default for DistanceWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceWindow {
    pub const fn new() -> Self {
        Self {
            samples: [0; WINDOW_LEN],
            cursor: 0,
        }
    }

    /// Overwrite the oldest sample.
    pub fn push(&mut self, sample: u16) {
        self.samples[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % WINDOW_LEN;
    }

    /// Integer mean of the window, truncated toward zero.
    pub fn mean(&self) -> u16 {
        let sum: u32 = self.samples.iter().map(|&s| u32::from(s)).sum();
        (sum / WINDOW_LEN as u32) as u16
    }

    pub fn samples(&self) -> &[u16; WINDOW_LEN] {
        &self.samples
    }
}

// ---------------------------------------------------------------------------
// TriggerCounter
// ---------------------------------------------------------------------------

/// Consecutive below-threshold evaluations, clamped to `[0, threshold]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerCounter {
    count: u8,
    threshold: u8,
}

impl TriggerCounter {
    pub const fn new(threshold: u8) -> Self {
        Self { count: 0, threshold }
    }

    pub fn increment(&mut self) {
        if self.count < self.threshold {
            self.count += 1;
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn reached(&self) -> bool {
        self.count >= self.threshold
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

// ---------------------------------------------------------------------------
// Lid state and actions
// ---------------------------------------------------------------------------

/// What the servo is (or should be) doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LidState {
    pub is_open: bool,
    /// Millisecond timestamp at which the lid will close, if armed.
    pub scheduled_close_ms: Option<u32>,
}

/// Why the lid moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidTrigger {
    /// Sustained proximity below the open threshold.
    Proximity,
    /// The delayed close fired.
    AutoClose,
    /// A manual override from the command channel.
    Command,
}

/// A servo command produced by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidAction {
    Open(LidTrigger),
    Close(LidTrigger),
}

/// Result of one [`LidController::update`] evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LidUpdate {
    /// Window mean used for this decision (cm).
    pub filtered_cm: u16,
    /// Servo command to apply, if the lid changes position.
    pub action: Option<LidAction>,
    /// Set when a close was armed during this evaluation.
    pub close_scheduled_at: Option<u32>,
}

/// `true` once `now` is at or past `deadline`, tolerant of counter wrap.
///
/// Valid as long as the two timestamps are less than ~24.8 days apart.
pub fn deadline_reached(now_ms: u32, deadline_ms: u32) -> bool {
    now_ms.wrapping_sub(deadline_ms) <= u32::MAX / 2
}

// ---------------------------------------------------------------------------
// LidController
// ---------------------------------------------------------------------------

/// Debounced, hysteretic lid controller.
#[derive(Debug, Clone)]
pub struct LidController {
    window: DistanceWindow,
    trigger: TriggerCounter,
    state: LidState,
    threshold_cm: u16,
    close_delay_ms: u32,
}

impl LidController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            window: DistanceWindow::new(),
            trigger: TriggerCounter::new(config.trigger_threshold),
            state: LidState::default(),
            threshold_cm: config.open_distance_threshold_cm,
            close_delay_ms: config.close_delay_ms,
        }
    }

    /// Feed one raw distance sample taken at `now_ms`.
    pub fn update(&mut self, raw_cm: u16, now_ms: u32) -> LidUpdate {
        self.window.push(raw_cm);
        let filtered_cm = self.window.mean();
        let mut action = None;
        let mut close_scheduled_at = None;

        if filtered_cm < self.threshold_cm {
            self.trigger.increment();
            if self.trigger.reached() {
                if self.state.scheduled_close_ms.take().is_some() {
                    debug!("LID: approach during close delay, close cancelled");
                }
                if !self.state.is_open {
                    self.state.is_open = true;
                    info!("LID: open (proximity, mean={}cm)", filtered_cm);
                    action = Some(LidAction::Open(LidTrigger::Proximity));
                }
            }
        } else {
            if self.trigger.reached() && self.state.scheduled_close_ms.is_none() {
                let deadline = now_ms.wrapping_add(self.close_delay_ms);
                self.state.scheduled_close_ms = Some(deadline);
                close_scheduled_at = Some(deadline);
                debug!("LID: close scheduled at {}ms", deadline);
            }
            self.trigger.reset();
        }

        if let Some(deadline) = self.state.scheduled_close_ms {
            if deadline_reached(now_ms, deadline) {
                self.state.scheduled_close_ms = None;
                self.state.is_open = false;
                info!("LID: close (delay elapsed)");
                action = Some(LidAction::Close(LidTrigger::AutoClose));
            }
        }

        LidUpdate {
            filtered_cm,
            action,
            close_scheduled_at,
        }
    }

    /// Apply a manual override.  Always yields a servo command so the lid
    /// is re-driven even if the controller already believes it is there.
    pub fn apply_command(&mut self, cmd: LidCommand) -> LidAction {
        self.state.scheduled_close_ms = None;
        match cmd {
            LidCommand::Open => {
                self.state.is_open = true;
                info!("LID: open (command)");
                LidAction::Open(LidTrigger::Command)
            }
            LidCommand::Close => {
                self.state.is_open = false;
                // A hand still in front of the sensor must re-qualify.
                self.trigger.reset();
                info!("LID: close (command)");
                LidAction::Close(LidTrigger::Command)
            }
        }
    }

    pub fn state(&self) -> LidState {
        self.state
    }

    pub fn trigger_count(&self) -> u8 {
        self.trigger.count()
    }

    pub fn window(&self) -> &DistanceWindow {
        &self.window
    }

    pub fn filtered_cm(&self) -> u16 {
        self.window.mean()
    }
}
