//! Interrupt-maintained monotonic clock.
//!
//! ```text
//! ┌────────────────┐  store   ┌──────────────┐  load   ┌────────────┐
//! │ 1 ms timer cb  │────────▶│ MILLIS/SECONDS│───────▶│ main loop  │
//! │ (only writer)  │          │  AtomicU32    │         │ (readers)  │
//! └────────────────┘          └──────────────┘         └────────────┘
//! ```
//!
//! Each cell is a single machine word: the writer does a plain
//! load/store pair (never contended, it is the only writer) and readers
//! only ever load.  No locks, no read-modify-write on the reader side.

use core::sync::atomic::{AtomicU32, Ordering};

/// A word-sized counter with exactly one writer.
pub struct IsrCounter(AtomicU32);

impl IsrCounter {
    pub const fn new(initial: u32) -> Self {
        Self(AtomicU32::new(initial))
    }

    /// Reader side.
    #[inline]
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }

    /// Writer side: advance by one, wrapping at `u32::MAX`.  Returns the
    /// new value.  Must only be called from the owning interrupt.
    #[inline]
    pub fn bump(&self) -> u32 {
        let next = self.0.load(Ordering::Relaxed).wrapping_add(1);
        self.0.store(next, Ordering::Release);
        next
    }

    /// Writer side: overwrite the value.
    #[inline]
    pub fn set(&self, value: u32) {
        self.0.store(value, Ordering::Release);
    }
}

static MILLIS: IsrCounter = IsrCounter::new(0);
static SECONDS: IsrCounter = IsrCounter::new(0);
/// Milliseconds into the current second, owned by the timer callback.
static SUB_SECOND: IsrCounter = IsrCounter::new(0);

/// Timer callback body, called once per millisecond.
pub fn tick_millisecond() {
    MILLIS.bump();
    if SUB_SECOND.bump() >= 1000 {
        SUB_SECOND.set(0);
        SECONDS.bump();
    }
}

/// Milliseconds since boot, wrapping every ~49.7 days.
pub fn millis() -> u32 {
    MILLIS.get()
}

/// Seconds since boot, wrapping.
pub fn seconds() -> u32 {
    SECONDS.get()
}

/// Advance the simulated clock by `ms` timer ticks.
#[cfg(not(target_os = "espidf"))]
pub fn sim_advance_ms(ms: u32) {
    for _ in 0..ms {
        tick_millisecond();
    }
}

/// Jump the simulated clock to an absolute value (e.g. just before a wrap).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_clock(millis: u32, seconds: u32) {
    MILLIS.set(millis);
    SECONDS.set(seconds);
    SUB_SECOND.set(0);
}
