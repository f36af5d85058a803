//! Clock adapter.
//!
//! Monotonic time comes from the counters maintained by the 1 ms timer
//! callback in [`isr`](crate::isr); calendar time from the ESP-IDF system
//! clock when it has been set.
//!
//! - **`target_os = "espidf"`**: `gettimeofday` + `localtime_r`.
//! - **`not(target_os = "espidf")`**: no calendar; the counters are
//!   advanced by the simulation helpers.

use crate::app::ports::{ClockPort, WallClock};
use crate::isr;

/// [`ClockPort`] backed by the ISR-maintained counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsrClock;

impl IsrClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for IsrClock {
    fn now_ms(&self) -> u32 {
        isr::millis()
    }

    fn now_secs(&self) -> u32 {
        isr::seconds()
    }

    #[cfg(target_os = "espidf")]
    fn wall_clock(&self) -> Option<WallClock> {
        use core::ptr;
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: `tv` is a valid out-pointer; a null timezone is allowed.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            return None;
        }
        // Reject obviously unset time (before 2020-01-01)
        const EPOCH_2020: i64 = 1_577_836_800;
        if i64::from(tv.tv_sec) < EPOCH_2020 {
            return None;
        }
        let secs = tv.tv_sec as esp_idf_svc::sys::time_t;
        // SAFETY: `tm` is plain old data; zero is a valid bit pattern.
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        // SAFETY: both pointers are valid for the duration of the call.
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            return None;
        }
        Some(WallClock {
            year: u16::try_from(tm.tm_year + 1900).ok()?,
            month: u8::try_from(tm.tm_mon + 1).ok()?,
            day: u8::try_from(tm.tm_mday).ok()?,
            hour: u8::try_from(tm.tm_hour).ok()?,
            minute: u8::try_from(tm.tm_min).ok()?,
            second: u8::try_from(tm.tm_sec).ok()?,
        })
    }

    /// No RTC in simulation.
    #[cfg(not(target_os = "espidf"))]
    fn wall_clock(&self) -> Option<WallClock> {
        None
    }
}
