//! IR obstacle modules at the bottom and rim of the bin.
//!
//! Each module drives a digital output that changes level when its beam
//! is blocked.  Module batches differ in polarity, so the raw level is
//! corrected here and the rest of the firmware only sees "obstructed".
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: reads raw levels from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::OccupancyReading;

#[cfg(target_os = "espidf")]
use crate::{drivers::hw_init, pins};

#[cfg(not(target_os = "espidf"))]
static SIM_BOTTOM_LEVEL: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_TOP_LEVEL: AtomicBool = AtomicBool::new(false);

/// Inject raw pin levels (`true` = HIGH).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_levels(bottom_high: bool, top_high: bool) {
    SIM_BOTTOM_LEVEL.store(bottom_high, Ordering::Relaxed);
    SIM_TOP_LEVEL.store(top_high, Ordering::Relaxed);
}

pub struct OccupancySensors {
    active_low: bool,
    last: OccupancyReading,
}

impl OccupancySensors {
    /// `active_low`: the modules pull their output LOW when obstructed.
    pub fn new(active_low: bool) -> Self {
        Self {
            active_low,
            last: OccupancyReading::default(),
        }
    }

    pub fn read(&mut self) -> OccupancyReading {
        let (bottom, top) = self.read_levels();
        self.last = OccupancyReading {
            bottom: bottom != self.active_low,
            top: top != self.active_low,
        };
        self.last
    }

    pub fn last(&self) -> OccupancyReading {
        self.last
    }

    #[cfg(target_os = "espidf")]
    fn read_levels(&self) -> (bool, bool) {
        (
            hw_init::gpio_read(pins::OCCUPANCY_BOTTOM_GPIO),
            hw_init::gpio_read(pins::OCCUPANCY_TOP_GPIO),
        )
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_levels(&self) -> (bool, bool) {
        (
            SIM_BOTTOM_LEVEL.load(Ordering::Relaxed),
            SIM_TOP_LEVEL.load(Ordering::Relaxed),
        )
    }
}
