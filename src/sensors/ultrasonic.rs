//! HC-SR04 ultrasonic ranger above the lid.
//!
//! Distance is the echo pulse width divided by 58 (µs per cm of round
//! trip at room temperature).  A missing echo keeps the previous reading;
//! until the first good echo that is [`OUT_OF_RANGE_CM`], so a dead
//! sensor can never open the lid.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: times the echo pulse via hw_init.
//! On host/test: reads from a static `AtomicU16`; [`NO_ECHO`] simulates a
//! timeout.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use log::debug;

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::{drivers::hw_init, pins};

/// Reported until the first valid echo.
pub const OUT_OF_RANGE_CM: u16 = 400;
/// Echo round-trip time per centimetre.
pub const US_PER_CM: u32 = 58;

/// Sentinel for the simulated ranger: no echo.
pub const NO_ECHO: u16 = u16::MAX;

#[cfg(not(target_os = "espidf"))]
static SIM_DISTANCE_CM: AtomicU16 = AtomicU16::new(OUT_OF_RANGE_CM);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_distance_cm(cm: u16) {
    SIM_DISTANCE_CM.store(cm, Ordering::Relaxed);
}

/// Convert an echo width to centimetres.
pub fn echo_to_cm(echo_us: u32) -> u16 {
    u16::try_from(echo_us / US_PER_CM).unwrap_or(u16::MAX)
}

pub struct UltrasonicRanger {
    last_cm: u16,
    timeouts: u32,
}

impl Default for UltrasonicRanger {
    fn default() -> Self {
        Self::new()
    }
}

impl UltrasonicRanger {
    pub fn new() -> Self {
        Self {
            last_cm: OUT_OF_RANGE_CM,
            timeouts: 0,
        }
    }

    pub fn read_cm(&mut self) -> u16 {
        match self.measure() {
            Ok(cm) => self.last_cm = cm,
            Err(e) => {
                self.timeouts = self.timeouts.wrapping_add(1);
                debug!("ultrasonic: {}, keeping {}cm", e, self.last_cm);
            }
        }
        self.last_cm
    }

    /// Missed echoes since boot.
    pub fn timeouts(&self) -> u32 {
        self.timeouts
    }

    #[cfg(target_os = "espidf")]
    fn measure(&self) -> Result<u16, SensorError> {
        hw_init::ultrasonic_echo_us(pins::ULTRASONIC_TRIG_GPIO, pins::ULTRASONIC_ECHO_GPIO)
            .map(echo_to_cm)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure(&self) -> Result<u16, SensorError> {
        match SIM_DISTANCE_CM.load(Ordering::Relaxed) {
            NO_ECHO => Err(SensorError::EchoTimeout),
            cm => Ok(cm),
        }
    }
}
