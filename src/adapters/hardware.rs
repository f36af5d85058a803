//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`], [`ActuatorPort`] and [`DelayNs`].  This is the
//! only module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ActuatorPort, OccupancyReading, SensorPort};
use crate::control::alerts::IndicatorState;
use crate::drivers::indicators::Indicators;
use crate::drivers::servo::ServoDriver;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    servo: ServoDriver,
    indicators: Indicators,
    #[cfg(target_os = "espidf")]
    delay: esp_idf_hal::delay::Delay,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, servo: ServoDriver, indicators: Indicators) -> Self {
        Self {
            sensor_hub,
            servo,
            indicators,
            #[cfg(target_os = "espidf")]
            delay: esp_idf_hal::delay::Delay::new_default(),
        }
    }

    /// Last commanded lid angle.
    pub fn lid_angle(&self) -> Option<u8> {
        self.servo.angle()
    }

    pub fn indicators(&self) -> IndicatorState {
        self.indicators.current()
    }

    pub fn sensors(&self) -> &SensorHub {
        &self.sensor_hub
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_occupancy(&mut self) -> OccupancyReading {
        self.sensor_hub.read_occupancy()
    }

    fn read_distance_cm(&mut self) -> u16 {
        self.sensor_hub.read_distance_cm()
    }

    fn read_gas_raw(&mut self) -> u16 {
        self.sensor_hub.read_gas_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_lid_angle(&mut self, degrees: u8) {
        self.servo.set_angle(degrees);
    }

    fn set_indicators(&mut self, state: IndicatorState) {
        self.indicators.apply(state);
    }
}

// ── Delay ─────────────────────────────────────────────────────

impl DelayNs for HardwareAdapter {
    #[cfg(target_os = "espidf")]
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    /// The host simulation does not need real sample spacing.
    #[cfg(not(target_os = "espidf"))]
    fn delay_ns(&mut self, _ns: u32) {}
}
