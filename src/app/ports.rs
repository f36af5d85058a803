//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BinService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, display, clock, command link,
//! event sinks) implement these traits.  The
//! [`BinService`](super::service::BinService) consumes them via generics,
//! so the domain core never touches hardware directly.

use crate::control::alerts::IndicatorState;

use super::commands::LidCommand;
use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Both occupancy sensors, polarity-corrected: `true` = obstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccupancyReading {
    pub bottom: bool,
    pub top: bool,
}

/// Optional humidity/temperature module.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateReading {
    pub humidity_pct: f32,
    pub temperature_c: f32,
}

/// Read-side port: the domain calls this to obtain sensor data.
///
/// Reads never fail from the domain's point of view; adapters substitute
/// the last good value when the hardware misbehaves.
pub trait SensorPort {
    /// Sample both occupancy sensors.
    fn read_occupancy(&mut self) -> OccupancyReading;

    /// One ultrasonic range measurement in centimetres.
    fn read_distance_cm(&mut self) -> u16;

    /// One raw gas-sensor ADC count.
    fn read_gas_raw(&mut self) -> u16;

    /// Humidity and temperature, if the board carries the sensor.
    fn read_climate(&mut self) -> Option<ClimateReading> {
        None
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive the lid servo to `degrees` (0–180).
    fn set_lid_angle(&mut self, degrees: u8);

    /// Apply the arbitrated LED and buzzer levels.
    fn set_indicators(&mut self, state: IndicatorState);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Character display.  Coordinates are (column, row).
pub trait DisplayPort {
    fn clear(&mut self);

    fn draw_text(&mut self, x: u8, y: u8, text: &str);

    /// Draw `value` right-aligned and zero-padded to `width` digits.
    fn draw_number(&mut self, x: u8, y: u8, value: u32, width: u8);

    /// Publish everything drawn since the last `clear`.
    fn commit(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Calendar time from the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Monotonic time, plus an optional calendar.
pub trait ClockPort {
    /// Milliseconds since boot, wrapping.
    fn now_ms(&self) -> u32;

    /// Seconds since boot, wrapping.
    fn now_secs(&self) -> u32;

    /// Calendar time, `None` when no RTC is fitted or it was never set.
    fn wall_clock(&self) -> Option<WallClock> {
        None
    }
}

// ───────────────────────────────────────────────────────────────
// Command port (driving adapter: link → domain)
// ───────────────────────────────────────────────────────────────

/// Source of manual overrides.  Each command is yielded exactly once.
pub trait CommandPort {
    fn poll(&mut self) -> Option<LidCommand>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
