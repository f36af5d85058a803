//! Lid servo driver (SG90-class hobby servo).
//!
//! Position is encoded as a 500–2500 µs pulse in a 20 ms frame:
//! `pulse = 500 + angle / 180 * 2000`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty for the servo channel via hw_init.
//! On host/test: tracks the commanded angle in-memory only.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

pub const MIN_PULSE_US: u32 = 500;
pub const MAX_PULSE_US: u32 = 2500;
pub const MAX_ANGLE_DEG: u8 = 180;
const PERIOD_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;

/// Pulse width for `angle` (clamped to 0–180°).
pub fn pulse_width_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(MAX_ANGLE_DEG));
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE_DEG)
}

/// LEDC duty count for `angle` at the configured timer resolution.
pub fn duty_for_angle(angle: u8) -> u32 {
    pulse_width_us(angle) * (1 << pins::SERVO_PWM_RESOLUTION_BITS) / PERIOD_US
}

pub struct ServoDriver {
    channel: u32,
    angle: Option<u8>,
}

impl ServoDriver {
    pub fn new(channel: u32) -> Self {
        Self { channel, angle: None }
    }

    pub fn set_angle(&mut self, degrees: u8) {
        let degrees = degrees.min(MAX_ANGLE_DEG);
        hw_init::ledc_set(self.channel, duty_for_angle(degrees));
        self.angle = Some(degrees);
        debug!("servo: {}° ({} µs)", degrees, pulse_width_us(degrees));
    }

    /// Last commanded angle, `None` before the first command.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
