//! System configuration parameters
//!
//! All tunable parameters for the SmartBin controller.  There is no
//! persistent store: the firmware boots with [`SystemConfig::default()`]
//! and every timer restarts relative to "now".

use serde::{Deserialize, Serialize};

use crate::control::smoke::GasCalibration;
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Blocking delay between poll cycles (milliseconds)
    pub poll_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,

    // --- Lid ---
    /// Filtered distance (cm) below which a hand counts as "present"
    pub open_distance_threshold_cm: u16,
    /// Consecutive below-threshold evaluations required before opening
    pub trigger_threshold: u8,
    /// Delay between the hand leaving and the lid closing (milliseconds)
    pub close_delay_ms: u32,
    /// Servo angle for an open lid (degrees)
    pub lid_open_angle_deg: u8,
    /// Servo angle for a closed lid (degrees)
    pub lid_closed_angle_deg: u8,

    // --- Occupancy ---
    /// `true` if the IR occupancy modules pull their output LOW when obstructed
    pub occupancy_active_low: bool,

    // --- Cleanup ---
    /// Seconds a non-empty bin may go uncleaned before the alert fires
    pub cleanup_timeout_secs: u32,

    // --- Gas ---
    /// Concentration (ppm) at or above which the smoke alert fires
    pub smoke_threshold_ppm: f32,
    /// Number of ADC samples averaged per evaluation
    pub gas_samples: u8,
    /// Delay between consecutive ADC samples (milliseconds)
    pub gas_sample_delay_ms: u32,
    /// MQ-2 conversion constants
    pub gas: GasCalibration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            poll_interval_ms: 10,       // 100 Hz
            telemetry_interval_secs: 5,

            // Lid
            open_distance_threshold_cm: 25,
            trigger_threshold: 3,
            close_delay_ms: 2000,
            lid_open_angle_deg: 90,
            lid_closed_angle_deg: 0,

            // Occupancy
            occupancy_active_low: false,

            // Cleanup
            cleanup_timeout_secs: 180, // 3 min

            // Gas
            smoke_threshold_ppm: 100.0,
            gas_samples: 10,
            gas_sample_delay_ms: 5,
            gas: GasCalibration::default(),
        }
    }
}

impl SystemConfig {
    /// Reject values the control core cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be > 0"));
        }
        if self.trigger_threshold == 0 {
            return Err(Error::Config("trigger_threshold must be > 0"));
        }
        if self.lid_open_angle_deg > 180 || self.lid_closed_angle_deg > 180 {
            return Err(Error::Config("lid angles must be within 0..=180"));
        }
        if self.cleanup_timeout_secs == 0 {
            return Err(Error::Config("cleanup_timeout_secs must be > 0"));
        }
        if self.gas_samples == 0 {
            return Err(Error::Config("gas_samples must be > 0"));
        }
        if self.smoke_threshold_ppm.is_nan() || self.smoke_threshold_ppm <= 0.0 {
            return Err(Error::Config("smoke_threshold_ppm must be positive"));
        }
        self.gas.validate()
    }
}
