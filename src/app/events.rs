//! Outbound application events.
//!
//! The [`BinService`](super::service::BinService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, forward over the
//! Bluetooth link, etc.

use crate::control::lid::LidTrigger;
use crate::control::occupancy::BinStatus;

use super::commands::LidCommand;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial status).
    Started(BinStatus),

    /// The fill level changed.
    BinStatusChanged { from: BinStatus, to: BinStatus },

    /// The lid servo was driven open.
    LidOpened(LidTrigger),

    /// The lid servo was driven closed.
    LidClosed(LidTrigger),

    /// The hand withdrew; the lid will close at `at_ms`.
    LidCloseScheduled { at_ms: u32 },

    /// The cleanup alert was raised (`true`) or cleared (`false`).
    CleanupAlert(bool),

    /// The smoke alert was raised or cleared.
    SmokeAlert { active: bool, ppm: f32 },

    /// A manual override was applied.
    CommandApplied(LidCommand),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub status: BinStatus,
    pub lid_open: bool,
    /// Windowed distance (cm)
    pub distance_cm: u16,
    pub gas_ppm: f32,
    /// Seconds since the bin was last empty
    pub uncleaned_secs: u32,
    pub smoke_alert: bool,
    pub cleanup_alert: bool,
    /// Lid openings since boot (any trigger), wrapping
    pub lid_open_count: u8,
    /// Relative humidity (%) if the board has a climate sensor
    pub humidity_pct: Option<f32>,
    /// Temperature (°C) if the board has a climate sensor
    pub temperature_c: Option<f32>,
}
