//! Alert arbitration: fuse alert flags and bin status into indicator
//! outputs.
//!
//! Priority, first match wins:
//!
//! | condition          | green | yellow | red | buzzer |
//! |--------------------|-------|--------|-----|--------|
//! | smoke              |  off  |  off   | on  |   on   |
//! | cleanup timeout    |  off  |  off   | on  |   on   |
//! | status `Empty`     |  on   |  off   | off |  off   |
//! | status `Some`      |  off  |  on    | off |  off   |
//! | status `Full`      |  off  |  off   | on  |   on   |

use super::occupancy::BinStatus;

/// Alert flags recomputed every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertState {
    pub smoke_active: bool,
    pub cleanup_timeout_active: bool,
}

impl AlertState {
    pub fn any(&self) -> bool {
        self.smoke_active || self.cleanup_timeout_active
    }
}

/// Desired LED and buzzer levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorState {
    pub green: bool,
    pub yellow: bool,
    pub red: bool,
    pub buzzer: bool,
}

impl IndicatorState {
    pub const ALARM: Self = Self {
        green: false,
        yellow: false,
        red: true,
        buzzer: true,
    };
    pub const EMPTY: Self = Self {
        green: true,
        yellow: false,
        red: false,
        buzzer: false,
    };
    pub const PARTIAL: Self = Self {
        green: false,
        yellow: true,
        red: false,
        buzzer: false,
    };
}

/// Resolve the indicator outputs.  Pure and total.
pub const fn resolve(alerts: AlertState, status: BinStatus) -> IndicatorState {
    if alerts.smoke_active || alerts.cleanup_timeout_active {
        return IndicatorState::ALARM;
    }
    match status {
        BinStatus::Empty => IndicatorState::EMPTY,
        BinStatus::Some => IndicatorState::PARTIAL,
        BinStatus::Full => IndicatorState::ALARM,
    }
}
