//! Inbound commands to the application service.
//!
//! These are manual overrides decoded by the command channel (voice module
//! or Bluetooth) that [`BinService`](super::service::BinService) applies at
//! the end of a poll cycle.

/// Manual lid override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidCommand {
    /// Force the lid open, bypassing the proximity filter.
    Open,
    /// Force the lid closed and discard any proximity debounce progress.
    Close,
}
