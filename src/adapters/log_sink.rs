//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! The Bluetooth telemetry frame is sent separately by the command
//! channel.

use log::{info, warn};

use crate::app::commands::LidCommand;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::lid::LidTrigger;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn trigger_label(trigger: LidTrigger) -> &'static str {
    match trigger {
        LidTrigger::Proximity => "proximity",
        LidTrigger::AutoClose => "auto-close",
        LidTrigger::Command => "command",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | bin={} lid={} | D={}cm | gas={:.1}ppm | uncleaned={}s | \
                     smoke={} cleanup={} | opens={}",
                    t.status,
                    if t.lid_open { "OPEN" } else { "CLOSED" },
                    t.distance_cm,
                    t.gas_ppm,
                    t.uncleaned_secs,
                    t.smoke_alert,
                    t.cleanup_alert,
                    t.lid_open_count,
                );
            }
            AppEvent::Started(status) => {
                info!("START | initial_status={}", status);
            }
            AppEvent::BinStatusChanged { from, to } => {
                info!("STATUS | {} -> {}", from, to);
            }
            AppEvent::LidOpened(trigger) => {
                info!("LID | open ({})", trigger_label(*trigger));
            }
            AppEvent::LidClosed(trigger) => {
                info!("LID | close ({})", trigger_label(*trigger));
            }
            AppEvent::LidCloseScheduled { at_ms } => {
                info!("LID | close scheduled at {}ms", at_ms);
            }
            AppEvent::CleanupAlert(true) => warn!("ALERT | cleanup timeout"),
            AppEvent::CleanupAlert(false) => info!("ALERT | cleanup cleared"),
            AppEvent::SmokeAlert { active: true, ppm } => {
                warn!("ALERT | smoke {:.1}ppm", ppm);
            }
            AppEvent::SmokeAlert { active: false, ppm } => {
                info!("ALERT | smoke cleared at {:.1}ppm", ppm);
            }
            AppEvent::CommandApplied(cmd) => {
                let name = match cmd {
                    LidCommand::Open => "open",
                    LidCommand::Close => "close",
                };
                info!("CMD | {}", name);
            }
        }
    }
}
