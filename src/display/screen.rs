//! Status screen layout.
//!
//! ```text
//!   col 0123456789012345
//! row 0 BIN:SOME
//! row 1 T 02:37 CLEAN!
//! row 2 D042cm G0087
//! row 3 05-14 09:41:07
//! ```

use core::fmt::Write;

use heapless::String;

use crate::app::ports::{DisplayPort, WallClock};
use crate::control::alerts::AlertState;
use crate::control::occupancy::BinStatus;

/// Everything the screen shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenModel {
    pub status: BinStatus,
    pub uncleaned_secs: u32,
    pub alerts: AlertState,
    pub distance_cm: u16,
    pub gas_ppm: f32,
    pub wall_clock: Option<WallClock>,
}

/// `MM:SS` with both fields zero-padded to two digits.  Minutes are not
/// wrapped at 60, so very long intervals widen the field.
pub fn format_mmss(elapsed_secs: u32) -> String<12> {
    let mut out = String::new();
    // 10 minute digits + ':' + 2 second digits always fits.
    let _ = write!(out, "{:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60);
    out
}

/// Short alert banner, smoke first.
pub fn alert_banner(alerts: AlertState) -> Option<&'static str> {
    if alerts.smoke_active {
        Some("SMOKE!")
    } else if alerts.cleanup_timeout_active {
        Some("CLEAN!")
    } else {
        None
    }
}

/// Paints [`ScreenModel`]s onto a [`DisplayPort`].
pub struct StatusScreen;

impl StatusScreen {
    pub fn render(display: &mut impl DisplayPort, model: &ScreenModel) {
        display.clear();

        display.draw_text(0, 0, "BIN:");
        display.draw_text(4, 0, model.status.label());

        display.draw_text(0, 1, "T ");
        let mmss = format_mmss(model.uncleaned_secs);
        display.draw_text(2, 1, &mmss);
        if let Some(banner) = alert_banner(model.alerts) {
            display.draw_text(3 + mmss.len() as u8, 1, banner);
        }

        display.draw_text(0, 2, "D");
        display.draw_number(1, 2, u32::from(model.distance_cm), 3);
        display.draw_text(4, 2, "cm G");
        display.draw_number(8, 2, model.gas_ppm.max(0.0) as u32, 4);

        if let Some(wc) = model.wall_clock {
            display.draw_number(0, 3, u32::from(wc.month), 2);
            display.draw_text(2, 3, "-");
            display.draw_number(3, 3, u32::from(wc.day), 2);
            display.draw_number(6, 3, u32::from(wc.hour), 2);
            display.draw_text(8, 3, ":");
            display.draw_number(9, 3, u32::from(wc.minute), 2);
            display.draw_text(11, 3, ":");
            display.draw_number(12, 3, u32::from(wc.second), 2);
        }

        display.commit();
    }
}
