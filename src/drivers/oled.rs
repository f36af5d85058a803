//! 128×64 OLED used as a 16×4 character display.
//!
//! Text is composed into a back buffer and published to the front buffer
//! on [`commit`](DisplayPort::commit).  Only printable ASCII is stored;
//! anything else becomes `?`.  Writes past the right or bottom edge are
//! clipped.
//!
//! Each committed frame is logged at `debug` and kept for inspection via
//! [`Oled::row`].  Glyph rasterisation and the I²C page transfer to the
//! panel live outside this crate.

use core::fmt::Write;

use heapless::String;
use log::debug;

use crate::app::ports::DisplayPort;

pub const COLS: usize = 16;
pub const ROWS: usize = 4;

type Frame = [[u8; COLS]; ROWS];

const BLANK: Frame = [[b' '; COLS]; ROWS];

pub struct Oled {
    back: Frame,
    front: Frame,
    commits: u32,
}

impl Default for Oled {
    fn default() -> Self {
        Self::new()
    }
}

impl Oled {
    pub const fn new() -> Self {
        Self {
            back: BLANK,
            front: BLANK,
            commits: 0,
        }
    }

    /// Committed text of row `y`, padded with spaces.
    pub fn row(&self, y: usize) -> &str {
        self.front
            .get(y)
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }

    /// Frames published since boot.
    pub fn commits(&self) -> u32 {
        self.commits
    }
}

impl DisplayPort for Oled {
    fn clear(&mut self) {
        self.back = BLANK;
    }

    fn draw_text(&mut self, x: u8, y: u8, text: &str) {
        let Some(row) = self.back.get_mut(usize::from(y)) else {
            return;
        };
        let start = usize::from(x);
        for (cell, ch) in row.iter_mut().skip(start).zip(text.bytes()) {
            *cell = if ch.is_ascii_graphic() || ch == b' ' { ch } else { b'?' };
        }
    }

    fn draw_number(&mut self, x: u8, y: u8, value: u32, width: u8) {
        let mut digits: String<10> = String::new();
        // u32::MAX has 10 digits.
        let _ = write!(digits, "{value}");
        let pad = usize::from(width).saturating_sub(digits.len());
        let mut cursor = x;
        for _ in 0..pad {
            self.draw_text(cursor, y, "0");
            cursor = cursor.saturating_add(1);
        }
        self.draw_text(cursor, y, &digits);
    }

    fn commit(&mut self) {
        self.front = self.back;
        self.commits = self.commits.wrapping_add(1);
        debug!(
            "oled: frame {} |{}|{}|{}|{}|",
            self.commits,
            self.row(0),
            self.row(1),
            self.row(2),
            self.row(3)
        );
    }
}
