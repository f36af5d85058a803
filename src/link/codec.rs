//! Wire formats.
//!
//! Inbound command frame (first four bytes of the 8-byte receive buffer):
//! ```text
//! ┌──────┬───────┬──────────┬──────┐
//! │ 0xA5 │ flags │ checksum │ 0x5A │   checksum == flags
//! └──────┴───────┴──────────┴──────┘
//! ```
//!
//! Outbound telemetry frame:
//! ```text
//! ┌──────┬───────┬────┬─────────────┬─────────────┬─────┬──────┐
//! │ 0xA5 │ count │ uv │ humi f32 LE │ temp f32 LE │ sum │ 0x5A │
//! └──────┴───────┴────┴─────────────┴─────────────┴─────┴──────┘
//!   0      1       2    3..7          7..11         11    12
//! ```
//! `sum` is the wrapping byte sum of offsets 1 through 10.
//!
//! Framing is always checked before the checksum.

use crate::app::commands::LidCommand;
use crate::error::FrameError;

pub const FRAME_HEADER: u8 = 0xA5;
pub const FRAME_FOOTER: u8 = 0x5A;

/// Meaningful prefix of the command receive buffer.
pub const COMMAND_FRAME_LEN: usize = 4;
pub const TELEMETRY_FRAME_LEN: usize = 13;

/// Flag bit requesting the lid open.
pub const FLAG_OPEN: u8 = 0x01;
/// Flag bit requesting the lid closed.
pub const FLAG_CLOSE: u8 = 0x02;

/// Voice module byte for "open the lid".
pub const VOICE_OPEN: u8 = 0x01;
/// Voice module byte for "close the lid".
pub const VOICE_CLOSE: u8 = 0x02;

// ── Command frame ─────────────────────────────────────────────

/// A validated inbound command frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    pub flags: u8,
}

impl CommandFrame {
    /// The lid command the flags request.  Contradictory (both bits) or
    /// empty flags request nothing.
    pub fn command(&self) -> Option<LidCommand> {
        match (self.flags & FLAG_OPEN != 0, self.flags & FLAG_CLOSE != 0) {
            (true, false) => Some(LidCommand::Open),
            (false, true) => Some(LidCommand::Close),
            _ => None,
        }
    }
}

/// Validate a received buffer.  Bytes past the first four are ignored.
pub fn decode_command_frame(buf: &[u8]) -> Result<CommandFrame, FrameError> {
    let [header, flags, checksum, footer, ..] = *buf else {
        return Err(FrameError::Framing);
    };
    if header != FRAME_HEADER || footer != FRAME_FOOTER {
        return Err(FrameError::Framing);
    }
    if checksum != flags {
        return Err(FrameError::Checksum);
    }
    Ok(CommandFrame { flags })
}

pub fn encode_command_frame(flags: u8) -> [u8; COMMAND_FRAME_LEN] {
    [FRAME_HEADER, flags, flags, FRAME_FOOTER]
}

/// Map a voice-module byte to a command.
pub fn decode_voice_byte(byte: u8) -> Option<LidCommand> {
    match byte {
        VOICE_OPEN => Some(LidCommand::Open),
        VOICE_CLOSE => Some(LidCommand::Close),
        _ => None,
    }
}

// ── Telemetry frame ───────────────────────────────────────────

/// Outbound sensor report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFrame {
    pub count: u8,
    pub uv_level: u8,
    pub humidity: f32,
    pub temperature: f32,
}

fn byte_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

impl TelemetryFrame {
    pub fn encode(&self) -> [u8; TELEMETRY_FRAME_LEN] {
        let mut out = [0u8; TELEMETRY_FRAME_LEN];
        out[0] = FRAME_HEADER;
        out[1] = self.count;
        out[2] = self.uv_level;
        out[3..7].copy_from_slice(&self.humidity.to_le_bytes());
        out[7..11].copy_from_slice(&self.temperature.to_le_bytes());
        out[11] = byte_sum(&out[1..11]);
        out[12] = FRAME_FOOTER;
        out
    }
}

pub fn decode_telemetry_frame(buf: &[u8]) -> Result<TelemetryFrame, FrameError> {
    let frame: &[u8; TELEMETRY_FRAME_LEN] = buf.try_into().map_err(|_| FrameError::Framing)?;
    if frame[0] != FRAME_HEADER || frame[12] != FRAME_FOOTER {
        return Err(FrameError::Framing);
    }
    if byte_sum(&frame[1..11]) != frame[11] {
        return Err(FrameError::Checksum);
    }
    Ok(TelemetryFrame {
        count: frame[1],
        uv_level: frame[2],
        humidity: f32::from_le_bytes([frame[3], frame[4], frame[5], frame[6]]),
        temperature: f32::from_le_bytes([frame[7], frame[8], frame[9], frame[10]]),
    })
}
