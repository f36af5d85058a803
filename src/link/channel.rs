//! Command channel: turns raw UART bytes into at most one pending
//! [`LidCommand`] and sends telemetry back over Bluetooth.

use log::{debug, warn};

use crate::app::commands::LidCommand;
use crate::app::events::TelemetryData;
use crate::app::ports::CommandPort;

use super::assembler::FrameAssembler;
use super::codec::{decode_command_frame, decode_voice_byte, TelemetryFrame};

/// Non-blocking byte-oriented serial port.
pub trait SerialPort {
    /// Next received byte, or `None` if nothing is buffered.
    fn read_byte(&mut self) -> Option<u8>;

    /// Queue `data` for transmission.
    fn write_all(&mut self, data: &[u8]);
}

/// Single-slot command mailbox fed by the voice and Bluetooth ports.
///
/// A newer command replaces an unconsumed older one; [`poll`](CommandPort::poll)
/// yields each command exactly once.
pub struct CommandChannel<V, B> {
    voice: V,
    bluetooth: B,
    assembler: FrameAssembler,
    pending: Option<LidCommand>,
    frames_rejected: u32,
}

impl<V: SerialPort, B: SerialPort> CommandChannel<V, B> {
    pub fn new(voice: V, bluetooth: B) -> Self {
        Self {
            voice,
            bluetooth,
            assembler: FrameAssembler::new(),
            pending: None,
            frames_rejected: 0,
        }
    }

    /// Drain both ports, updating the pending command.
    pub fn pump(&mut self) {
        while let Some(byte) = self.voice.read_byte() {
            match decode_voice_byte(byte) {
                Some(cmd) => self.pending = Some(cmd),
                None => debug!("link: ignoring voice byte 0x{:02X}", byte),
            }
        }
        while let Some(byte) = self.bluetooth.read_byte() {
            let Some(buf) = self.assembler.push(byte) else {
                continue;
            };
            match decode_command_frame(&buf) {
                Ok(frame) => match frame.command() {
                    Some(cmd) => self.pending = Some(cmd),
                    None => debug!("link: frame flags 0x{:02X} request nothing", frame.flags),
                },
                Err(e) => {
                    self.frames_rejected = self.frames_rejected.wrapping_add(1);
                    warn!("link: frame discarded ({})", e);
                }
            }
        }
    }

    /// Encode and transmit a telemetry report on the Bluetooth port.
    pub fn send_telemetry(&mut self, t: &TelemetryData) {
        let frame = TelemetryFrame {
            count: t.lid_open_count,
            uv_level: 0,
            humidity: t.humidity_pct.unwrap_or(0.0),
            temperature: t.temperature_c.unwrap_or(0.0),
        };
        self.bluetooth.write_all(&frame.encode());
    }

    /// Malformed Bluetooth frames since boot.
    pub fn frames_rejected(&self) -> u32 {
        self.frames_rejected
    }

    pub fn voice_mut(&mut self) -> &mut V {
        &mut self.voice
    }

    pub fn bluetooth_mut(&mut self) -> &mut B {
        &mut self.bluetooth
    }
}

impl<V: SerialPort, B: SerialPort> CommandPort for CommandChannel<V, B> {
    fn poll(&mut self) -> Option<LidCommand> {
        self.pump();
        self.pending.take()
    }
}
