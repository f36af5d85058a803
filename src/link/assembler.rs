//! Byte-at-a-time receive state machine for the Bluetooth command link.
//!
//! Idle until a `0xA5` header arrives, then collects bytes (header
//! included) until the 8-byte receive buffer is full.  Only the first
//! four bytes carry the frame; the rest is padding from the remote app.
//! Validation happens later in [`decode_command_frame`](super::codec::decode_command_frame).

use heapless::Vec;

use super::codec::FRAME_HEADER;

/// Size of the receive buffer.
pub const RX_BUFFER_LEN: usize = 8;

enum RxState {
    /// Discarding bytes until a header.
    WaitHeader,
    /// Header seen, filling the buffer.
    Collecting,
}

pub struct FrameAssembler {
    state: RxState,
    buf: Vec<u8, RX_BUFFER_LEN>,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    pub const fn new() -> Self {
        Self {
            state: RxState::WaitHeader,
            buf: Vec::new(),
        }
    }

    /// Feed one received byte.  Returns the full buffer when the eighth
    /// byte of a frame arrives.
    pub fn push(&mut self, byte: u8) -> Option<[u8; RX_BUFFER_LEN]> {
        match self.state {
            RxState::WaitHeader => {
                if byte == FRAME_HEADER {
                    self.buf.clear();
                    // Capacity is 8; the buffer was just cleared.
                    let _ = self.buf.push(byte);
                    self.state = RxState::Collecting;
                }
                None
            }
            RxState::Collecting => {
                let _ = self.buf.push(byte);
                if !self.buf.is_full() {
                    return None;
                }
                self.state = RxState::WaitHeader;
                self.buf.as_slice().try_into().ok()
            }
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = RxState::WaitHeader;
        self.buf.clear();
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, RxState::Collecting)
    }
}
