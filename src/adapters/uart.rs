//! UART adapter for the voice and Bluetooth modules.
//!
//! - **`target_os = "espidf"`**: non-blocking reads from the ESP-IDF
//!   UART driver's RX ring buffer (installed by hw_init).
//! - **`not(target_os = "espidf")`**: an in-memory RX queue fed by
//!   [`UartPort::sim_inject`] and a TX log drained by
//!   [`UartPort::sim_take_tx`].

use crate::link::channel::SerialPort;

#[cfg(not(target_os = "espidf"))]
use heapless::{Deque, Vec};

#[cfg(not(target_os = "espidf"))]
const SIM_RX_CAPACITY: usize = 64;
#[cfg(not(target_os = "espidf"))]
const SIM_TX_CAPACITY: usize = 64;

/// One UART peripheral.
pub struct UartPort {
    port: i32,
    #[cfg(not(target_os = "espidf"))]
    rx: Deque<u8, SIM_RX_CAPACITY>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<u8, SIM_TX_CAPACITY>,
}

impl UartPort {
    pub fn new(port: i32) -> Self {
        Self {
            port,
            #[cfg(not(target_os = "espidf"))]
            rx: Deque::new(),
            #[cfg(not(target_os = "espidf"))]
            tx: Vec::new(),
        }
    }

    pub fn port(&self) -> i32 {
        self.port
    }

    /// Queue bytes as if received on the wire.  Bytes beyond the RX
    /// capacity are dropped, like a hardware FIFO overrun.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_inject(&mut self, data: &[u8]) {
        for &b in data {
            if self.rx.push_back(b).is_err() {
                log::debug!("uart{}: rx overrun", self.port);
                break;
            }
        }
    }

    /// Drain everything written since the last call.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_take_tx(&mut self) -> Vec<u8, SIM_TX_CAPACITY> {
        core::mem::take(&mut self.tx)
    }
}

impl SerialPort for UartPort {
    #[cfg(target_os = "espidf")]
    fn read_byte(&mut self) -> Option<u8> {
        crate::drivers::hw_init::uart_read_byte(self.port)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    #[cfg(target_os = "espidf")]
    fn write_all(&mut self, data: &[u8]) {
        crate::drivers::hw_init::uart_write(self.port, data);
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_all(&mut self, data: &[u8]) {
        // Oldest bytes win when the log is full.
        for &b in data {
            if self.tx.push(b).is_err() {
                log::debug!("uart{}: tx log full", self.port);
                break;
            }
        }
    }
}
