//! MQ-2 gas sensor ADC front end.
//!
//! Returns single raw 12-bit counts; averaging and conversion to ppm live
//! in [`control::smoke`](crate::control::smoke).  A failed conversion
//! repeats the previous count.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH0 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_adc(raw: u16) {
    SIM_GAS_ADC.store(raw, Ordering::Relaxed);
}

pub struct GasSensor {
    last_raw: u16,
}

impl Default for GasSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl GasSensor {
    pub fn new() -> Self {
        Self { last_raw: 0 }
    }

    #[cfg(target_os = "espidf")]
    pub fn read_raw(&mut self) -> u16 {
        match hw_init::adc1_read(hw_init::ADC1_CH_GAS) {
            Ok(raw) => self.last_raw = raw,
            Err(e) => log::debug!("gas: {}, repeating {}", e, self.last_raw),
        }
        self.last_raw
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&mut self) -> u16 {
        self.last_raw = SIM_GAS_ADC.load(Ordering::Relaxed);
        self.last_raw
    }
}
