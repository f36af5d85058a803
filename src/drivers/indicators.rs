//! Status LEDs (green / yellow / red) and the alarm buzzer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives four GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::control::alerts::IndicatorState;
use crate::drivers::hw_init;
use crate::pins;

pub struct Indicators {
    current: IndicatorState,
}

impl Default for Indicators {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicators {
    pub fn new() -> Self {
        Self { current: IndicatorState::default() }
    }

    pub fn apply(&mut self, state: IndicatorState) {
        hw_init::gpio_write(pins::LED_GREEN_GPIO, state.green);
        hw_init::gpio_write(pins::LED_YELLOW_GPIO, state.yellow);
        hw_init::gpio_write(pins::LED_RED_GPIO, state.red);
        hw_init::gpio_write(pins::BUZZER_GPIO, state.buzzer);
        self.current = state;
    }

    pub fn current(&self) -> IndicatorState {
        self.current
    }
}
