//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                   |
//! |------------|--------------------|-------------------------------|
//! | `hardware` | SensorPort         | ESP32 ADC, GPIO, echo timing  |
//! |            | ActuatorPort       | LEDC servo PWM, LED/buzzer IO |
//! |            | DelayNs            | ESP-IDF delay                 |
//! | `log_sink` | EventSink          | Serial log output             |
//! | `time`     | ClockPort          | 1 ms timer counters, RTC      |
//! | `uart`     | SerialPort         | Voice / Bluetooth UARTs       |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod uart;
