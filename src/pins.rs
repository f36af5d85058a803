//! GPIO / peripheral pin assignments for the SmartBin controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Occupancy (IR obstacle modules, digital)
// ---------------------------------------------------------------------------

/// Module mounted near the floor of the bin.
pub const OCCUPANCY_BOTTOM_GPIO: i32 = 4;
/// Module mounted just below the rim; obstructed only when full.
pub const OCCUPANCY_TOP_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 6;
/// Digital input: HIGH for the round-trip time of the echo.
pub const ULTRASONIC_ECHO_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Gas sensor (MQ-2): Analog (ADC1)
// ---------------------------------------------------------------------------

/// MQ-2 load-resistor voltage.  ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const GAS_ADC_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Lid servo (SG90)
// ---------------------------------------------------------------------------

pub const SERVO_PWM_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Indicators (discrete LEDs + active buzzer, active HIGH)
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 10;
pub const LED_YELLOW_GPIO: i32 = 11;
pub const LED_RED_GPIO: i32 = 12;
pub const BUZZER_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// UARTs
// ---------------------------------------------------------------------------

/// Offline voice-recognition module (one byte per recognised phrase).
pub const VOICE_UART_PORT: i32 = 1;
pub const VOICE_UART_TX_GPIO: i32 = 17;
pub const VOICE_UART_RX_GPIO: i32 = 18;

/// Bluetooth SPP module (command frames in, telemetry frames out).
pub const BT_UART_PORT: i32 = 2;
pub const BT_UART_TX_GPIO: i32 = 39;
pub const BT_UART_RX_GPIO: i32 = 40;

/// Both modules ship configured for 9600-8N1.
pub const LINK_BAUD: i32 = 9600;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Hobby-servo frame rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo channel.  14 bits gives ~1.2 µs steps.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
