//! One-shot hardware peripheral initialization.
//!
//! Configures the gas ADC channel, GPIO directions, the servo LEDC
//! timer/channel and both link UARTs using raw ESP-IDF sys calls.  Called
//! once from `main()` before the poll loop starts.  Also hosts the thin
//! register-level read/write helpers the drivers share.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::error::SensorError;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    UartInitFailed(i32),
    TimerInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc)   => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::UartInitFailed(rc)   => write!(f, "UART driver install failed (rc={})", rc),
            Self::TimerInitFailed(rc)  => write!(f, "clock timer setup failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_gpio_outputs()?;
        init_ledc()?;
        init_uarts()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

pub const ADC1_CH_GAS: u32 = 0;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the poll loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    // 12 dB attenuation covers the full 0–3.3 V divider swing.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_GAS, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH0=MQ-2)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(SensorError::AdcReadFailed);
    }
    Ok(raw.max(0) as u16)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // IR modules drive their outputs push-pull; the echo line idles LOW.
    let input_pins = [
        (pins::OCCUPANCY_BOTTOM_GPIO, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE),
        (pins::OCCUPANCY_TOP_GPIO, gpio_pulldown_t_GPIO_PULLDOWN_DISABLE),
        (pins::ULTRASONIC_ECHO_GPIO, gpio_pulldown_t_GPIO_PULLDOWN_ENABLE),
    ];

    for &(pin, pull_down) in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: pull_down,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::LED_GREEN_GPIO,
        pins::LED_YELLOW_GPIO,
        pins::LED_RED_GPIO,
        pins::BUZZER_GPIO,
        pins::ULTRASONIC_TRIG_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Ultrasonic echo timing ────────────────────────────────────

/// The HC-SR04 holds ECHO high for at most 38 ms when nothing is in range.
pub const ECHO_TIMEOUT_US: i64 = 38_000;

/// Fire one ranging pulse and return the echo width in microseconds.
#[cfg(target_os = "espidf")]
pub fn ultrasonic_echo_us(trig: i32, echo: i32) -> Result<u32, SensorError> {
    // SAFETY: both pins were configured in init_gpio_*; the busy-waits are
    // bounded by ECHO_TIMEOUT_US and run on the main task only.
    unsafe {
        gpio_set_level(trig, 1);
        esp_rom_delay_us(10);
        gpio_set_level(trig, 0);

        let armed = esp_timer_get_time();
        while gpio_get_level(echo) == 0 {
            if esp_timer_get_time() - armed > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }
        let rise = esp_timer_get_time();
        while gpio_get_level(echo) != 0 {
            if esp_timer_get_time() - rise > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }
        Ok((esp_timer_get_time() - rise) as u32)
    }
}

// ── LEDC PWM (servo) ─────────────────────────────────────────

pub const LEDC_CH_SERVO: u32 = 0;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: servo (50 Hz, 14-bit)
    // SAFETY: Called from single main-task context via init_peripherals().
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_14_BIT,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    // Channel 0: servo, idle (no pulses) until the first angle command.
    let ret = unsafe { ledc_channel_config(&ledc_channel_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        channel: LEDC_CH_SERVO,
        timer_sel: ledc_timer_t_LEDC_TIMER_0,
        gpio_num: pins::SERVO_PWM_GPIO,
        duty: 0,
        hpoint: 0,
        ..Default::default()
    }) };
    if ret != ESP_OK as i32 { return Err(HwInitError::LedcInitFailed(ret)); }

    info!("hw_init: LEDC configured (servo=CH0 @ {} Hz)", pins::SERVO_PWM_FREQ_HZ);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only main loop calls this function.
    unsafe {
        esp_idf_svc::sys::ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            duty,
        );
        esp_idf_svc::sys::ledc_update_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
        );
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) {}

// ── UARTs (voice module, Bluetooth) ──────────────────────────

#[cfg(target_os = "espidf")]
const UART_RX_BUF: i32 = 256;

#[cfg(target_os = "espidf")]
unsafe fn init_uarts() -> Result<(), HwInitError> {
    let links = [
        (pins::VOICE_UART_PORT, pins::VOICE_UART_TX_GPIO, pins::VOICE_UART_RX_GPIO),
        (pins::BT_UART_PORT, pins::BT_UART_TX_GPIO, pins::BT_UART_RX_GPIO),
    ];

    for &(port, tx, rx) in &links {
        let cfg = uart_config_t {
            baud_rate: pins::LINK_BAUD,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };
        // SAFETY: each port is installed exactly once, before any read/write.
        let ret = unsafe { uart_param_config(port, &cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = unsafe { uart_set_pin(port, tx, rx, -1, -1) };
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
        let ret = unsafe {
            uart_driver_install(port, UART_RX_BUF, 0, 0, core::ptr::null_mut(), 0)
        };
        if ret != ESP_OK as i32 { return Err(HwInitError::UartInitFailed(ret)); }
    }

    info!("hw_init: UART{} (voice) + UART{} (bluetooth) @ {} baud",
          pins::VOICE_UART_PORT, pins::BT_UART_PORT, pins::LINK_BAUD);
    Ok(())
}

/// Non-blocking single-byte read from the driver's RX ring.
#[cfg(target_os = "espidf")]
pub fn uart_read_byte(port: i32) -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: the driver for `port` was installed in init_uarts(); a zero
    // tick timeout never blocks.
    let n = unsafe { uart_read_bytes(port, (&raw mut byte).cast(), 1, 0) };
    (n == 1).then_some(byte)
}

#[cfg(target_os = "espidf")]
pub fn uart_write(port: i32, data: &[u8]) {
    // SAFETY: the driver for `port` was installed in init_uarts(); with no
    // TX ring the call blocks until the bytes are in the hardware FIFO.
    let n = unsafe { uart_write_bytes(port, data.as_ptr().cast(), data.len()) };
    if n < 0 {
        log::warn!("hw_init: UART{} write failed (rc={})", port, n);
    }
}
