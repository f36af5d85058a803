//! SmartBin Firmware: Main Entry Point
//!
//! Hexagonal architecture with a single cooperative poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink   IsrClock    Oled        │
//! │  (Sensor+Actuator+Delay)(EventSink)    (ClockPort) (Display)   │
//! │  CommandChannel<UartPort, UartPort>  (CommandPort + telemetry) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              BinService (pure logic)                   │    │
//! │  │  occupancy · lid · cleanup · smoke · arbiter · display │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  1 ms esp_timer ──▶ isr counters (only writer)                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use smartbin::adapters::hardware::HardwareAdapter;
use smartbin::adapters::log_sink::LogEventSink;
use smartbin::adapters::time::IsrClock;
use smartbin::adapters::uart::UartPort;
use smartbin::app::events::AppEvent;
use smartbin::app::ports::{ClockPort, EventSink, SensorPort};
use smartbin::app::service::BinService;
use smartbin::config::SystemConfig;
use smartbin::drivers::hw_init::{self, LEDC_CH_SERVO};
use smartbin::drivers::hw_timer;
use smartbin::drivers::indicators::Indicators;
use smartbin::drivers::oled::Oled;
use smartbin::drivers::servo::ServoDriver;
use smartbin::error::Error;
use smartbin::link::channel::CommandChannel;
use smartbin::pins;
use smartbin::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartBin v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compiled-in defaults) ───────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals and clock ──────────────────────────────
    // Without peripherals nothing can be driven, and without the clock no
    // lid deadline or cleanup timeout ever expires.
    if let Err(e) = hw_init::init_peripherals()
        .and_then(|()| hw_timer::start_clock())
        .map_err(Error::from)
    {
        log::error!("{}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        SensorHub::with_polarity(config.occupancy_active_low),
        ServoDriver::new(LEDC_CH_SERVO),
        Indicators::new(),
    );
    let clock = IsrClock::new();
    let mut oled = Oled::new();
    let mut link = CommandChannel::new(
        UartPort::new(pins::VOICE_UART_PORT),
        UartPort::new(pins::BT_UART_PORT),
    );
    let mut log_sink = LogEventSink::new();

    // ── 5. App service ────────────────────────────────────────
    let mut app = BinService::new(config.clone(), &clock);
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering poll loop.");

    // ── 6. Poll loop ──────────────────────────────────────────
    let mut last_telemetry = clock.now_secs();
    loop {
        app.tick(&mut hw, &clock, &mut oled, &mut link, &mut log_sink);

        let now = clock.now_secs();
        if now.wrapping_sub(last_telemetry) >= config.telemetry_interval_secs {
            last_telemetry = now;
            let t = app.build_telemetry(hw.read_climate());
            log_sink.emit(&AppEvent::Telemetry(t));
            link.send_telemetry(&t);
        }

        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
