//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use std::cell::Cell;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use smartbin::app::commands::LidCommand;
use smartbin::app::events::AppEvent;
use smartbin::app::ports::{
    ActuatorPort, ClockPort, CommandPort, EventSink, OccupancyReading, SensorPort, WallClock,
};
use smartbin::control::alerts::IndicatorState;
use smartbin::link::channel::SerialPort;

/// Raw ADC count that converts to roughly 78 ppm with the default
/// calibration: below the smoke threshold.
pub const CLEAN_AIR_RAW: u16 = 140;
/// Raw ADC count that converts to several hundred ppm.
pub const SMOKE_RAW: u16 = 400;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    LidAngle(u8),
    Indicators(IndicatorState),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub occupancy: OccupancyReading,
    pub distance_cm: u16,
    pub gas_raw: u16,
    pub calls: Vec<ActuatorCall>,
    pub gas_reads: u32,
    pub delay_ns_total: u64,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            occupancy: OccupancyReading::default(),
            distance_cm: 200,
            gas_raw: CLEAN_AIR_RAW,
            calls: Vec::new(),
            gas_reads: 0,
            delay_ns_total: 0,
        }
    }

    pub fn set_occupancy(&mut self, bottom: bool, top: bool) {
        self.occupancy = OccupancyReading { bottom, top };
    }

    pub fn lid_angle(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::LidAngle(a) => Some(*a),
            ActuatorCall::Indicators(_) => None,
        })
    }

    pub fn indicators(&self) -> Option<IndicatorState> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Indicators(s) => Some(*s),
            ActuatorCall::LidAngle(_) => None,
        })
    }

    pub fn lid_moves(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::LidAngle(_)))
            .count()
    }

    pub fn indicator_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Indicators(_)))
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_occupancy(&mut self) -> OccupancyReading {
        self.occupancy
    }

    fn read_distance_cm(&mut self) -> u16 {
        self.distance_cm
    }

    fn read_gas_raw(&mut self) -> u16 {
        self.gas_reads += 1;
        self.gas_raw
    }
}

impl ActuatorPort for MockHardware {
    fn set_lid_angle(&mut self, degrees: u8) {
        self.calls.push(ActuatorCall::LidAngle(degrees));
    }

    fn set_indicators(&mut self, state: IndicatorState) {
        self.calls.push(ActuatorCall::Indicators(state));
    }
}

impl DelayNs for MockHardware {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ns_total += u64::from(ns);
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    ms: Cell<u32>,
    secs: Cell<u32>,
    pub wall: Option<WallClock>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::at(0, 0)
    }

    pub fn at(ms: u32, secs: u32) -> Self {
        Self {
            ms: Cell::new(ms),
            secs: Cell::new(secs),
            wall: None,
        }
    }

    /// Advance the millisecond counter only.
    pub fn advance_ms(&self, ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(ms));
    }

    pub fn set_secs(&self, secs: u32) {
        self.secs.set(secs);
    }

    pub fn advance_secs(&self, secs: u32) {
        self.secs.set(self.secs.get().wrapping_add(secs));
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u32 {
        self.ms.get()
    }

    fn now_secs(&self) -> u32 {
        self.secs.get()
    }

    fn wall_clock(&self) -> Option<WallClock> {
        self.wall
    }
}

// ── MockCommands ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockCommands {
    pub queue: VecDeque<LidCommand>,
}

impl MockCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: LidCommand) {
        self.queue.push_back(cmd);
    }
}

impl CommandPort for MockCommands {
    fn poll(&mut self) -> Option<LidCommand> {
        self.queue.pop_front()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockSerial ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSerial {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

impl SerialPort for MockSerial {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_all(&mut self, data: &[u8]) {
        self.tx.extend_from_slice(data);
    }
}
