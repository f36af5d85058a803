//! Application service: the hexagonal core.
//!
//! [`BinService`] owns every piece of control state (classifier, lid
//! controller, cleanup tracker, smoke monitor, display scheduler) in one
//! explicit context.  All I/O flows through port traits injected at call
//! sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │          BinService          │ ──▶ DisplayPort
//! CommandPort ──▶ │ occupancy · lid · cleanup ·  │
//!                 │ smoke · arbiter · display    │
//! ActuatorPort ◀──└─────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::SystemConfig;
use crate::control::alerts::{self, AlertState, IndicatorState};
use crate::control::cleanup::CleanupTracker;
use crate::control::lid::{LidAction, LidController, LidState};
use crate::control::occupancy::{BinStatus, OccupancyClassifier};
use crate::control::smoke::{GasReading, SmokeMonitor};
use crate::display::scheduler::DisplayScheduler;
use crate::display::screen::{ScreenModel, StatusScreen};

use super::commands::LidCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{
    ActuatorPort, ClimateReading, ClockPort, CommandPort, DisplayPort, EventSink, SensorPort,
};

// ───────────────────────────────────────────────────────────────
// BinService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct BinService {
    config: SystemConfig,
    occupancy: OccupancyClassifier,
    lid: LidController,
    cleanup: CleanupTracker,
    smoke: SmokeMonitor,
    alerts: AlertState,
    display: DisplayScheduler,
    /// Last indicator pattern written, `None` before the first cycle.
    indicators: Option<IndicatorState>,
    gas: GasReading,
    lid_open_count: u8,
    tick_count: u64,
}

impl BinService {
    /// Construct the service.  Every timer baseline starts at `clock`'s
    /// current reading; nothing survives a reset.
    pub fn new(config: SystemConfig, clock: &impl ClockPort) -> Self {
        let lid = LidController::new(&config);
        let cleanup = CleanupTracker::new(config.cleanup_timeout_secs, clock.now_secs());
        let smoke = SmokeMonitor::new(&config);
        Self {
            config,
            occupancy: OccupancyClassifier::new(),
            lid,
            cleanup,
            smoke,
            alerts: AlertState::default(),
            display: DisplayScheduler::new(),
            indicators: None,
            gas: GasReading::default(),
            lid_open_count: 0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the outputs to the boot state: lid closed, indicators for an
    /// empty bin.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.set_lid_angle(self.config.lid_closed_angle_deg);
        self.apply_indicators(hw);
        sink.emit(&AppEvent::Started(self.occupancy.status()));
        info!("BinService started, status {}", self.occupancy.status());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one poll cycle: occupancy → lid → cleanup → gas → arbiter →
    /// display → command.
    ///
    /// The `hw` parameter satisfies [`SensorPort`], [`ActuatorPort`] and
    /// [`DelayNs`] at once; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + DelayNs),
        clock: &impl ClockPort,
        display: &mut impl DisplayPort,
        commands: &mut impl CommandPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let now_ms = clock.now_ms();
        let now_secs = clock.now_secs();

        // 1. Occupancy
        let occ = hw.read_occupancy();
        if let Some(change) = self.occupancy.update(occ.bottom, occ.top) {
            if change.became_empty() {
                self.cleanup.reset(now_secs);
            }
            self.display.mark_dirty();
            sink.emit(&AppEvent::BinStatusChanged {
                from: change.from,
                to: change.to,
            });
        }
        let status = self.occupancy.status();

        // 2. Lid
        let distance = hw.read_distance_cm();
        let update = self.lid.update(distance, now_ms);
        if let Some(at_ms) = update.close_scheduled_at {
            sink.emit(&AppEvent::LidCloseScheduled { at_ms });
        }
        if let Some(action) = update.action {
            self.drive_lid(action, hw, sink);
        }

        // 3. Cleanup timeout
        if let Some(active) = self.cleanup.update(status, now_secs) {
            self.alerts.cleanup_timeout_active = active;
            self.display.mark_dirty();
            sink.emit(&AppEvent::CleanupAlert(active));
        }

        // 4. Gas
        self.gas = self.smoke.measure(&mut *hw, |h| h.read_gas_raw());
        if let Some(active) = self.smoke.evaluate(self.gas.ppm()) {
            self.alerts.smoke_active = active;
            self.display.mark_dirty();
            sink.emit(&AppEvent::SmokeAlert {
                active,
                ppm: self.gas.ppm(),
            });
        }

        // 5. Arbiter
        self.apply_indicators(hw);

        // 6. Display
        self.display.observe_second(now_secs);
        if self.display.is_dirty() {
            StatusScreen::render(display, &self.screen_model(clock));
            self.display.rendered(now_secs);
        }

        // 7. Manual override
        if let Some(cmd) = commands.poll() {
            self.handle_command(cmd, hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a manual lid override.
    pub fn handle_command(
        &mut self,
        cmd: LidCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let action = self.lid.apply_command(cmd);
        self.drive_lid(action, hw, sink);
        self.display.mark_dirty();
        sink.emit(&AppEvent::CommandApplied(cmd));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    /// `climate`: last humidity/temperature reading, if the board has one.
    pub fn build_telemetry(&self, climate: Option<ClimateReading>) -> TelemetryData {
        TelemetryData {
            status: self.occupancy.status(),
            lid_open: self.lid.state().is_open,
            distance_cm: self.lid.filtered_cm(),
            gas_ppm: self.gas.ppm(),
            uncleaned_secs: self.cleanup.uncleaned_secs(),
            smoke_alert: self.alerts.smoke_active,
            cleanup_alert: self.alerts.cleanup_timeout_active,
            lid_open_count: self.lid_open_count,
            humidity_pct: climate.map(|c| c.humidity_pct),
            temperature_c: climate.map(|c| c.temperature_c),
        }
    }

    pub fn status(&self) -> BinStatus {
        self.occupancy.status()
    }

    pub fn lid_state(&self) -> LidState {
        self.lid.state()
    }

    pub fn alerts(&self) -> AlertState {
        self.alerts
    }

    /// Last indicator pattern written to the hardware.
    pub fn indicators(&self) -> Option<IndicatorState> {
        self.indicators
    }

    pub fn trigger_count(&self) -> u8 {
        self.lid.trigger_count()
    }

    pub fn uncleaned_secs(&self) -> u32 {
        self.cleanup.uncleaned_secs()
    }

    pub fn display_dirty(&self) -> bool {
        self.display.is_dirty()
    }

    /// Total poll cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive_lid(&mut self, action: LidAction, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        match action {
            LidAction::Open(trigger) => {
                hw.set_lid_angle(self.config.lid_open_angle_deg);
                self.lid_open_count = self.lid_open_count.wrapping_add(1);
                sink.emit(&AppEvent::LidOpened(trigger));
            }
            LidAction::Close(trigger) => {
                hw.set_lid_angle(self.config.lid_closed_angle_deg);
                sink.emit(&AppEvent::LidClosed(trigger));
            }
        }
    }

    /// Resolve and write the indicators, skipping the write when nothing
    /// changed.
    fn apply_indicators(&mut self, hw: &mut impl ActuatorPort) {
        let next = alerts::resolve(self.alerts, self.occupancy.status());
        if self.indicators != Some(next) {
            hw.set_indicators(next);
            self.indicators = Some(next);
        }
    }

    fn screen_model(&self, clock: &impl ClockPort) -> ScreenModel {
        ScreenModel {
            status: self.occupancy.status(),
            uncleaned_secs: self.cleanup.uncleaned_secs(),
            alerts: self.alerts,
            distance_cm: self.lid.filtered_cm(),
            gas_ppm: self.gas.ppm(),
            wall_clock: clock.wall_clock(),
        }
    }
}
