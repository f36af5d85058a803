//! Integration tests for the BinService poll cycle against mock adapters.

use smartbin::app::commands::LidCommand;
use smartbin::app::events::AppEvent;
use smartbin::app::ports::{ClockPort, WallClock};
use smartbin::app::service::BinService;
use smartbin::config::SystemConfig;
use smartbin::control::alerts::IndicatorState;
use smartbin::control::lid::LidTrigger;
use smartbin::control::occupancy::BinStatus;
use smartbin::drivers::oled::Oled;

use crate::mock_hw::{MockClock, MockCommands, MockHardware, RecordingSink, SMOKE_RAW};

const NEAR_CM: u16 = 5;
const FAR_CM: u16 = 200;

struct Rig {
    app: BinService,
    hw: MockHardware,
    clock: MockClock,
    oled: Oled,
    commands: MockCommands,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_clock(MockClock::new())
    }

    fn with_clock(clock: MockClock) -> Self {
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::new();
        let mut app = BinService::new(SystemConfig::default(), &clock);
        app.start(&mut hw, &mut sink);
        Self {
            app,
            hw,
            clock,
            oled: Oled::new(),
            commands: MockCommands::new(),
            sink,
        }
    }

    fn tick(&mut self) {
        self.app.tick(
            &mut self.hw,
            &self.clock,
            &mut self.oled,
            &mut self.commands,
            &mut self.sink,
        );
    }

    /// `n` cycles, 10 ms apart.
    fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.clock.advance_ms(10);
            self.tick();
        }
    }

    /// Fill the window with far samples, then hold a hand over the sensor
    /// until the lid opens.
    fn open_by_proximity(&mut self) {
        self.hw.distance_cm = FAR_CM;
        self.run(5);
        self.hw.distance_cm = NEAR_CM;
        // Four samples to flush the far readings, three to debounce.
        self.run(6);
        assert!(!self.app.lid_state().is_open, "opened before debounce completed");
        self.run(1);
        assert!(self.app.lid_state().is_open);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_closes_lid_and_shows_empty() {
    let rig = Rig::new();
    assert_eq!(rig.hw.lid_angle(), Some(0));
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::EMPTY));
    assert_eq!(rig.sink.events, vec![AppEvent::Started(BinStatus::Empty)]);
    assert_eq!(rig.app.status(), BinStatus::Empty);
}

#[test]
fn first_cycle_renders_then_display_idles_within_a_second() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.oled.commits(), 1);
    assert_eq!(rig.oled.row(0).trim_end(), "BIN:EMPTY");
    assert_eq!(rig.oled.row(1).trim_end(), "T 00:00");
    // First sample of 200 against a zeroed window: mean 40.
    assert_eq!(rig.oled.row(2).trim_end(), "D040cm G0078");
    assert_eq!(rig.oled.row(3).trim_end(), "");

    rig.run(20);
    assert_eq!(rig.oled.commits(), 1, "nothing visible changed");

    rig.clock.advance_secs(1);
    rig.tick();
    assert_eq!(rig.oled.commits(), 2, "new second forces a redraw");
    assert!(!rig.app.display_dirty());
}

#[test]
fn wall_clock_appears_on_last_row() {
    let mut clock = MockClock::new();
    clock.wall = Some(WallClock {
        year: 2024,
        month: 5,
        day: 14,
        hour: 9,
        minute: 41,
        second: 7,
    });
    let mut rig = Rig::with_clock(clock);
    rig.tick();
    assert_eq!(rig.oled.row(3).trim_end(), "05-14 09:41:07");
}

#[test]
fn indicators_written_only_on_change() {
    let mut rig = Rig::new();
    rig.run(50);
    assert_eq!(rig.hw.indicator_writes(), 1, "only the boot write");

    rig.hw.set_occupancy(true, false);
    rig.run(10);
    assert_eq!(rig.hw.indicator_writes(), 2);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::PARTIAL));
}

// ── Occupancy ─────────────────────────────────────────────────

#[test]
fn occupancy_transitions_drive_indicators_and_events() {
    let mut rig = Rig::new();
    rig.tick();

    rig.hw.set_occupancy(true, false);
    rig.tick();
    assert_eq!(rig.app.status(), BinStatus::Some);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::PARTIAL));
    assert_eq!(rig.oled.row(0).trim_end(), "BIN:SOME");

    rig.hw.set_occupancy(true, true);
    rig.tick();
    assert_eq!(rig.app.status(), BinStatus::Full);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::ALARM));

    rig.hw.set_occupancy(false, false);
    rig.tick();
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::EMPTY));

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::BinStatusChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (BinStatus::Empty, BinStatus::Some),
            (BinStatus::Some, BinStatus::Full),
            (BinStatus::Full, BinStatus::Empty),
        ]
    );
}

#[test]
fn top_sensor_alone_counts_as_partially_full() {
    let mut rig = Rig::new();
    rig.hw.set_occupancy(false, true);
    rig.tick();
    assert_eq!(rig.app.status(), BinStatus::Some);
}

// ── Lid ───────────────────────────────────────────────────────

#[test]
fn sustained_approach_opens_lid() {
    let mut rig = Rig::new();
    rig.open_by_proximity();
    assert_eq!(rig.hw.lid_angle(), Some(90));
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::LidOpened(LidTrigger::Proximity)),
        1
    );

    // Staying in range does not re-drive the servo.
    let moves = rig.hw.lid_moves();
    rig.run(20);
    assert_eq!(rig.hw.lid_moves(), moves);
    assert_eq!(rig.app.trigger_count(), 3);
}

/// The window starts zeroed, so the first means are k·d/5.  A steady 41 cm
/// gives 8, 16, 24: three evaluations under 25 cm.
#[test]
fn zeroed_window_opens_for_steady_object_up_to_41cm() {
    let mut rig = Rig::new();
    rig.hw.distance_cm = 41;
    rig.run(2);
    assert!(!rig.app.lid_state().is_open);
    rig.run(1);
    assert!(rig.app.lid_state().is_open);
    assert_eq!(rig.hw.lid_angle(), Some(90));

    // 42 cm reaches a mean of 25 on the third cycle and never opens.
    let mut rig = Rig::new();
    rig.hw.distance_cm = 42;
    rig.run(10);
    assert!(!rig.app.lid_state().is_open);
    assert_eq!(rig.hw.lid_moves(), 1, "only the closing move from start");
}

#[test]
fn withdrawal_closes_after_delay_not_before() {
    let mut rig = Rig::new();
    rig.open_by_proximity();

    rig.hw.distance_cm = FAR_CM;
    rig.tick();
    let deadline = rig.app.lid_state().scheduled_close_ms.expect("close armed");
    assert_eq!(deadline, rig.clock.now_ms() + 2000);
    assert!(rig.app.lid_state().is_open);

    rig.clock.advance_ms(1990);
    rig.tick();
    assert!(rig.app.lid_state().is_open, "closed early");

    rig.clock.advance_ms(10);
    rig.tick();
    assert!(!rig.app.lid_state().is_open);
    assert_eq!(rig.hw.lid_angle(), Some(0));
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::LidClosed(LidTrigger::AutoClose)),
        1
    );
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::LidCloseScheduled { .. })), 1);
}

#[test]
fn reapproach_during_delay_cancels_close() {
    let mut rig = Rig::new();
    rig.open_by_proximity();

    rig.hw.distance_cm = FAR_CM;
    rig.tick();
    assert!(rig.app.lid_state().scheduled_close_ms.is_some());

    // The single far sample must age out before the mean drops again.
    rig.hw.distance_cm = NEAR_CM;
    rig.run(7);
    assert_eq!(rig.app.lid_state().scheduled_close_ms, None);

    rig.clock.advance_ms(5000);
    rig.tick();
    assert!(rig.app.lid_state().is_open);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::LidClosed(_))), 0);
}

#[test]
fn auto_close_survives_millisecond_wrap() {
    let mut rig = Rig::with_clock(MockClock::at(u32::MAX - 500, 0));
    rig.open_by_proximity();

    rig.hw.distance_cm = FAR_CM;
    rig.tick();
    let deadline = rig.app.lid_state().scheduled_close_ms.expect("close armed");
    assert!(deadline < 2000, "deadline wrapped past zero");

    rig.clock.advance_ms(1990);
    rig.tick();
    assert!(rig.app.lid_state().is_open);

    rig.clock.advance_ms(10);
    rig.tick();
    assert!(!rig.app.lid_state().is_open);
}

// ── Manual override ───────────────────────────────────────────

#[test]
fn manual_open_has_no_auto_close() {
    let mut rig = Rig::new();
    rig.commands.push(LidCommand::Open);
    rig.tick();
    assert_eq!(rig.hw.lid_angle(), Some(90));
    assert!(rig.app.lid_state().is_open);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::CommandApplied(LidCommand::Open)), 1);
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::LidOpened(LidTrigger::Command)),
        1
    );

    rig.clock.advance_ms(60_000);
    rig.run(10);
    assert!(rig.app.lid_state().is_open);
}

#[test]
fn manual_close_requires_fresh_approach() {
    let mut rig = Rig::new();
    rig.open_by_proximity();

    rig.commands.push(LidCommand::Close);
    rig.tick();
    assert!(!rig.app.lid_state().is_open);
    assert_eq!(rig.hw.lid_angle(), Some(0));
    assert_eq!(rig.app.trigger_count(), 0);

    // Hand still there: two evaluations are not enough.
    rig.run(2);
    assert!(!rig.app.lid_state().is_open);
    rig.run(1);
    assert!(rig.app.lid_state().is_open);
}

#[test]
fn applied_command_redraws_within_the_same_second() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.oled.commits(), 1);

    // The override runs after this cycle's frame is drawn.
    rig.commands.push(LidCommand::Open);
    rig.run(1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::CommandApplied(LidCommand::Open)), 1);
    assert!(rig.app.display_dirty());
    assert_eq!(rig.oled.commits(), 1);

    rig.run(1);
    assert_eq!(rig.oled.commits(), 2, "override must redraw without waiting for a new second");
    assert!(!rig.app.display_dirty());
}

#[test]
fn each_command_is_applied_once() {
    let mut rig = Rig::new();
    rig.commands.push(LidCommand::Open);
    rig.run(5);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::CommandApplied(_))), 1);
}

// ── Cleanup timeout ───────────────────────────────────────────

#[test]
fn cleanup_alert_after_timeout_then_cleared_by_emptying() {
    let mut rig = Rig::new();
    rig.hw.set_occupancy(true, false);
    rig.tick();

    rig.clock.set_secs(179);
    rig.tick();
    assert!(!rig.app.alerts().cleanup_timeout_active);
    assert_eq!(rig.oled.row(1).trim_end(), "T 02:59");

    rig.clock.set_secs(180);
    rig.tick();
    assert!(rig.app.alerts().cleanup_timeout_active);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::ALARM));
    assert_eq!(rig.oled.row(1).trim_end(), "T 03:00 CLEAN!");
    assert_eq!(rig.sink.count(|e| *e == AppEvent::CleanupAlert(true)), 1);

    rig.hw.set_occupancy(false, false);
    rig.clock.set_secs(200);
    rig.tick();
    assert!(!rig.app.alerts().cleanup_timeout_active);
    assert_eq!(rig.app.uncleaned_secs(), 0);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::EMPTY));
    assert_eq!(rig.sink.count(|e| *e == AppEvent::CleanupAlert(false)), 1);

    // The baseline restarted at the emptying.
    rig.hw.set_occupancy(true, false);
    rig.clock.set_secs(379);
    rig.tick();
    assert!(!rig.app.alerts().cleanup_timeout_active);
    rig.clock.set_secs(380);
    rig.tick();
    assert!(rig.app.alerts().cleanup_timeout_active);
}

#[test]
fn cleanup_timeout_measured_across_seconds_wrap() {
    let mut rig = Rig::with_clock(MockClock::at(0, 4_294_967_290));
    rig.hw.set_occupancy(true, false);
    rig.tick();

    rig.clock.set_secs(5);
    rig.tick();
    assert_eq!(rig.app.uncleaned_secs(), 10);

    rig.clock.set_secs(174);
    rig.tick();
    assert!(!rig.app.alerts().cleanup_timeout_active);

    rig.clock.set_secs(175);
    rig.tick();
    assert!(rig.app.alerts().cleanup_timeout_active);
}

#[test]
fn empty_bin_never_times_out() {
    let mut rig = Rig::new();
    rig.clock.set_secs(100_000);
    rig.tick();
    assert!(!rig.app.alerts().cleanup_timeout_active);
}

// ── Smoke ─────────────────────────────────────────────────────

#[test]
fn gas_is_averaged_with_spaced_samples() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.hw.gas_reads, 10);
    // Nine 5 ms gaps between ten samples.
    assert_eq!(rig.hw.delay_ns_total, 45_000_000);
}

#[test]
fn smoke_overrides_empty_status() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::EMPTY));

    rig.hw.gas_raw = SMOKE_RAW;
    rig.tick();
    assert!(rig.app.alerts().smoke_active);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::ALARM));
    assert_eq!(rig.oled.row(1).trim_end(), "T 00:00 SMOKE!");
    // Two far samples in the window by now.
    assert_eq!(rig.oled.row(2).trim_end(), "D080cm G0741");
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, AppEvent::SmokeAlert { active: true, .. })),
        1
    );

    rig.hw.gas_raw = crate::mock_hw::CLEAN_AIR_RAW;
    rig.tick();
    assert!(!rig.app.alerts().smoke_active);
    assert_eq!(rig.hw.indicators(), Some(IndicatorState::EMPTY));
}

#[test]
fn dead_gas_divider_reads_as_smoke() {
    let mut rig = Rig::new();
    rig.hw.gas_raw = 0;
    rig.tick();
    assert!(rig.app.alerts().smoke_active);
    assert_eq!(rig.app.build_telemetry(None).gas_ppm, 9999.0);
}

#[test]
fn smoke_banner_wins_over_cleanup() {
    let mut rig = Rig::new();
    rig.hw.set_occupancy(true, true);
    rig.hw.gas_raw = SMOKE_RAW;
    rig.clock.set_secs(200);
    rig.tick();
    assert!(rig.app.alerts().any());
    assert_eq!(rig.oled.row(1).trim_end(), "T 03:20 SMOKE!");
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_counts_lid_openings() {
    let mut rig = Rig::new();
    rig.commands.push(LidCommand::Open);
    rig.tick();
    rig.commands.push(LidCommand::Close);
    rig.tick();
    rig.commands.push(LidCommand::Open);
    rig.tick();

    let t = rig.app.build_telemetry(None);
    assert_eq!(t.lid_open_count, 2);
    assert!(t.lid_open);
    assert_eq!(t.status, BinStatus::Empty);
    assert!(!t.smoke_alert);
    assert_eq!(t.humidity_pct, None);
}
