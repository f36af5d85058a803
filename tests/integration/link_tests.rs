//! Command channel tests: voice bytes, Bluetooth frames, telemetry out.

use smartbin::app::commands::LidCommand;
use smartbin::app::events::TelemetryData;
use smartbin::app::ports::CommandPort;
use smartbin::control::occupancy::BinStatus;
use smartbin::link::channel::CommandChannel;
use smartbin::link::codec::{
    decode_telemetry_frame, encode_command_frame, FLAG_CLOSE, FLAG_OPEN, TELEMETRY_FRAME_LEN,
};

use crate::mock_hw::MockSerial;

type Channel = CommandChannel<MockSerial, MockSerial>;

fn channel() -> Channel {
    CommandChannel::new(MockSerial::new(), MockSerial::new())
}

/// A command frame padded to the 8-byte receive buffer.
fn bt_frame(flags: u8) -> [u8; 8] {
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&encode_command_frame(flags));
    buf
}

fn telemetry() -> TelemetryData {
    TelemetryData {
        status: BinStatus::Some,
        lid_open: false,
        distance_cm: 120,
        gas_ppm: 42.0,
        uncleaned_secs: 30,
        smoke_alert: false,
        cleanup_alert: false,
        lid_open_count: 7,
        humidity_pct: None,
        temperature_c: None,
    }
}

#[test]
fn voice_bytes_map_to_commands() {
    let mut ch = channel();
    ch.voice_mut().inject(&[0x01]);
    assert_eq!(ch.poll(), Some(LidCommand::Open));
    assert_eq!(ch.poll(), None, "consumed exactly once");

    ch.voice_mut().inject(&[0x02]);
    assert_eq!(ch.poll(), Some(LidCommand::Close));
}

#[test]
fn unknown_voice_bytes_are_ignored() {
    let mut ch = channel();
    ch.voice_mut().inject(&[0x00, 0x03, 0xFF]);
    assert_eq!(ch.poll(), None);
}

#[test]
fn bluetooth_frame_needs_full_buffer() {
    let mut ch = channel();
    let frame = bt_frame(FLAG_OPEN);
    ch.bluetooth_mut().inject(&frame[..4]);
    assert_eq!(ch.poll(), None);
    ch.bluetooth_mut().inject(&frame[4..]);
    assert_eq!(ch.poll(), Some(LidCommand::Open));
}

#[test]
fn leading_garbage_is_skipped() {
    let mut ch = channel();
    ch.bluetooth_mut().inject(&[0x00, 0x13, 0x5A]);
    ch.bluetooth_mut().inject(&bt_frame(FLAG_CLOSE));
    assert_eq!(ch.poll(), Some(LidCommand::Close));
    assert_eq!(ch.frames_rejected(), 0);
}

#[test]
fn bad_checksum_is_discarded() {
    let mut ch = channel();
    ch.bluetooth_mut()
        .inject(&[0xA5, FLAG_OPEN, FLAG_CLOSE, 0x5A, 0, 0, 0, 0]);
    assert_eq!(ch.poll(), None);
    assert_eq!(ch.frames_rejected(), 1);

    // The link recovers on the next good frame.
    ch.bluetooth_mut().inject(&bt_frame(FLAG_OPEN));
    assert_eq!(ch.poll(), Some(LidCommand::Open));
}

#[test]
fn bad_footer_is_discarded() {
    let mut ch = channel();
    ch.bluetooth_mut()
        .inject(&[0xA5, FLAG_OPEN, FLAG_OPEN, 0x00, 0, 0, 0, 0]);
    assert_eq!(ch.poll(), None);
    assert_eq!(ch.frames_rejected(), 1);
}

#[test]
fn contradictory_flags_request_nothing() {
    let mut ch = channel();
    ch.bluetooth_mut().inject(&bt_frame(FLAG_OPEN | FLAG_CLOSE));
    ch.bluetooth_mut().inject(&bt_frame(0));
    assert_eq!(ch.poll(), None);
    assert_eq!(ch.frames_rejected(), 0);
}

#[test]
fn newest_command_replaces_unconsumed_one() {
    let mut ch = channel();
    ch.voice_mut().inject(&[0x01]);
    ch.pump();
    ch.bluetooth_mut().inject(&bt_frame(FLAG_CLOSE));
    assert_eq!(ch.poll(), Some(LidCommand::Close));
    assert_eq!(ch.poll(), None);
}

#[test]
fn telemetry_frame_on_bluetooth() {
    let mut ch = channel();
    ch.send_telemetry(&telemetry());
    let tx = &ch.bluetooth_mut().tx;
    assert_eq!(tx.len(), TELEMETRY_FRAME_LEN);
    let frame = decode_telemetry_frame(tx).expect("valid frame");
    assert_eq!(frame.count, 7);
    assert_eq!(frame.uv_level, 0);
    assert_eq!(frame.humidity, 0.0);
    assert_eq!(frame.temperature, 0.0);
    assert!(ch.voice_mut().tx.is_empty());
}

#[test]
fn telemetry_frame_carries_climate_when_present() {
    let mut ch = channel();
    let mut t = telemetry();
    t.humidity_pct = Some(55.5);
    t.temperature_c = Some(-3.25);
    ch.send_telemetry(&t);
    let frame = decode_telemetry_frame(&ch.bluetooth_mut().tx).expect("valid frame");
    assert_eq!(frame.humidity, 55.5);
    assert_eq!(frame.temperature, -3.25);
}
