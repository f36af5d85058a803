//! Fuzz target: Bluetooth/voice command link
//!
//! Drives arbitrary byte sequences through the frame assembler and the
//! command-frame codec, and the same bytes through the voice decoder.
//! Asserts that nothing panics, that every emitted buffer starts with the
//! frame header, and that accepted frames request at most one command.
//!
//! cargo fuzz run fuzz_command_link

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartbin::link::assembler::FrameAssembler;
use smartbin::link::codec::{
    decode_command_frame, decode_telemetry_frame, decode_voice_byte, FRAME_HEADER,
};

fuzz_target!(|data: &[u8]| {
    let mut asm = FrameAssembler::new();

    for &byte in data {
        let _ = decode_voice_byte(byte);
        if let Some(buf) = asm.push(byte) {
            assert_eq!(buf[0], FRAME_HEADER, "buffer must start at a header");
            if let Ok(frame) = decode_command_frame(&buf) {
                // Checksum equals flags for every accepted frame.
                assert_eq!(buf[1], buf[2]);
                let _ = frame.command();
            }
        }
    }

    // After a reset the assembler must be idle again.
    asm.reset();
    assert!(!asm.is_collecting());

    let _ = decode_telemetry_frame(data);
});
