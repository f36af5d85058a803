//! Serial command link.
//!
//! ```text
//!  voice module ──(1 byte/cmd)──┐
//!                               ├──▶ CommandChannel ──▶ LidCommand (once)
//!  Bluetooth ──▶ FrameAssembler ┘            │
//!      ▲                                     │
//!      └──────── telemetry frame ◀───────────┘
//! ```
//!
//! Both modules are 9600-8N1 UARTs.  Malformed input is discarded; the
//! sender is expected to resend.

pub mod assembler;
pub mod channel;
pub mod codec;
