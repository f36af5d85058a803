//! Control core: the per-cycle decision logic, zero I/O.
//!
//! | Module      | Decides                                          |
//! |-------------|--------------------------------------------------|
//! | `occupancy` | bin fill level from the two IR sensors           |
//! | `lid`       | when the lid opens and closes                    |
//! | `cleanup`   | how long the bin has gone uncleaned              |
//! | `smoke`     | gas concentration and the smoke alert            |
//! | `alerts`    | which LEDs and whether the buzzer are on         |
//!
//! Everything here is driven by [`BinService`](crate::app::service::BinService),
//! which owns one instance of each component as explicit state.

pub mod alerts;
pub mod cleanup;
pub mod lid;
pub mod occupancy;
pub mod smoke;
