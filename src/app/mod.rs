//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the control components into one poll cycle for the
//! SmartBin controller: occupancy, lid, cleanup timeout, smoke, alert
//! arbitration and display refresh.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
