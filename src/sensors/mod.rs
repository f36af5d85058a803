//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! Every driver caches its last good value and substitutes it when a
//! conversion fails, so the hub never reports an error upward.

pub mod gas;
pub mod occupancy;
pub mod ultrasonic;

use crate::app::ports::OccupancyReading;
use gas::GasSensor;
use occupancy::OccupancySensors;
use ultrasonic::UltrasonicRanger;

/// Owns every sensor driver on the board.
pub struct SensorHub {
    pub occupancy: OccupancySensors,
    pub ranger: UltrasonicRanger,
    pub gas: GasSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(occupancy: OccupancySensors, ranger: UltrasonicRanger, gas: GasSensor) -> Self {
        Self {
            occupancy,
            ranger,
            gas,
        }
    }

    /// Hub with default drivers; `active_low` selects occupancy polarity.
    pub fn with_polarity(active_low: bool) -> Self {
        Self::new(
            OccupancySensors::new(active_low),
            UltrasonicRanger::new(),
            GasSensor::new(),
        )
    }

    pub fn read_occupancy(&mut self) -> OccupancyReading {
        self.occupancy.read()
    }

    pub fn read_distance_cm(&mut self) -> u16 {
        self.ranger.read_cm()
    }

    pub fn read_gas_raw(&mut self) -> u16 {
        self.gas.read_raw()
    }
}
