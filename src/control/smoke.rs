//! MQ-2 gas/smoke estimation.
//!
//! The sensor is a resistive divider: the ADC sees the voltage across the
//! load, so the sensing resistance relative to the load is
//! `Rs = (Vref - V) / V`.  Concentration follows the datasheet power-law
//! fit `ppm = A * (Rs / R0) ^ B`.
//!
//! ```text
//!  K raw samples ─▶ mean ─▶ V ─▶ Rs ─▶ ratio ─▶ ppm ─▶ clamp ─▶ ≥ threshold?
//!                           │            │
//!                     V < min_v     ratio < min_ratio
//!                           └─────┬──────┘
//!                                 ▼
//!                           max sentinel
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::error::{Error, Result};

/// Conversion constants for the MQ-2 divider and curve fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasCalibration {
    /// ADC reference voltage (V)
    pub vref: f32,
    /// Full-scale ADC count (12-bit = 4096)
    pub adc_counts: u16,
    /// Sensor resistance in clean air, relative to the load resistor
    pub r0: f32,
    /// Curve-fit coefficient
    pub curve_a: f32,
    /// Curve-fit exponent (negative: resistance falls as gas rises)
    pub curve_b: f32,
    /// Voltages below this are treated as a dead divider
    pub min_voltage: f32,
    /// Ratios below this are implausible
    pub min_ratio: f32,
    pub min_ppm: f32,
    pub max_ppm: f32,
}

impl Default for GasCalibration {
    fn default() -> Self {
        Self {
            vref: 3.3,
            adc_counts: 4096,
            r0: 9.8,
            curve_a: 658.9,
            curve_b: -2.013,
            min_voltage: 0.1,
            min_ratio: 0.01,
            min_ppm: 1.0,
            max_ppm: 9999.0,
        }
    }
}

fn positive(x: f32) -> bool {
    x.is_finite() && x > 0.0
}

impl GasCalibration {
    pub fn validate(&self) -> Result<()> {
        if !positive(self.vref) || self.adc_counts == 0 {
            return Err(Error::Config("gas ADC reference must be positive"));
        }
        if !positive(self.r0) || !positive(self.curve_a) || !self.curve_b.is_finite() {
            return Err(Error::Config("gas curve constants must be finite, R0 and A positive"));
        }
        if !positive(self.min_voltage) || !positive(self.min_ratio) {
            return Err(Error::Config("gas guard thresholds must be positive"));
        }
        if !self.min_ppm.is_finite() || !self.max_ppm.is_finite() || self.min_ppm >= self.max_ppm {
            return Err(Error::Config("gas ppm clamp must satisfy min < max"));
        }
        Ok(())
    }

    /// Convert an averaged ADC count to volts.
    pub fn raw_to_voltage(&self, raw_avg: f32) -> f32 {
        raw_avg * self.vref / f32::from(self.adc_counts)
    }
}

/// Intermediate and final values of one conversion.
///
/// When the divider voltage is below `min_voltage`, `rs` and `ratio` are
/// not computed and are reported as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasEstimate {
    pub rs: f32,
    pub ratio: f32,
    pub ppm: f32,
}

/// Concentration estimate from an averaged divider voltage.
pub fn estimate_from_voltage(voltage: f32, cal: &GasCalibration) -> GasEstimate {
    if voltage.is_nan() || voltage < cal.min_voltage {
        return GasEstimate {
            rs: 0.0,
            ratio: 0.0,
            ppm: cal.max_ppm,
        };
    }
    let rs = (cal.vref - voltage) / voltage;
    let ratio = rs / cal.r0;
    if ratio < cal.min_ratio {
        return GasEstimate {
            rs,
            ratio,
            ppm: cal.max_ppm,
        };
    }
    let ppm = (cal.curve_a * ratio.powf(cal.curve_b)).clamp(cal.min_ppm, cal.max_ppm);
    GasEstimate { rs, ratio, ppm }
}

/// One averaged measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GasReading {
    pub raw_avg: f32,
    pub voltage: f32,
    pub estimate: GasEstimate,
}

impl GasReading {
    pub fn ppm(&self) -> f32 {
        self.estimate.ppm
    }
}

/// Averages K samples per evaluation and tracks the smoke alert.
#[derive(Debug, Clone)]
pub struct SmokeMonitor {
    cal: GasCalibration,
    threshold_ppm: f32,
    samples: u8,
    sample_delay_ms: u32,
    active: bool,
    last: GasReading,
}

impl SmokeMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            cal: config.gas.clone(),
            threshold_ppm: config.smoke_threshold_ppm,
            samples: config.gas_samples.max(1),
            sample_delay_ms: config.gas_sample_delay_ms,
            active: false,
            last: GasReading::default(),
        }
    }

    /// Take `gas_samples` readings with `read_raw`, spaced by the sample
    /// delay on `source`, and convert their mean.
    pub fn measure<S: DelayNs>(
        &mut self,
        source: &mut S,
        mut read_raw: impl FnMut(&mut S) -> u16,
    ) -> GasReading {
        let mut sum: u32 = 0;
        for i in 0..self.samples {
            if i > 0 {
                source.delay_ms(self.sample_delay_ms);
            }
            sum += u32::from(read_raw(source));
        }
        let raw_avg = sum as f32 / f32::from(self.samples);
        let voltage = self.cal.raw_to_voltage(raw_avg);
        self.last = GasReading {
            raw_avg,
            voltage,
            estimate: estimate_from_voltage(voltage, &self.cal),
        };
        self.last
    }

    /// Recompute the alert from `ppm`.  Returns `Some(active)` on a flip.
    pub fn evaluate(&mut self, ppm: f32) -> Option<bool> {
        let active = ppm >= self.threshold_ppm;
        if active == self.active {
            return None;
        }
        self.active = active;
        if active {
            warn!("SMOKE: {:.0}ppm >= {:.0}ppm, alert raised", ppm, self.threshold_ppm);
        } else {
            info!("SMOKE: {:.0}ppm, alert cleared", ppm);
        }
        Some(active)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_reading(&self) -> GasReading {
        self.last
    }
}
