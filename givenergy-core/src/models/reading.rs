//! Power-flow readings.
//!
//! One [`Reading`] is one sample of the inverter's data-points endpoint.
//! Only the fields the chart needs are modeled; everything else in the
//! upstream payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Reading
// ============================================================================

/// One timestamped power-flow sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sample time as reported by the API (ISO-8601 / RFC 3339).
    pub time: String,
    /// Power flows at that instant.
    pub power: PowerFlows,
}

impl Reading {
    /// Creates a reading from raw values.
    pub fn new(
        time: impl Into<String>,
        solar: f64,
        grid: f64,
        battery: BatteryFlow,
        consumption: f64,
    ) -> Self {
        Self {
            time: time.into(),
            power: PowerFlows {
                solar: PowerFlow::new(solar),
                grid: PowerFlow::new(grid),
                battery,
                consumption: PowerFlow::new(consumption),
            },
        }
    }

    /// Parses the sample time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimestamp` if `time` is not a valid
    /// RFC 3339 timestamp.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, CoreError> {
        self.time
            .parse::<DateTime<Utc>>()
            .map_err(|e| CoreError::InvalidTimestamp {
                value: self.time.clone(),
                reason: e.to_string(),
            })
    }

    /// Sample time in milliseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimestamp` under the same conditions as
    /// [`timestamp`](Self::timestamp).
    pub fn timestamp_millis(&self) -> Result<i64, CoreError> {
        self.timestamp().map(|t| t.timestamp_millis())
    }

    /// The four power-valued flows (solar, grid, battery, consumption).
    ///
    /// Battery percentage is not a power value and is excluded.
    pub fn power_values(&self) -> [f64; 4] {
        [
            self.power.solar.power,
            self.power.grid.power,
            self.power.battery.power,
            self.power.consumption.power,
        ]
    }
}

// ============================================================================
// Power Flows
// ============================================================================

/// The `power` object of a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerFlows {
    /// PV generation.
    pub solar: PowerFlow,
    /// Grid import (positive) or export (negative).
    pub grid: PowerFlow,
    /// Battery flow and state of charge.
    pub battery: BatteryFlow,
    /// House consumption.
    pub consumption: PowerFlow,
}

/// A single power value in watts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerFlow {
    /// Power in watts.
    pub power: f64,
}

impl PowerFlow {
    /// Creates a power flow.
    pub fn new(power: f64) -> Self {
        Self { power }
    }
}

/// Battery flow plus state of charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryFlow {
    /// Power in watts.
    pub power: f64,
    /// State of charge, 0-100.
    pub percent: f64,
}

impl BatteryFlow {
    /// Creates a battery flow.
    pub fn new(power: f64, percent: f64) -> Self {
        Self { power, percent }
    }
}

// ============================================================================
// Tests
// ============================================================================
