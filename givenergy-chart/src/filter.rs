//! Time-window filtering.

use chrono::{DateTime, TimeDelta, Utc};
use givenergy_core::Reading;
use tracing::debug;

use crate::error::ChartError;

/// Milliseconds per hour.
const HOUR_MS: f64 = 3_600_000.0;

/// Keeps readings with `time >= now - hours`, preserving order.
///
/// The cutoff is taken as computed: a negative window puts it in the future,
/// and a NaN window matches nothing.
///
/// # Errors
///
/// Returns `ChartError::Reading` if a reading's time cannot be parsed.
#[allow(clippy::cast_possible_truncation)]
pub fn retain_recent(
    readings: Vec<Reading>,
    hours: f64,
    now: DateTime<Utc>,
) -> Result<Vec<Reading>, ChartError> {
    if hours.is_nan() {
        return Ok(Vec::new());
    }

    // Outside chrono's range the cutoff lies before every reading, or after.
    let Some(cutoff) = TimeDelta::try_milliseconds((hours * HOUR_MS) as i64)
        .and_then(|window| now.checked_sub_signed(window))
    else {
        return Ok(if hours > 0.0 { readings } else { Vec::new() });
    };

    let mut kept = Vec::with_capacity(readings.len());
    for reading in readings {
        if reading.timestamp()? >= cutoff {
            kept.push(reading);
        }
    }

    debug!(hours, cutoff = %cutoff, kept = kept.len(), "Applied time window");
    Ok(kept)
}
