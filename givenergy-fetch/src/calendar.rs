//! Calendar dates for the two fetched days.
//!
//! "Today" is the calendar date of the current instant in the active zone;
//! "yesterday" is the previous calendar date. Both are computed on dates,
//! never by subtracting 24 hours, so daylight-saving transitions cannot
//! skip or repeat a day.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::FetchError;

/// Date format used by the data-points endpoint.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Active Zone
// ============================================================================

/// The zone used to decide which calendar day "now" falls on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveZone {
    /// The system local zone.
    #[default]
    Local,
    /// A named IANA zone.
    Named(Tz),
}

impl ActiveZone {
    /// Parses an IANA zone name as found in `TZ`.
    ///
    /// A leading `:` (POSIX "implementation-defined" marker) is ignored and an
    /// empty value selects the local zone.
    pub fn parse(name: &str) -> Result<Self, FetchError> {
        let name = name.trim().trim_start_matches(':');
        if name.is_empty() {
            return Ok(Self::Local);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| FetchError::InvalidConfig(format!("Unknown time zone {name:?}")))
    }

    /// Calendar date of `now` in this zone.
    pub fn date_of(&self, now: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => now.with_timezone(&Local).date_naive(),
            Self::Named(tz) => now.with_timezone(tz).date_naive(),
        }
    }
}

impl fmt::Display for ActiveZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

// ============================================================================
// Day Range
// ============================================================================

/// Yesterday and today, in fetch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// The previous calendar day.
    pub yesterday: NaiveDate,
    /// The current calendar day.
    pub today: NaiveDate,
}

impl DayRange {
    /// The range ending on the day `now` falls on in `zone`.
    pub fn ending_at(now: DateTime<Utc>, zone: ActiveZone) -> Result<Self, FetchError> {
        let today = zone.date_of(now);
        let yesterday = today
            .pred_opt()
            .ok_or_else(|| FetchError::InvalidConfig(format!("No day before {today}")))?;
        Ok(Self { yesterday, today })
    }

    /// Both days, yesterday first.
    pub fn days(&self) -> [NaiveDate; 2] {
        [self.yesterday, self.today]
    }
}

/// Formats a day the way the API expects (`YYYY-MM-DD`).
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

// ============================================================================
// Tests
// ============================================================================
