//! Goal time parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::format_hms;
use crate::{PaceBandError, Result};

/// Target finish time as hours, minutes and seconds.
///
/// Minutes and seconds are not range-checked: `3:99:99` is accepted and simply adds
/// up to more seconds than its face value suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GoalTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl GoalTime {
    /// Create a goal time from its components.
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Best-effort parse of `H:MM:SS`, `H:MM` or `H`.
    ///
    /// Returns `None` when the hours field is missing or not a non-negative integer,
    /// or when the total would overflow. Minute and second fields that are absent or
    /// not numeric count as zero. Fields past the third are ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let mut fields = text.trim().split(':').map(str::trim);

        let hours = fields.next().and_then(parse_field)?;
        let minutes = fields.next().and_then(parse_field).unwrap_or(0);
        let seconds = fields.next().and_then(parse_field).unwrap_or(0);

        let goal = Self { hours, minutes, seconds };
        goal.checked_total_seconds().map(|_| goal)
    }

    /// Total duration in seconds: `h*3600 + m*60 + s`.
    pub fn total_seconds(&self) -> u64 {
        self.checked_total_seconds().unwrap_or(u64::MAX)
    }

    fn checked_total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Normalized goal time from a number of seconds.
    pub fn from_total_seconds(total: u64) -> Self {
        Self { hours: total / 3600, minutes: (total % 3600) / 60, seconds: total % 60 }
    }
}

fn parse_field(field: &str) -> Option<u64> {
    field.parse::<u64>().ok()
}

impl FromStr for GoalTime {
    type Err = PaceBandError;

    fn from_str(s: &str) -> Result<Self> {
        GoalTime::parse(s).ok_or_else(|| {
            PaceBandError::parse_error("goal time", format!("'{}' is not H:MM:SS", s))
        })
    }
}

impl fmt::Display for GoalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hms(self.total_seconds()))
    }
}
