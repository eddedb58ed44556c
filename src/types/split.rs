//! Split records

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::GoalTime;
use crate::format::format_hms;

/// Distance marker of a split row.
///
/// Whole markers serialize as integers, the finish marker as its formatted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Marker {
    /// Integer distance unit (1, 2, 3, ...)
    Whole(u32),
    /// Exact finish distance, already formatted
    Finish(String),
}

impl Marker {
    /// Whether this is the trailing finish marker
    pub fn is_finish(&self) -> bool {
        matches!(self, Marker::Finish(_))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Whole(unit) => write!(f, "{}", unit),
            Marker::Finish(label) => f.write_str(label),
        }
    }
}

/// Cumulative elapsed time, whole seconds. Serializes as `H:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedTime(pub u64);

impl ElapsedTime {
    /// Whole seconds since the start
    pub fn seconds(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hms(self.0))
    }
}

impl Serialize for ElapsedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ElapsedTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        GoalTime::parse(&text)
            .map(|time| ElapsedTime(time.total_seconds()))
            .ok_or_else(|| de::Error::custom(format!("invalid elapsed time '{}'", text)))
    }
}

/// One row of the pace band
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Distance marker
    pub marker: Marker,
    /// Cumulative time at the marker
    pub elapsed: ElapsedTime,
}

impl SplitRecord {
    /// Record at an integer marker
    pub fn whole(unit: u32, elapsed_seconds: u64) -> Self {
        Self { marker: Marker::Whole(unit), elapsed: ElapsedTime(elapsed_seconds) }
    }

    /// Trailing record at the finish
    pub fn finish(label: impl Into<String>, elapsed_seconds: u64) -> Self {
        Self { marker: Marker::Finish(label.into()), elapsed: ElapsedTime(elapsed_seconds) }
    }
}
