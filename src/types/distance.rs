//! Race distances, units and the standard distance table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{PaceBandError, Result};

/// Tolerance, in the current unit, for recognising a standard distance.
pub const STANDARD_TOLERANCE: f64 = 0.1;

/// Largest distance accepted, in either unit. Bounds the split table size.
pub const MAX_DISTANCE: f64 = 10_000.0;

/// Distance unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    /// Short unit label (`km` / `mi`)
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Decimal places used for a non-standard finish marker
    pub fn finish_precision(self) -> usize {
        match self {
            DistanceUnit::Kilometers => 3,
            DistanceUnit::Miles => 2,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = PaceBandError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(PaceBandError::parse_error(
                "distance unit",
                format!("'{}' is not km or mi", other),
            )),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Fixed race lengths recognised by the unit switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardDistance {
    #[serde(alias = "full")]
    Marathon,
    #[serde(rename = "half")]
    HalfMarathon,
}

impl StandardDistance {
    pub const ALL: [StandardDistance; 2] =
        [StandardDistance::Marathon, StandardDistance::HalfMarathon];

    /// Length in the given unit, from the fixed table
    pub fn in_unit(self, unit: DistanceUnit) -> f64 {
        match (self, unit) {
            (StandardDistance::Marathon, DistanceUnit::Kilometers) => 42.195,
            (StandardDistance::Marathon, DistanceUnit::Miles) => 26.2188,
            (StandardDistance::HalfMarathon, DistanceUnit::Kilometers) => 21.0975,
            (StandardDistance::HalfMarathon, DistanceUnit::Miles) => 13.1094,
        }
    }

    /// Canonical finish marker text for this distance in the given unit
    pub fn marker_label(self, unit: DistanceUnit) -> &'static str {
        match (self, unit) {
            (StandardDistance::Marathon, DistanceUnit::Kilometers) => "42.195",
            (StandardDistance::Marathon, DistanceUnit::Miles) => "26.2188",
            (StandardDistance::HalfMarathon, DistanceUnit::Kilometers) => "21.0975",
            (StandardDistance::HalfMarathon, DistanceUnit::Miles) => "13.1094",
        }
    }

    /// Find the standard distance within [`STANDARD_TOLERANCE`] of `value`
    pub fn matching(value: f64, unit: DistanceUnit) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|standard| (value - standard.in_unit(unit)).abs() < STANDARD_TOLERANCE)
    }
}

impl FromStr for StandardDistance {
    type Err = PaceBandError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marathon" | "full" => Ok(StandardDistance::Marathon),
            "half" | "half-marathon" | "halfmarathon" => Ok(StandardDistance::HalfMarathon),
            other => Err(PaceBandError::parse_error(
                "standard distance",
                format!("'{}' is not marathon or half", other),
            )),
        }
    }
}

/// A positive race distance tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceDistance {
    value: f64,
    unit: DistanceUnit,
}

impl RaceDistance {
    /// Create a distance, rejecting zero, negative, non-finite and oversized values.
    pub fn new(value: f64, unit: DistanceUnit) -> Result<Self> {
        if !value.is_finite() {
            return Err(PaceBandError::invalid_distance(value, "must be a finite number"));
        }
        if value <= 0.0 {
            return Err(PaceBandError::invalid_distance(value, "must be greater than zero"));
        }
        if value > MAX_DISTANCE {
            return Err(PaceBandError::invalid_distance(
                value,
                format!("must not exceed {}", MAX_DISTANCE),
            ));
        }
        Ok(Self { value, unit })
    }

    /// A standard distance taken from the fixed table
    pub fn standard(distance: StandardDistance, unit: DistanceUnit) -> Self {
        Self { value: distance.in_unit(unit), unit }
    }

    /// Distance value in its own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit tag
    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Number of whole units covered (`floor(distance)`)
    pub fn whole_units(&self) -> u32 {
        self.value.floor() as u32
    }

    /// Standard distance within tolerance of this one, if any
    pub fn standard_match(&self) -> Option<StandardDistance> {
        StandardDistance::matching(self.value, self.unit)
    }

    /// Switch unit by re-selecting the equivalent standard distance.
    ///
    /// The stored number is never converted arithmetically. Returns `None` when the
    /// current distance is not a standard distance; what happens then is up to the
    /// caller. Switching to the current unit returns the distance unchanged.
    pub fn with_unit(&self, unit: DistanceUnit) -> Option<Self> {
        if unit == self.unit {
            return Some(*self);
        }
        self.standard_match().map(|standard| Self::standard(standard, unit))
    }

    /// Same number under a different unit tag, without conversion
    pub fn relabeled(&self, unit: DistanceUnit) -> Self {
        Self { value: self.value, unit }
    }

    /// Finish marker text: the table literal for standard distances, otherwise the
    /// unit's decimal precision with trailing zeros stripped.
    pub fn marker_label(&self) -> String {
        match StandardDistance::ALL.into_iter().find(|s| s.in_unit(self.unit) == self.value) {
            Some(standard) => standard.marker_label(self.unit).to_string(),
            None => crate::format::format_decimal(self.value, self.unit.finish_precision()),
        }
    }
}

impl fmt::Display for RaceDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.marker_label(), self.unit)
    }
}
