//! Band configuration file
//!
//! Configuration is plain YAML. Every field has a default, so an empty file (or no
//! file at all) describes a 3 hour marathon in kilometres on the classic theme.
//!
//! ```yaml
//! goal_time: "3:00:00"
//! distance: marathon      # marathon | half | <number>
//! unit: km                # km | mi
//! theme: classic
//! pattern: plain
//! cells_per_row: 10
//! export:
//!   scale: 3
//!   output_dir: "."
//!   band_width_mm: 180.0
//!   top_margin_mm: 10.0
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::export::{BAND_WIDTH_MM, DEFAULT_CAPTURE_SCALE, ExportSettings, TOP_MARGIN_MM};
use crate::render::{BandStyle, DEFAULT_CELLS_PER_ROW};
use crate::types::{DistanceUnit, RaceDistance, StandardDistance};
use crate::{PaceBandError, Result};

/// Goal time used when none is configured
pub const DEFAULT_GOAL_TIME: &str = "3:00:00";

/// Distance as written in configuration: a standard race name or a number
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistanceSpec {
    Standard(StandardDistance),
    Custom(f64),
}

impl DistanceSpec {
    /// Resolve against a unit. Standard names use the fixed table.
    pub fn resolve(self, unit: DistanceUnit) -> Result<RaceDistance> {
        match self {
            DistanceSpec::Standard(standard) => Ok(RaceDistance::standard(standard, unit)),
            DistanceSpec::Custom(value) => RaceDistance::new(value, unit),
        }
    }
}

impl Default for DistanceSpec {
    fn default() -> Self {
        DistanceSpec::Standard(StandardDistance::Marathon)
    }
}

impl FromStr for DistanceSpec {
    type Err = PaceBandError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(standard) = s.parse::<StandardDistance>() {
            return Ok(DistanceSpec::Standard(standard));
        }
        s.trim().parse::<f64>().map(DistanceSpec::Custom).map_err(|_| {
            PaceBandError::parse_error(
                "distance",
                format!("'{}' is not marathon, half or a number", s.trim()),
            )
        })
    }
}

impl fmt::Display for DistanceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceSpec::Standard(StandardDistance::Marathon) => f.write_str("marathon"),
            DistanceSpec::Standard(StandardDistance::HalfMarathon) => f.write_str("half"),
            DistanceSpec::Custom(value) => write!(f, "{}", value),
        }
    }
}

/// Export section of the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub scale: u32,
    pub output_dir: PathBuf,
    pub band_width_mm: f32,
    pub top_margin_mm: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CAPTURE_SCALE,
            output_dir: PathBuf::from("."),
            band_width_mm: BAND_WIDTH_MM,
            top_margin_mm: TOP_MARGIN_MM,
        }
    }
}

/// Complete band configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    pub goal_time: String,
    pub distance: DistanceSpec,
    pub unit: DistanceUnit,
    pub theme: String,
    pub pattern: String,
    pub cells_per_row: u32,
    pub export: ExportConfig,

    /// Keys this version does not know about
    #[serde(flatten, skip_serializing)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            goal_time: DEFAULT_GOAL_TIME.to_string(),
            distance: DistanceSpec::default(),
            unit: DistanceUnit::default(),
            theme: "classic".to_string(),
            pattern: "plain".to_string(),
            cells_per_row: DEFAULT_CELLS_PER_ROW,
            export: ExportConfig::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

impl BandConfig {
    /// Read configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| PaceBandError::file_error(path.to_path_buf(), e))?;
        debug!("Loaded configuration from {}", path.display());
        Self::parse(&text, path)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, origin: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: BandConfig = serde_yaml_ng::from_str(text)
            .map_err(|e| PaceBandError::config_error(origin, e.to_string()))?;

        if !config.unknown_fields.is_empty() {
            let mut keys: Vec<&str> = config.unknown_fields.keys().map(String::as_str).collect();
            keys.sort_unstable();
            warn!(
                "Ignoring unknown configuration keys in {}: {}",
                origin.display(),
                keys.join(", ")
            );
        }
        Ok(config)
    }

    /// Configured race distance
    pub fn race_distance(&self) -> Result<RaceDistance> {
        self.distance.resolve(self.unit)
    }

    /// Resolved band style
    pub fn style(&self) -> BandStyle {
        BandStyle::from_keys(&self.theme, &self.pattern, self.cells_per_row)
    }

    /// Export tunables
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            scale: self.export.scale,
            band_width_mm: self.export.band_width_mm,
            top_margin_mm: self.export.top_margin_mm,
            ..ExportSettings::default()
        }
    }
}
