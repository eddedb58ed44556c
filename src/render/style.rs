//! Band styling: palettes and background patterns
//!
//! Theme and pattern keys are opaque to the calculator and the exporter; only the
//! renderer looks them up here. Unknown keys fall back to the defaults.

use image::Rgba;
use tracing::debug;

/// Default number of split cells per band row
pub const DEFAULT_CELLS_PER_ROW: u32 = 10;

/// Colours used to paint a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba<u8>,
    pub text: Rgba<u8>,
    pub accent: Rgba<u8>,
    pub grid: Rgba<u8>,
    pub shade: Rgba<u8>,
}

impl Palette {
    pub const CLASSIC: Palette = Palette {
        background: Rgba([255, 255, 255, 255]),
        text: Rgba([20, 20, 20, 255]),
        accent: Rgba([200, 30, 45, 255]),
        grid: Rgba([150, 150, 150, 255]),
        shade: Rgba([235, 235, 235, 255]),
    };

    pub const NIGHT: Palette = Palette {
        background: Rgba([18, 22, 36, 255]),
        text: Rgba([240, 240, 240, 255]),
        accent: Rgba([255, 196, 0, 255]),
        grid: Rgba([80, 90, 120, 255]),
        shade: Rgba([32, 38, 58, 255]),
    };

    pub const FOREST: Palette = Palette {
        background: Rgba([244, 248, 240, 255]),
        text: Rgba([24, 48, 28, 255]),
        accent: Rgba([46, 125, 50, 255]),
        grid: Rgba([120, 150, 120, 255]),
        shade: Rgba([220, 235, 215, 255]),
    };

    /// Palette for a theme key, defaulting to [`Palette::CLASSIC`]
    pub fn for_theme(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "classic" | "" => Palette::CLASSIC,
            "night" | "dark" => Palette::NIGHT,
            "forest" => Palette::FOREST,
            other => {
                debug!("Unknown theme '{}', using classic", other);
                Palette::CLASSIC
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::CLASSIC
    }
}

/// Cell background pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    #[default]
    Plain,
    /// Every other band row shaded
    Stripes,
    /// Alternating cells shaded
    Checker,
}

impl Pattern {
    /// Pattern for a key, defaulting to [`Pattern::Plain`]
    pub fn for_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "plain" | "" => Pattern::Plain,
            "stripes" => Pattern::Stripes,
            "checker" => Pattern::Checker,
            other => {
                debug!("Unknown pattern '{}', using plain", other);
                Pattern::Plain
            }
        }
    }

    /// Whether the cell at (`row`, `column`) is shaded
    pub fn shades(self, row: u32, column: u32) -> bool {
        match self {
            Pattern::Plain => false,
            Pattern::Stripes => row % 2 == 1,
            Pattern::Checker => (row + column) % 2 == 1,
        }
    }
}

/// Resolved styling for a band surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandStyle {
    pub palette: Palette,
    pub pattern: Pattern,
    pub cells_per_row: u32,
}

impl BandStyle {
    /// Resolve theme and pattern keys
    pub fn from_keys(theme: &str, pattern: &str, cells_per_row: u32) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            pattern: Pattern::for_key(pattern),
            cells_per_row: cells_per_row.max(1),
        }
    }
}

impl Default for BandStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            pattern: Pattern::default(),
            cells_per_row: DEFAULT_CELLS_PER_ROW,
        }
    }
}
