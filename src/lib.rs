//! Pace band split tables and print-ready export.
//!
//! Paceband turns a target finish time and a race distance into the cumulative split
//! table a runner wears on the wrist, renders it as a themable band and exports it as
//! a single-page PDF whose printed width is fixed in millimetres.
//!
//! # Features
//!
//! - **Split computation**: pure, deterministic, one row per whole unit plus the finish
//! - **Lossless unit switching**: standard distances are re-selected from a fixed table
//! - **Print fidelity**: the band is always printed 180 mm wide on A4
//! - **Single-flight export**: concurrent export requests fail fast
//!
//! # Quick Start
//!
//! ```rust
//! use paceband::{PaceBand, types::{DistanceUnit, RaceDistance, StandardDistance}};
//!
//! let marathon = RaceDistance::standard(StandardDistance::Marathon, DistanceUnit::Kilometers);
//! let splits = PaceBand::splits("3:00:00", &marathon)?;
//!
//! assert_eq!(splits.len(), 43);
//! assert_eq!(splits[0].elapsed.to_string(), "0:04:15");
//! assert_eq!(splits[42].marker.to_string(), "42.195");
//! # Ok::<(), paceband::PaceBandError>(())
//! ```
//!
//! ## Example (PDF export)
//!
//! ```rust,no_run
//! use paceband::{BandConfig, PaceBand};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> paceband::Result<()> {
//!     let session = PaceBand::session(&BandConfig::default())?;
//!     let document = session.export().await?;
//!     document.write_to(".")?;
//!     Ok(())
//! }
//! ```

mod calculator;
pub mod config;
mod error;
pub mod export;
mod format;
pub mod render;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod types;

pub use calculator::{SplitCalculator, SplitTable};
pub use config::{BandConfig, DistanceSpec, ExportConfig};
pub use error::*;
pub use export::{ExportSettings, ExportedDocument, PrintExporter, document_file_name};
pub use format::{format_decimal, format_hms};
pub use render::{BandStyle, BandSurface};
pub use session::BandSession;
pub use types::*;

/// Entry point for one-off split computation and PDF sessions.
pub struct PaceBand;

impl PaceBand {
    /// Compute the split table for `goal_text` over `distance`.
    ///
    /// Unlike [`SplitCalculator::compute`], unparseable goal text is reported as a
    /// [`PaceBandError::Parse`] instead of a silent no-op.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paceband::{PaceBand, types::{DistanceUnit, RaceDistance}};
    ///
    /// let ten_k = RaceDistance::new(10.0, DistanceUnit::Kilometers)?;
    /// assert!(PaceBand::splits("abc", &ten_k).is_err());
    /// assert_eq!(PaceBand::splits("0:50:00", &ten_k)?.len(), 11);
    /// # Ok::<(), paceband::PaceBandError>(())
    /// ```
    pub fn splits(goal_text: &str, distance: &RaceDistance) -> Result<Vec<SplitRecord>> {
        let goal: GoalTime = goal_text.parse()?;
        Ok(SplitCalculator::splits_for(goal, distance))
    }

    /// Open a session that exports PDF documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured distance is invalid.
    pub fn session(config: &BandConfig) -> Result<BandSession> {
        BandSession::from_config(config)
    }
}
