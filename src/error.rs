//! Error types for split computation and band export.
//!
//! All errors implement the `std::error::Error` trait and carry structured context.
//! Nothing in this crate is fatal to the hosting process: every failure is scoped
//! to a single user action.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: Goal time, unit or distance text that could not be understood
//! - **Distance Errors**: Non-positive, non-finite or oversized race distances
//! - **Capture Errors**: Rasterizing the band surface failed
//! - **Compose Errors**: Building the PDF document failed after a successful capture
//! - **Export Gate Errors**: An export was requested while another was in flight
//! - **Config / File Errors**: Reading configuration or writing output failed
//!
//! ## User-facing messages
//!
//! Export failures are reported to the user exactly once. Use
//! [`PaceBandError::user_message`] for that notification:
//!
//! ```rust
//! use paceband::PaceBandError;
//!
//! let error = PaceBandError::capture_failed("surface is empty");
//! assert!(!error.is_retryable());
//! println!("{}", error.user_message());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pace band operations.
pub type Result<T, E = PaceBandError> = std::result::Result<T, E>;

/// Main error type for pace band operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PaceBandError {
    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Invalid race distance {value}: {reason}")]
    InvalidDistance { value: f64, reason: String },

    #[error("Band capture failed: {reason}")]
    Capture {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Document composition failed: {reason}")]
    Compose {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Configuration error in {path}: {details}")]
    Config { path: PathBuf, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PaceBandError {
    /// Returns whether the failed action can simply be attempted again by the user.
    ///
    /// Nothing is retried automatically; this only classifies the failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            PaceBandError::ExportInProgress => true,
            PaceBandError::File { .. } => true,
            PaceBandError::Parse { .. } => false,
            PaceBandError::InvalidDistance { .. } => false,
            PaceBandError::Capture { .. } => false,
            PaceBandError::Compose { .. } => false,
            PaceBandError::Config { .. } => false,
        }
    }

    /// Single user-facing notification text for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            PaceBandError::Parse { .. } => "The goal time or distance could not be read.",
            PaceBandError::InvalidDistance { .. } => "The race distance must be a positive number.",
            PaceBandError::Capture { .. } => "The pace band could not be captured for printing.",
            PaceBandError::Compose { .. } => "The printable document could not be created.",
            PaceBandError::ExportInProgress => "An export is already running. Please wait.",
            PaceBandError::Config { .. } => "The configuration file is invalid.",
            PaceBandError::File { .. } => "The file could not be read or written.",
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PaceBandError::Parse { .. } => vec![
                "Enter the goal time as H:MM:SS",
                "Use km or mi as the distance unit",
                "Use marathon, half or a positive number as the distance",
            ],
            PaceBandError::InvalidDistance { .. } => vec![
                "Use a distance greater than zero",
                "Pick a standard distance (marathon or half)",
            ],
            PaceBandError::Capture { .. } => vec![
                "Check the band has at least one split",
                "Use a capture scale of 2 or more",
                "Try again with fewer cells per row",
            ],
            PaceBandError::Compose { .. } => vec![
                "Use more cells per row so the band fits on one page",
                "Check the band width and top margin settings",
            ],
            PaceBandError::ExportInProgress => {
                vec!["Wait for the running export to finish", "Try the export again"]
            }
            PaceBandError::Config { .. } => vec![
                "Check the YAML syntax of the configuration file",
                "Remove unknown or misspelled keys",
            ],
            PaceBandError::File { .. } => vec![
                "Check the file exists and is readable",
                "Check the output directory is writable",
                "Ensure sufficient disk space",
            ],
        }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        PaceBandError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for distance validation errors.
    pub fn invalid_distance(value: f64, reason: impl Into<String>) -> Self {
        PaceBandError::InvalidDistance { value, reason: reason.into() }
    }

    /// Helper constructor for capture errors.
    pub fn capture_failed(reason: impl Into<String>) -> Self {
        PaceBandError::Capture { reason: reason.into(), source: None }
    }

    /// Helper constructor for capture errors with source.
    pub fn capture_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PaceBandError::Capture { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for compose errors.
    pub fn compose_failed(reason: impl Into<String>) -> Self {
        PaceBandError::Compose { reason: reason.into(), source: None }
    }

    /// Helper constructor for compose errors with source.
    pub fn compose_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        PaceBandError::Compose { reason: reason.into(), source: Some(source) }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        PaceBandError::Config { path: path.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        PaceBandError::File { path, source }
    }
}

impl From<std::io::Error> for PaceBandError {
    fn from(err: std::io::Error) -> Self {
        PaceBandError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
