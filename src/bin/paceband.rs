//! Paceband command line tool.
//!
//! Usage:
//! ```bash
//! # Split table for a 3 hour marathon
//! paceband splits --goal 3:00:00 --distance marathon
//!
//! # Half marathon in miles, as JSON
//! paceband splits --goal 1:45:00 --distance half --unit mi --format json
//!
//! # Print-ready PDF into ./out, with a PNG preview of the band
//! paceband --config band.yaml export --theme night --output out --preview band.png
//! ```

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use paceband::export::{BandRasterizer, CaptureOptions, Rasterizer};
use paceband::{
    BandConfig, DistanceSpec, DistanceUnit, GoalTime, PaceBand, PaceBandError, RaceDistance,
    SplitRecord,
};

#[derive(Parser)]
#[command(
    name = "paceband",
    version,
    about = "Pace band split tables and printable PDF bands",
    long_about = "Compute cumulative split times for a goal finish time and export them as a \
                  pace band printed at a fixed physical width"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the split table
    Splits {
        #[command(flatten)]
        band: BandArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write the band as a single-page PDF
    Export {
        #[command(flatten)]
        band: BandArgs,

        /// Colour theme (classic, night, forest)
        #[arg(long)]
        theme: Option<String>,

        /// Cell pattern (plain, stripes, checker)
        #[arg(long)]
        pattern: Option<String>,

        /// Split cells per band row
        #[arg(long)]
        cells_per_row: Option<u32>,

        /// Capture oversampling factor
        #[arg(long)]
        scale: Option<u32>,

        /// Output directory
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also save the captured band as PNG
        #[arg(long)]
        preview: Option<PathBuf>,
    },
}

/// Flags shared by every subcommand that describes a band
#[derive(Args)]
struct BandArgs {
    /// Goal finish time, H:MM:SS
    #[arg(long, short = 'g')]
    goal: Option<String>,

    /// Race distance: marathon, half or a number
    #[arg(long, short = 'd')]
    distance: Option<DistanceSpec>,

    /// Distance unit (km or mi)
    #[arg(long, short = 'u')]
    unit: Option<DistanceUnit>,
}

impl BandArgs {
    fn apply(self, config: &mut BandConfig) {
        if let Some(goal) = self.goal {
            config.goal_time = goal;
        }
        if let Some(distance) = self.distance {
            config.distance = distance;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Serialize)]
struct SplitReport<'a> {
    goal_time: &'a str,
    distance: RaceDistance,
    splits: &'a [SplitRecord],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => BandConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => BandConfig::default(),
    };

    match cli.command {
        Command::Splits { band, format } => {
            band.apply(&mut config);
            print_splits(&config, format)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Export { band, theme, pattern, cells_per_row, scale, output, preview } => {
            band.apply(&mut config);
            if let Some(theme) = theme {
                config.theme = theme;
            }
            if let Some(pattern) = pattern {
                config.pattern = pattern;
            }
            if let Some(cells) = cells_per_row {
                config.cells_per_row = cells;
            }
            if let Some(scale) = scale {
                config.export.scale = scale;
            }
            if let Some(output) = output {
                config.export.output_dir = output;
            }
            export(&config, preview).await
        }
    }
}

fn print_splits(config: &BandConfig, format: OutputFormat) -> Result<()> {
    let distance = config.race_distance()?;
    let splits = PaceBand::splits(&config.goal_time, &distance)?;
    debug!("{} splits for {} over {}", splits.len(), config.goal_time, distance);

    match format {
        OutputFormat::Table => {
            println!("{:>9}  {:>9}", distance.unit().abbreviation(), "elapsed");
            for record in &splits {
                println!("{:>9}  {:>9}", record.marker.to_string(), record.elapsed.to_string());
            }
        }
        OutputFormat::Json => {
            let report = SplitReport { goal_time: &config.goal_time, distance, splits: &splits };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

async fn export(config: &BandConfig, preview: Option<PathBuf>) -> Result<ExitCode> {
    let goal: GoalTime = config.goal_time.parse()?;
    let mut session = PaceBand::session(config)?;
    info!("Exporting band for {} over {}", goal, session.distance());

    if let Some(path) = preview {
        let options = CaptureOptions { scale: config.export.scale, ..CaptureOptions::default() };
        let bitmap = BandRasterizer::new().capture(session.surface_mut(), &options).await?;
        bitmap
            .into_image()
            .save(&path)
            .with_context(|| format!("failed to write preview {}", path.display()))?;
        info!("Wrote preview {}", path.display());
    }

    let document = match session.export().await {
        Ok(document) => document,
        Err(error) => {
            report_export_failure(&error);
            return Ok(ExitCode::FAILURE);
        }
    };

    let dir = &config.export.output_dir;
    if !dir.is_dir() {
        bail!("output directory {} does not exist", dir.display());
    }
    let path = document.write_to(dir)?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Export failures get exactly one user-facing message
fn report_export_failure(error: &PaceBandError) {
    eprintln!("{}", error.user_message());
    for suggestion in error.recovery_suggestions() {
        eprintln!("  - {}", suggestion);
    }
    debug!("Export error detail: {:?}", error);
}
