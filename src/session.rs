//! Band session: the current configuration, its split table and the export gate
//!
//! A [`BandSession`] is what a presentation layer talks to. Setters recompute the
//! split table eagerly; goal text that cannot be parsed leaves the previous table
//! and surface in place. Exports go through a single-flight gate, so a second export
//! requested while one is running fails fast with
//! [`PaceBandError::ExportInProgress`].

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::BandConfig;
use crate::export::{
    BandRasterizer, DocumentComposer, ExportGate, ExportedDocument, PdfComposer, PrintExporter,
    Rasterizer,
};
use crate::render::{BandStyle, BandSurface, Viewport};
use crate::types::{DistanceUnit, GoalTime, RaceDistance, SplitRecord};
use crate::{PaceBandError, Result, SplitTable};

/// Stateful pace band session
pub struct BandSession<R = BandRasterizer, C = PdfComposer> {
    goal_text: String,
    distance: RaceDistance,
    style: BandStyle,
    table: SplitTable,
    title: String,
    surface: Mutex<BandSurface>,
    exporter: PrintExporter<R, C>,
    gate: ExportGate,
}

impl BandSession {
    /// Session writing PDF documents, configured from `config`
    pub fn from_config(config: &BandConfig) -> Result<Self> {
        Self::with_exporter(config, PrintExporter::pdf(config.export_settings()))
    }
}

impl<R, C> BandSession<R, C>
where
    R: Rasterizer<Surface = BandSurface>,
    C: DocumentComposer,
{
    /// Session with a custom export pipeline
    pub fn with_exporter(config: &BandConfig, exporter: PrintExporter<R, C>) -> Result<Self> {
        let distance = config.race_distance()?;
        let style = config.style();

        let mut session = Self {
            goal_text: config.goal_time.clone(),
            distance,
            style,
            table: SplitTable::new(),
            title: String::new(),
            surface: Mutex::new(BandSurface::new("", Vec::new(), style)),
            exporter,
            gate: ExportGate::new(),
        };
        session.recompute();
        Ok(session)
    }

    /// Goal time text as last entered
    pub fn goal_text(&self) -> &str {
        &self.goal_text
    }

    pub fn distance(&self) -> RaceDistance {
        self.distance
    }

    pub fn style(&self) -> &BandStyle {
        &self.style
    }

    /// Last successfully computed split table
    pub fn splits(&self) -> &[SplitRecord] {
        self.table.splits()
    }

    /// Change the goal time. Returns `false` when the text could not be parsed and the
    /// previous splits were kept.
    pub fn set_goal_time(&mut self, text: impl Into<String>) -> bool {
        self.goal_text = text.into();
        self.recompute()
    }

    /// Change the race distance
    pub fn set_distance(&mut self, distance: RaceDistance) -> bool {
        self.distance = distance;
        self.recompute()
    }

    /// Change the unit.
    ///
    /// A standard distance is re-selected from the fixed table in the new unit. Any
    /// other distance keeps its number and only changes its unit tag.
    pub fn set_unit(&mut self, unit: DistanceUnit) -> bool {
        let distance = match self.distance.with_unit(unit) {
            Some(standard) => standard,
            None => {
                debug!(
                    "{} is not a standard distance, keeping the number for {}",
                    self.distance, unit
                );
                self.distance.relabeled(unit)
            }
        };
        self.set_distance(distance)
    }

    /// Change theme, pattern or layout
    pub fn set_style(&mut self, style: BandStyle) {
        self.style = style;
        self.rebuild_surface();
    }

    /// Rendered band, for showing or scrolling
    pub fn surface_mut(&mut self) -> &mut BandSurface {
        self.surface.get_mut()
    }

    /// Whether an export is running
    pub fn is_exporting(&self) -> bool {
        self.gate.is_busy()
    }

    /// Export the current band.
    ///
    /// Fails with [`PaceBandError::ExportInProgress`] while another export from this
    /// session is running. The gate is released however the export ends.
    pub async fn export(&self) -> Result<ExportedDocument> {
        let Some(_permit) = self.gate.try_acquire() else {
            warn!("Export requested while another export is running");
            return Err(PaceBandError::ExportInProgress);
        };

        let mut surface = self.surface.lock().await;
        let result = self.exporter.export(&mut *surface, &self.goal_text).await;
        match &result {
            Ok(document) => info!("Session export finished: {}", document.file_name),
            Err(e) => warn!("{} ({})", e.user_message(), e),
        }
        result
    }

    fn recompute(&mut self) -> bool {
        if !self.table.update(&self.goal_text, &self.distance) {
            return false;
        }
        if let Some(goal) = GoalTime::parse(&self.goal_text) {
            self.title = format!("Goal {} | {}", goal, self.distance);
        }
        self.rebuild_surface();
        true
    }

    fn rebuild_surface(&mut self) {
        let surface = self.surface.get_mut();
        let scroll = surface.scroll_offsets();
        *surface = BandSurface::new(self.title.clone(), self.table.splits().to_vec(), self.style);
        surface.scroll_to(scroll);
    }
}
