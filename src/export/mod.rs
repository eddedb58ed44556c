//! Print export pipeline
//!
//! Export is rasterize-then-embed: the band surface is captured to a bitmap at an
//! oversampling factor, then the bitmap is placed on a single A4 page at a fixed
//! physical width. The printed size therefore never depends on screen resolution.
//!
//! ```text
//! BandSurface --Rasterizer--> Bitmap --DocumentComposer--> PDF bytes
//!      ^ viewport normalized for the capture, restored afterwards
//! ```
//!
//! The exporter is stateless; callers enforce single flight with an [`ExportGate`].

mod capture;
mod compose;
mod flight;
mod layout;

#[cfg(test)]
mod tests;

pub use capture::{
    Bitmap, BandRasterizer, CaptureOptions, DEFAULT_CAPTURE_SCALE, MAX_CAPTURE_PIXELS,
    MIN_CAPTURE_SCALE, Rasterizer, ScrollGuard,
};
pub use compose::{DocumentComposer, PdfComposer, PdfDocument};
pub use flight::{ExportGate, ExportPermit};
pub use layout::{
    BAND_WIDTH_MM, MM_PER_INCH, POINTS_PER_INCH, PageSize, Placement, TOP_MARGIN_MM,
    mm_to_points,
};

use image::Rgba;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::render::ScrollOffsets;
use crate::{PaceBandError, Result};

/// Prefix of every exported file name
pub const FILE_NAME_PREFIX: &str = "pace-band-";

/// Tunables for one export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    /// Capture oversampling factor
    pub scale: u32,
    pub page: PageSize,
    /// Printed band width
    pub band_width_mm: f32,
    /// Gap between the top page edge and the band
    pub top_margin_mm: f32,
    pub background: Rgba<u8>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CAPTURE_SCALE,
            page: PageSize::A4,
            band_width_mm: BAND_WIDTH_MM,
            top_margin_mm: TOP_MARGIN_MM,
            background: Rgba([255, 255, 255, 255]),
        }
    }
}

/// Finished single-page document
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page: PageSize,
    pub placement: Placement,
}

impl ExportedDocument {
    /// Write the document into `dir`.
    ///
    /// Bytes go to a `.part` file first and are renamed into place, so a failed write
    /// never leaves a truncated document under the final name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let target = dir.join(&self.file_name);
        let partial = dir.join(format!("{}.part", self.file_name));

        if let Err(e) = fs::write(&partial, &self.bytes) {
            let _ = fs::remove_file(&partial);
            return Err(PaceBandError::file_error(partial, e));
        }
        if let Err(e) = fs::rename(&partial, &target) {
            let _ = fs::remove_file(&partial);
            return Err(PaceBandError::file_error(target, e));
        }

        info!("Wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

/// File name for a document exported from `goal_text`.
///
/// The goal text is embedded literally; only characters that cannot appear in a file
/// name component (path separators and control characters) are replaced.
pub fn document_file_name(goal_text: &str) -> String {
    let seed: String = goal_text
        .chars()
        .map(|ch| if ch == '/' || ch == '\\' || ch.is_control() { '_' } else { ch })
        .collect();
    format!("{}{}.pdf", FILE_NAME_PREFIX, seed)
}

/// Captures a surface and composes it into a printable document
pub struct PrintExporter<R, C> {
    rasterizer: R,
    composer: C,
    settings: ExportSettings,
}

impl PrintExporter<BandRasterizer, PdfComposer> {
    /// Exporter for band surfaces writing PDF
    pub fn pdf(settings: ExportSettings) -> Self {
        Self::new(BandRasterizer::new(), PdfComposer::new(), settings)
    }
}

impl<R, C> PrintExporter<R, C>
where
    R: Rasterizer,
    C: DocumentComposer,
{
    pub fn new(rasterizer: R, composer: C, settings: ExportSettings) -> Self {
        Self { rasterizer, composer, settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Export `surface` to a single-page document named after `filename_seed`.
    ///
    /// The surface viewport is scrolled to the origin for the capture and restored
    /// before this returns, whatever the outcome. Failures are reported as
    /// [`PaceBandError::Capture`] or [`PaceBandError::Compose`] and nothing partial is
    /// returned.
    pub async fn export(
        &self,
        surface: &mut R::Surface,
        filename_seed: &str,
    ) -> Result<ExportedDocument> {
        info!("Exporting pace band for '{}' at {}x", filename_seed, self.settings.scale);

        let options = CaptureOptions {
            scale: self.settings.scale,
            background: self.settings.background,
            scroll: ScrollOffsets::ORIGIN,
        };
        let captured = {
            let guard = ScrollGuard::normalize(surface);
            self.rasterizer.capture(&guard, &options).await
        };
        let bitmap = captured
            .map_err(as_capture_error)
            .inspect_err(|e| warn!("Capture failed: {}", e))?;
        debug!("Captured {}x{} px bitmap", bitmap.width(), bitmap.height());

        let (bytes, placement) = self
            .compose(&bitmap)
            .map_err(as_compose_error)
            .inspect_err(|e| warn!("Compose failed: {}", e))?;

        let file_name = document_file_name(filename_seed);
        info!("Exported {} ({} bytes)", file_name, bytes.len());
        Ok(ExportedDocument { file_name, bytes, page: self.settings.page, placement })
    }

    fn compose(&self, bitmap: &Bitmap) -> Result<(Vec<u8>, Placement)> {
        let settings = &self.settings;
        let placement = Placement::centered(
            settings.page,
            bitmap.width(),
            bitmap.height(),
            settings.band_width_mm,
            settings.top_margin_mm,
        )?;

        let mut doc = self.composer.new_page(settings.page)?;
        self.composer.embed_image(&mut doc, bitmap, placement)?;
        let bytes = self.composer.save(doc)?;
        Ok((bytes, placement))
    }
}

fn as_capture_error(error: PaceBandError) -> PaceBandError {
    match error {
        PaceBandError::Capture { .. } => error,
        other => PaceBandError::capture_failed_with_source("rasterizer error", Box::new(other)),
    }
}

fn as_compose_error(error: PaceBandError) -> PaceBandError {
    match error {
        PaceBandError::Compose { .. } => error,
        other => PaceBandError::compose_failed_with_source("composer error", Box::new(other)),
    }
}
