//! Test doubles for the export pipeline
//!
//! Rasterizers and composers that record what they observed or fail on demand, plus
//! small builders for sample bands.

#![cfg(test)]

use std::sync::Mutex;
use std::time::Duration;

use crate::export::{
    BandRasterizer, Bitmap, CaptureOptions, DocumentComposer, PageSize, PdfComposer,
    PdfDocument, Placement, Rasterizer,
};
use crate::render::{BandStyle, BandSurface, ScrollOffsets, Viewport};
use crate::types::{DistanceUnit, RaceDistance, SplitRecord, StandardDistance};
use crate::{PaceBandError, Result, SplitCalculator};

/// Marathon in kilometres
pub fn marathon_km() -> RaceDistance {
    RaceDistance::standard(StandardDistance::Marathon, DistanceUnit::Kilometers)
}

/// Split rows for a 3 hour marathon
pub fn sample_splits() -> Vec<SplitRecord> {
    SplitCalculator::compute("3:00:00", &marathon_km()).unwrap_or_default()
}

/// Band surface for a 3 hour marathon, scrolled to `scroll`
pub fn sample_surface(scroll: ScrollOffsets) -> BandSurface {
    let mut surface = BandSurface::new("Goal 3:00:00", sample_splits(), BandStyle::default());
    surface.scroll_to(scroll);
    surface
}

/// Paints real bitmaps and records the viewport position seen at each capture
#[derive(Default)]
pub struct RecordingRasterizer {
    delay: Option<Duration>,
    observed: Mutex<Vec<ScrollOffsets>>,
}

impl RecordingRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` before painting
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), observed: Mutex::new(Vec::new()) }
    }

    pub fn observed(&self) -> Vec<ScrollOffsets> {
        self.observed.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Rasterizer for RecordingRasterizer {
    type Surface = BandSurface;

    async fn capture(&self, surface: &BandSurface, options: &CaptureOptions) -> Result<Bitmap> {
        if let Ok(mut seen) = self.observed.lock() {
            seen.push(surface.scroll_offsets());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        BandRasterizer::new().capture(surface, options).await
    }
}

/// Always fails, after recording the viewport position it was handed
#[derive(Default)]
pub struct FailingRasterizer {
    observed: Mutex<Vec<ScrollOffsets>>,
}

impl FailingRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> Vec<ScrollOffsets> {
        self.observed.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Rasterizer for FailingRasterizer {
    type Surface = BandSurface;

    async fn capture(&self, surface: &BandSurface, _options: &CaptureOptions) -> Result<Bitmap> {
        if let Ok(mut seen) = self.observed.lock() {
            seen.push(surface.scroll_offsets());
        }
        Err(PaceBandError::capture_failed("simulated rasterizer failure"))
    }
}

/// Returns a non-capture error, to check how the exporter classifies it
pub struct MisbehavingRasterizer;

#[async_trait::async_trait]
impl Rasterizer for MisbehavingRasterizer {
    type Surface = BandSurface;

    async fn capture(&self, _surface: &BandSurface, _options: &CaptureOptions) -> Result<Bitmap> {
        Err(PaceBandError::parse_error("rasterizer", "unexpected input"))
    }
}

/// Starts documents normally but refuses to embed images
#[derive(Default)]
pub struct FailingComposer {
    inner: PdfComposer,
}

impl FailingComposer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentComposer for FailingComposer {
    type Document = PdfDocument;

    fn new_page(&self, size: PageSize) -> Result<PdfDocument> {
        self.inner.new_page(size)
    }

    fn embed_image(
        &self,
        _doc: &mut PdfDocument,
        _bitmap: &Bitmap,
        _placement: Placement,
    ) -> Result<()> {
        Err(PaceBandError::compose_failed("simulated composer failure"))
    }

    fn save(&self, doc: PdfDocument) -> Result<Vec<u8>> {
        self.inner.save(doc)
    }
}
