//! Surface capture
//!
//! Rasterization is sensitive to the current scroll offset of the surface: a capture
//! taken while the viewport is scrolled comes out cropped or shifted. The
//! [`ScrollGuard`] moves the viewport to the origin for the duration of a capture and
//! puts it back when dropped, on success and failure alike.

use image::{Rgba, RgbaImage};
use std::ops::Deref;
use tracing::{debug, trace};

use crate::render::{BandSurface, ScrollOffsets, Viewport};
use crate::{PaceBandError, Result};

/// Smallest oversampling factor accepted for print captures
pub const MIN_CAPTURE_SCALE: u32 = 2;
/// Default oversampling factor
pub const DEFAULT_CAPTURE_SCALE: u32 = 3;
/// Upper bound on captured pixels (width * height)
pub const MAX_CAPTURE_PIXELS: u64 = 64 * 1024 * 1024;

/// Options passed to a [`Rasterizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Integer oversampling factor
    pub scale: u32,
    /// Colour behind anything the surface does not paint
    pub background: Rgba<u8>,
    /// Scroll position the capture assumes the viewport is at
    pub scroll: ScrollOffsets,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_CAPTURE_SCALE,
            background: Rgba([255, 255, 255, 255]),
            scroll: ScrollOffsets::ORIGIN,
        }
    }
}

/// Captured raster of a surface
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Packed 8-bit RGB samples, alpha dropped
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.image.pixels().flat_map(|pixel| [pixel[0], pixel[1], pixel[2]]).collect()
    }
}

/// Rasterizer capability: turns a surface into a bitmap
///
/// Implementations may suspend (e.g. to paint off the async executor) but must not
/// move the surface's viewport themselves.
#[async_trait::async_trait]
pub trait Rasterizer: Send + Sync {
    /// Surface type this rasterizer can capture
    type Surface: Viewport + Send + Sync;

    /// Capture `surface` with the given options
    async fn capture(&self, surface: &Self::Surface, options: &CaptureOptions) -> Result<Bitmap>;
}

/// Viewport scrolled to a fixed position for as long as the guard lives
pub struct ScrollGuard<'a, V: Viewport> {
    surface: &'a mut V,
    saved: ScrollOffsets,
}

impl<'a, V: Viewport> ScrollGuard<'a, V> {
    /// Remember the current scroll position and move the viewport to `target`
    pub fn scroll(surface: &'a mut V, target: ScrollOffsets) -> Self {
        let saved = surface.scroll_offsets();
        if saved != target {
            debug!("Normalizing viewport from {:?} to {:?} for capture", saved, target);
            surface.scroll_to(target);
        }
        Self { surface, saved }
    }

    /// Move the viewport to the origin
    pub fn normalize(surface: &'a mut V) -> Self {
        Self::scroll(surface, ScrollOffsets::ORIGIN)
    }

    /// Scroll position that will be restored
    pub fn saved(&self) -> ScrollOffsets {
        self.saved
    }
}

impl<V: Viewport> Deref for ScrollGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &*self.surface
    }
}

impl<V: Viewport> Drop for ScrollGuard<'_, V> {
    fn drop(&mut self) {
        trace!("Restoring viewport to {:?}", self.saved);
        self.surface.scroll_to(self.saved);
    }
}

/// Rasterizer for [`BandSurface`]
///
/// Painting runs on the blocking thread pool so a large capture does not stall the
/// async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandRasterizer;

impl BandRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn check(surface: &BandSurface, options: &CaptureOptions) -> Result<()> {
        if options.scale < MIN_CAPTURE_SCALE {
            return Err(PaceBandError::capture_failed(format!(
                "scale {} is below the print minimum of {}",
                options.scale, MIN_CAPTURE_SCALE
            )));
        }
        if surface.rows().is_empty() {
            return Err(PaceBandError::capture_failed("band has no splits to capture"));
        }

        let (width, height) = surface.logical_size();
        let scale = u64::from(options.scale);
        let pixels = u64::from(width) * scale * u64::from(height) * scale;
        if pixels > MAX_CAPTURE_PIXELS {
            return Err(PaceBandError::capture_failed(format!(
                "capture of {}x{} at {}x exceeds {} pixels",
                width, height, options.scale, MAX_CAPTURE_PIXELS
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Rasterizer for BandRasterizer {
    type Surface = BandSurface;

    async fn capture(&self, surface: &BandSurface, options: &CaptureOptions) -> Result<Bitmap> {
        Self::check(surface, options)?;

        let snapshot = surface.clone();
        let options = *options;
        let image = tokio::task::spawn_blocking(move || {
            snapshot.paint(options.scale, options.background, options.scroll)
        })
        .await
        .map_err(|e| PaceBandError::capture_failed(format!("paint task failed: {}", e)))?;

        debug!("Captured band at {}x: {}x{} px", options.scale, image.width(), image.height());
        Ok(Bitmap::new(image))
    }
}
