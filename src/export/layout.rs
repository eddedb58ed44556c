//! Physical page geometry
//!
//! All placement is done in millimetres. The band is embedded at a fixed physical
//! width regardless of how many pixels the capture produced, so the printed band
//! always has the same real-world size.

use crate::{PaceBandError, Result};

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;
/// PDF user space units per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Printed width of the band, millimetres
pub const BAND_WIDTH_MM: f32 = 180.0;
/// Distance from the top page edge to the band, millimetres
pub const TOP_MARGIN_MM: f32 = 10.0;

/// Convert millimetres to PDF points
pub fn mm_to_points(mm: f32) -> f32 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Page size in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize { width_mm: 210.0, height_mm: 297.0 };

    /// Width in PDF points
    pub fn width_points(&self) -> f32 {
        mm_to_points(self.width_mm)
    }

    /// Height in PDF points
    pub fn height_points(&self) -> f32 {
        mm_to_points(self.height_mm)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Where the band image goes on the page, millimetres from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Placement {
    /// Center a `pixel_width` x `pixel_height` bitmap horizontally at `width_mm`,
    /// keeping its aspect ratio, `top_margin_mm` below the top edge.
    ///
    /// Fails when the bitmap is empty or the band does not fit on the page.
    pub fn centered(
        page: PageSize,
        pixel_width: u32,
        pixel_height: u32,
        width_mm: f32,
        top_margin_mm: f32,
    ) -> Result<Self> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(PaceBandError::compose_failed("captured bitmap is empty"));
        }
        if !(width_mm > 0.0 && width_mm <= page.width_mm) {
            return Err(PaceBandError::compose_failed(format!(
                "band width {}mm does not fit a {}mm page",
                width_mm, page.width_mm
            )));
        }

        let height_mm = width_mm * pixel_height as f32 / pixel_width as f32;
        if !(top_margin_mm >= 0.0 && top_margin_mm + height_mm <= page.height_mm) {
            return Err(PaceBandError::compose_failed(format!(
                "band height {:.1}mm plus {}mm margin exceeds the {}mm page",
                height_mm, top_margin_mm, page.height_mm
            )));
        }

        let x_mm = (page.width_mm - width_mm) / 2.0;
        Ok(Self { x_mm, y_mm: top_margin_mm, width_mm, height_mm })
    }

    /// Lower-left corner in PDF user space (origin bottom-left), points
    pub fn pdf_origin(&self, page: PageSize) -> (f32, f32) {
        let x = mm_to_points(self.x_mm);
        let y = mm_to_points(page.height_mm - self.y_mm - self.height_mm);
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_a4_in_points() {
        assert!(close(PageSize::A4.width_points(), 595.2756));
        assert!(close(PageSize::A4.height_points(), 841.8898));
    }

    #[test]
    fn test_centered_keeps_aspect_and_width() {
        let placement =
            Placement::centered(PageSize::A4, 2_400, 800, BAND_WIDTH_MM, TOP_MARGIN_MM).unwrap();
        assert!(close(placement.width_mm, 180.0));
        assert!(close(placement.height_mm, 60.0));
        assert!(close(placement.x_mm, 15.0));
        assert!(close(placement.y_mm, 10.0));
    }

    #[test]
    fn test_width_is_independent_of_pixel_density() {
        let low = Placement::centered(PageSize::A4, 600, 200, BAND_WIDTH_MM, TOP_MARGIN_MM).unwrap();
        let high =
            Placement::centered(PageSize::A4, 2_400, 800, BAND_WIDTH_MM, TOP_MARGIN_MM).unwrap();
        assert_eq!(low, high);
    }

    #[test]
    fn test_too_tall_band_is_rejected() {
        let result = Placement::centered(PageSize::A4, 100, 1_000, BAND_WIDTH_MM, TOP_MARGIN_MM);
        assert!(matches!(result, Err(PaceBandError::Compose { .. })));
    }

    #[test]
    fn test_non_finite_margin_is_rejected() {
        for margin in [f32::NAN, f32::INFINITY, -1.0] {
            let result = Placement::centered(PageSize::A4, 2_400, 800, BAND_WIDTH_MM, margin);
            assert!(matches!(result, Err(PaceBandError::Compose { .. })), "margin {}", margin);
        }
        let nan_width = Placement::centered(PageSize::A4, 2_400, 800, f32::NAN, TOP_MARGIN_MM);
        assert!(matches!(nan_width, Err(PaceBandError::Compose { .. })));
    }

    #[test]
    fn test_empty_bitmap_is_rejected() {
        assert!(Placement::centered(PageSize::A4, 0, 10, BAND_WIDTH_MM, TOP_MARGIN_MM).is_err());
    }

    #[test]
    fn test_pdf_origin_flips_vertical_axis() {
        let placement =
            Placement::centered(PageSize::A4, 2_400, 800, BAND_WIDTH_MM, TOP_MARGIN_MM).unwrap();
        let (x, y) = placement.pdf_origin(PageSize::A4);
        assert!(close(x, mm_to_points(15.0)));
        assert!(close(y, mm_to_points(297.0 - 10.0 - 60.0)));
    }
}
