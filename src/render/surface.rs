//! Band surface: the visual layout the exporter captures
//!
//! A [`BandSurface`] lays split records out as a grid of cells (marker above elapsed
//! time) under a one-line header. Geometry is expressed in logical pixels and painted
//! at an integer scale, so the same surface can be shown on screen at 1x and captured
//! at a higher oversampling factor for print.
//!
//! Like any scrollable view, the surface has a viewport offset. Painting honours the
//! difference between the viewport and the offset the capture expects, which is why
//! the exporter normalizes the viewport before capturing.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use super::style::BandStyle;
use crate::types::SplitRecord;

/// Glyph cell size of the bitmap font, logical pixels
pub const GLYPH_SIZE: u32 = 8;
/// Outer padding around the band, logical pixels
pub const PADDING: u32 = 8;
/// Header strip height, logical pixels
pub const HEADER_HEIGHT: u32 = 24;
/// Split cell width, logical pixels
pub const CELL_WIDTH: u32 = 72;
/// Split cell height, logical pixels
pub const CELL_HEIGHT: u32 = 36;

/// Scroll position of a viewport, logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ScrollOffsets {
    pub x: u32,
    pub y: u32,
}

impl ScrollOffsets {
    pub const ORIGIN: ScrollOffsets = ScrollOffsets { x: 0, y: 0 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Anything with a scrollable viewport
pub trait Viewport {
    /// Current scroll position
    fn scroll_offsets(&self) -> ScrollOffsets;

    /// Move the viewport
    fn scroll_to(&mut self, offsets: ScrollOffsets);
}

/// Rendered pace band, ready to be captured
#[derive(Debug, Clone, PartialEq)]
pub struct BandSurface {
    title: String,
    rows: Vec<SplitRecord>,
    style: BandStyle,
    scroll: ScrollOffsets,
}

impl BandSurface {
    /// Lay out `rows` under `title` with the given style
    pub fn new(title: impl Into<String>, rows: Vec<SplitRecord>, style: BandStyle) -> Self {
        Self { title: title.into(), rows, style, scroll: ScrollOffsets::ORIGIN }
    }

    /// Header text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Split rows shown on the band
    pub fn rows(&self) -> &[SplitRecord] {
        &self.rows
    }

    /// Resolved style
    pub fn style(&self) -> &BandStyle {
        &self.style
    }

    /// Number of cell lines in the grid
    pub fn grid_lines(&self) -> u32 {
        let cells = self.rows.len() as u32;
        cells.div_ceil(self.cells_per_row())
    }

    /// Number of cell columns in the grid
    pub fn grid_columns(&self) -> u32 {
        (self.rows.len() as u32).clamp(1, self.cells_per_row())
    }

    fn cells_per_row(&self) -> u32 {
        self.style.cells_per_row.max(1)
    }

    /// Width and height at 1x, logical pixels.
    ///
    /// The band is never narrower than its header line.
    pub fn logical_size(&self) -> (u32, u32) {
        let title_width = self.title.chars().count() as u32 * GLYPH_SIZE;
        let width = 2 * PADDING + (self.grid_columns() * CELL_WIDTH).max(title_width);
        let height = 2 * PADDING + HEADER_HEIGHT + self.grid_lines() * CELL_HEIGHT;
        (width, height)
    }

    /// Paint the whole surface at `scale`.
    ///
    /// Content is shifted by the viewport offset relative to `expected_scroll`; with
    /// both at the same position the band is painted from its top-left corner.
    pub fn paint(
        &self,
        scale: u32,
        background: Rgba<u8>,
        expected_scroll: ScrollOffsets,
    ) -> RgbaImage {
        let scale = scale.max(1);
        let (width, height) = self.logical_size();
        let shift_x = i64::from(self.scroll.x) - i64::from(expected_scroll.x);
        let shift_y = i64::from(self.scroll.y) - i64::from(expected_scroll.y);

        let mut painter = Painter {
            image: RgbaImage::from_pixel(width * scale, height * scale, background),
            scale,
            shift_x,
            shift_y,
        };
        let palette = self.style.palette;

        painter.fill(0, 0, width, height, palette.background);
        let title = self.title.to_ascii_uppercase();
        painter.text_centered(&title, PADDING, width - 2 * PADDING, PADDING + 8, palette.accent);

        let per_row = self.cells_per_row();
        for (index, record) in self.rows.iter().enumerate() {
            let index = index as u32;
            let (line, column) = (index / per_row, index % per_row);
            let x = PADDING + column * CELL_WIDTH;
            let y = PADDING + HEADER_HEIGHT + line * CELL_HEIGHT;

            if self.style.pattern.shades(line, column) {
                painter.fill(x, y, CELL_WIDTH, CELL_HEIGHT, palette.shade);
            }
            painter.outline(x, y, CELL_WIDTH, CELL_HEIGHT, palette.grid);

            let marker_color =
                if record.marker.is_finish() { palette.accent } else { palette.text };
            let elapsed = record.elapsed.to_string();
            painter.text_centered(&record.marker.to_string(), x, CELL_WIDTH, y + 6, marker_color);
            painter.text_centered(&elapsed, x, CELL_WIDTH, y + 21, palette.text);
        }

        painter.image
    }
}

impl Viewport for BandSurface {
    fn scroll_offsets(&self) -> ScrollOffsets {
        self.scroll
    }

    fn scroll_to(&mut self, offsets: ScrollOffsets) {
        self.scroll = offsets;
    }
}

/// Draws logical-pixel shapes onto a scaled, shifted bitmap. Out-of-bounds drawing
/// is clipped.
struct Painter {
    image: RgbaImage,
    scale: u32,
    shift_x: i64,
    shift_y: i64,
}

impl Painter {
    fn rect(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }
        let scale = i64::from(self.scale);
        let left = (i64::from(x) - self.shift_x) * scale;
        let top = (i64::from(y) - self.shift_y) * scale;
        let left = i32::try_from(left).ok()?;
        let top = i32::try_from(top).ok()?;
        Some(Rect::at(left, top).of_size(width * self.scale, height * self.scale))
    }

    fn fill(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
        if let Some(rect) = self.rect(x, y, width, height) {
            draw_filled_rect_mut(&mut self.image, rect, color);
        }
    }

    fn outline(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
        if let Some(rect) = self.rect(x, y, width, height) {
            draw_hollow_rect_mut(&mut self.image, rect, color);
        }
    }

    fn text_centered(&mut self, text: &str, x: u32, width: u32, y: u32, color: Rgba<u8>) {
        let text_width = text.chars().count() as u32 * GLYPH_SIZE;
        let left = x + width.saturating_sub(text_width) / 2;
        self.text(text, left, y, color);
    }

    fn text(&mut self, text: &str, x: u32, y: u32, color: Rgba<u8>) {
        for (index, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else {
                continue;
            };
            let origin_x = x + index as u32 * GLYPH_SIZE;
            for (row, bits) in glyph.iter().enumerate() {
                for column in 0..GLYPH_SIZE {
                    if bits & (1 << column) != 0 {
                        self.fill(origin_x + column, y + row as u32, 1, 1, color);
                    }
                }
            }
        }
    }
}
