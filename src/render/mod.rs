//! Band rendering
//!
//! Projects a split table onto a paintable [`BandSurface`]. Theme and pattern keys
//! are resolved into a [`BandStyle`] here and nowhere else.

mod style;
mod surface;

pub use style::{BandStyle, DEFAULT_CELLS_PER_ROW, Palette, Pattern};
pub use surface::{
    BandSurface, CELL_HEIGHT, CELL_WIDTH, GLYPH_SIZE, HEADER_HEIGHT, PADDING, ScrollOffsets,
    Viewport,
};
