//! Drawing surface boundary
//!
//! The layout engine only needs text widths, the renderer needs a handful of
//! raster primitives. Both are expressed as traits so the core never depends
//! on a concrete backend.

mod cell;

pub use cell::{Cell, CellMeasurer, CellSurface};

use std::fmt;

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Font used for measuring and drawing a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size_px: f64,
    pub bold: bool,
}

impl Font {
    /// Scale applied to a chapter's title line
    pub const TITLE_SCALE: f64 = 1.2;

    pub fn regular(size_px: f64) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    /// Bold font at 1.2x the body size
    pub fn title(body_size_px: f64) -> Self {
        Self {
            size_px: body_size_px * Self::TITLE_SCALE,
            bold: true,
        }
    }
}

/// Text width measurement hook used by the page splitter.
pub trait TextMeasurer {
    /// Measure rendered text width for the provided font.
    fn measure_text(&self, text: &str, font: &Font) -> f64;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        (**self).measure_text(text, font)
    }
}

/// Raster target the page renderer paints on.
///
/// Coordinates are in surface units with the origin at the top-left corner
/// and text drawn with a top baseline.
pub trait Surface: TextMeasurer + Sized {
    fn width(&self) -> f64;

    fn height(&self) -> f64;

    /// Reset every unit of the surface to its blank state
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &Font, color: Rgb);

    /// Composite `source` onto this surface translated horizontally by
    /// `offset_x`. Content falling outside this surface is clipped.
    fn draw_surface(&mut self, source: &Self, offset_x: f64);

    /// A blank surface with the same dimensions, used as an offscreen buffer
    fn create_scratch(&self) -> Self;

    fn same_size(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}
