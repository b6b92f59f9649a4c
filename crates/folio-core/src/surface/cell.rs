//! In-memory cell grid surface
//!
//! One surface unit is one terminal cell. Glyph advances are rounded to
//! whole cells so that measuring and drawing always agree.

use unicode_width::UnicodeWidthChar;

use super::{Font, Rgb, Surface, TextMeasurer};

/// Symbol stored in the trailing half of a double-width glyph
const CONTINUATION: char = '\0';

/// A single cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        symbol: ' ',
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
        bold: false,
    };

    /// Whether this cell is covered by the glyph to its left
    pub fn is_continuation(&self) -> bool {
        self.symbol == CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Cell advance of one glyph at the given font size
fn glyph_advance(c: char, font: &Font) -> usize {
    match c.width() {
        Some(0) | None => 0,
        Some(w) => ((w as f64 * font.size_px).round() as usize).max(1),
    }
}

/// Standalone measurer for callers that have no surface yet
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl TextMeasurer for CellMeasurer {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        text.chars().map(|c| glyph_advance(c, font)).sum::<usize>() as f64
    }
}

/// Grid of cells implementing [`Surface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            self.cells.get_mut(y * self.width + x)
        } else {
            None
        }
    }

    /// Text of one row with continuation cells removed
    pub fn row_text(&self, y: usize) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.symbol)
            .collect()
    }

    /// Resize the grid, discarding its content
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::BLANK; width * height];
    }
}

impl TextMeasurer for CellSurface {
    fn measure_text(&self, text: &str, font: &Font) -> f64 {
        CellMeasurer.measure_text(text, font)
    }
}

impl Surface for CellSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let x0 = x.floor().max(0.0) as usize;
        let y0 = y.floor().max(0.0) as usize;
        let x1 = ((x + width).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((y + height).ceil().max(0.0) as usize).min(self.height);

        for row in y0..y1 {
            for col in x0..x1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = Cell {
                        symbol: ' ',
                        fg: color,
                        bg: color,
                        bold: false,
                    };
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &Font, color: Rgb) {
        let row = y.floor();
        if row < 0.0 || row >= self.height as f64 {
            return;
        }
        let row = row as usize;
        let mut col = x.floor() as i64;

        for c in text.chars() {
            let advance = glyph_advance(c, font);
            if advance == 0 {
                continue;
            }
            let span = c.width().unwrap_or(1).min(advance);

            if col >= 0 && (col as usize) + span <= self.width {
                let start = col as usize;
                let bg = self.cell(start, row).map(|cell| cell.bg).unwrap_or_default();
                if let Some(cell) = self.cell_mut(start, row) {
                    *cell = Cell {
                        symbol: c,
                        fg: color,
                        bg,
                        bold: font.bold,
                    };
                }
                for extra in 1..span {
                    if let Some(cell) = self.cell_mut(start + extra, row) {
                        *cell = Cell {
                            symbol: CONTINUATION,
                            fg: color,
                            bg,
                            bold: font.bold,
                        };
                    }
                }
            }
            col += advance as i64;
        }
    }

    fn draw_surface(&mut self, source: &Self, offset_x: f64) {
        let shift = offset_x.floor() as i64;
        let rows = self.height.min(source.height);

        for row in 0..rows {
            for src_col in 0..source.width {
                let dst_col = src_col as i64 + shift;
                if dst_col < 0 || dst_col >= self.width as i64 {
                    continue;
                }
                if let Some(cell) = source.cell(src_col, row).copied() {
                    // A wide glyph cut at the left edge leaves a dangling half
                    let cell = if dst_col == 0 && cell.is_continuation() {
                        Cell {
                            symbol: ' ',
                            ..cell
                        }
                    } else {
                        cell
                    };
                    if let Some(dst) = self.cell_mut(dst_col as usize, row) {
                        *dst = cell;
                    }
                }
            }
        }
    }

    fn create_scratch(&self) -> Self {
        Self::new(self.width, self.height)
    }
}
