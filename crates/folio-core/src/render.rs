//! Page renderer
//!
//! Paints one screen (a page, or a two-page spread) onto a [`Surface`], either
//! directly on the live surface or through a scratch surface composited at a
//! horizontal offset for page-turn animations.

use tracing::trace;

use crate::layout::{ColumnMode, Page};
use crate::surface::{Font, Surface};
use crate::theme::ThemeColors;
use crate::{Error, Result};

/// Resolved drawing parameters for a screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStyle {
    pub font_size: f64,
    pub line_height: f64,
    pub padding: f64,
    pub column_mode: ColumnMode,
    pub colors: ThemeColors,
}

/// Draws pages, owning the scratch surface used for offset draws
#[derive(Debug)]
pub struct PageRenderer<S: Surface> {
    scratch: Option<S>,
}

impl<S: Surface> Default for PageRenderer<S> {
    fn default() -> Self {
        Self { scratch: None }
    }
}

impl<S: Surface> PageRenderer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw screen `page_index` of `pages` onto the live surface.
    ///
    /// A missing surface (not initialised yet) makes this a no-op.
    pub fn draw_page(&mut self, live: Option<&mut S>, pages: &[Page], page_index: usize, style: &PageStyle) {
        if let Err(e) = self.try_draw_page(live, pages, page_index, style) {
            trace!("Skipping draw of page {}: {}", page_index, e);
        }
    }

    /// Like [`Self::draw_page`], failing with [`Error::SurfaceUnavailable`]
    /// when there is nothing to draw on.
    pub fn try_draw_page(
        &mut self,
        live: Option<&mut S>,
        pages: &[Page],
        page_index: usize,
        style: &PageStyle,
    ) -> Result<()> {
        let surface = live.ok_or(Error::SurfaceUnavailable)?;
        surface.clear();
        paint_screen(surface, pages, page_index, style);
        Ok(())
    }

    /// Draw screen `page_index` into the scratch surface, then composite it
    /// onto `target` shifted by `x_offset`.
    pub fn draw_offset_page(
        &mut self,
        target: &mut S,
        pages: &[Page],
        page_index: usize,
        x_offset: f64,
        style: &PageStyle,
    ) {
        let mut scratch = match self.scratch.take() {
            Some(scratch) if scratch.same_size(target) => scratch,
            _ => target.create_scratch(),
        };

        scratch.clear();
        paint_screen(&mut scratch, pages, page_index, style);
        target.draw_surface(&scratch, x_offset);

        self.scratch = Some(scratch);
    }

    /// Background with a centred message, for screens without pages
    pub fn draw_placeholder(&mut self, live: Option<&mut S>, message: &str, style: &PageStyle) {
        let Some(surface) = live else {
            trace!("Skipping placeholder: {}", Error::SurfaceUnavailable);
            return;
        };
        surface.clear();
        fill_background(surface, style);

        let font = Font::regular(style.font_size);
        let x = ((surface.width() - surface.measure_text(message, &font)) / 2.0).max(0.0);
        let y = (surface.height() / 2.0).floor();
        surface.fill_text(message, x, y, &font, style.colors.text);
    }
}

fn fill_background<S: Surface>(surface: &mut S, style: &PageStyle) {
    let (width, height) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, width, height, style.colors.background);
}

/// Background plus the page(s) of one screen
fn paint_screen<S: Surface>(surface: &mut S, pages: &[Page], page_index: usize, style: &PageStyle) {
    fill_background(surface, style);
    let is_chapter_start = page_index == 0;

    match style.column_mode {
        ColumnMode::Single => {
            if let Some(page) = pages.get(page_index) {
                paint_page(surface, page, 0.0, is_chapter_start, style);
            }
        }
        ColumnMode::Double => {
            let left = page_index * 2;
            let half = surface.width() / 2.0;
            if let Some(page) = pages.get(left) {
                paint_page(surface, page, 0.0, is_chapter_start, style);
            }
            if let Some(page) = pages.get(left + 1) {
                paint_page(surface, page, half, false, style);
            }
        }
    }
}

/// Lines of one page; the chapter title line is bold and 1.2x larger
fn paint_page<S: Surface>(surface: &mut S, page: &Page, offset_x: f64, is_chapter_start: bool, style: &PageStyle) {
    let body = Font::regular(style.font_size);
    let title = Font::title(style.font_size);
    let x = style.padding + offset_x;
    let mut y = style.padding;

    for (i, line) in page.lines().iter().enumerate() {
        let font = if i == 0 && is_chapter_start { &title } else { &body };
        surface.fill_text(line, x, y, font, style.colors.text);
        y += style.line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CellSurface, Rgb};

    const COLORS: ThemeColors = ThemeColors {
        background: Rgb(241, 229, 201),
        text: Rgb(0, 0, 0),
    };

    fn style(column_mode: ColumnMode) -> PageStyle {
        PageStyle {
            font_size: 1.0,
            line_height: 1.0,
            padding: 1.0,
            column_mode,
            colors: COLORS,
        }
    }

    fn pages(count: usize) -> Vec<Page> {
        (0..count)
            .map(|i| Page::new(vec![format!("p{}a", i), format!("p{}b", i)]))
            .collect()
    }

    #[test]
    fn test_single_column_draws_one_page() {
        let mut surface = CellSurface::new(12, 4);
        let mut renderer = PageRenderer::new();
        renderer.draw_page(Some(&mut surface), &pages(3), 1, &style(ColumnMode::Single));

        assert_eq!(surface.row_text(0), " ".repeat(12));
        assert_eq!(surface.row_text(1), " p1a        ");
        assert_eq!(surface.row_text(2), " p1b        ");
        let cell = surface.cell(0, 0).unwrap();
        assert_eq!(cell.bg, COLORS.background);
    }

    #[test]
    fn test_title_line_bold_only_on_first_page() {
        let mut surface = CellSurface::new(12, 4);
        let mut renderer = PageRenderer::new();
        let s = style(ColumnMode::Single);

        renderer.draw_page(Some(&mut surface), &pages(2), 0, &s);
        assert!(surface.cell(1, 1).unwrap().bold);
        assert!(!surface.cell(1, 2).unwrap().bold);

        renderer.draw_page(Some(&mut surface), &pages(2), 1, &s);
        assert!(!surface.cell(1, 1).unwrap().bold);
    }

    #[test]
    fn test_double_column_pairing_with_missing_right_page() {
        let mut surface = CellSurface::new(20, 4);
        let mut renderer = PageRenderer::new();
        // 5 pages: spread 2 shows page index 4 alone
        renderer.draw_page(Some(&mut surface), &pages(5), 2, &style(ColumnMode::Double));

        assert_eq!(surface.row_text(1), " p4a                ");
        assert_eq!(surface.row_text(2), " p4b                ");
        for x in 10..20 {
            let cell = surface.cell(x, 1).unwrap();
            assert_eq!(cell.symbol, ' ');
            assert_eq!(cell.bg, COLORS.background);
        }
    }

    #[test]
    fn test_double_column_first_spread() {
        let mut surface = CellSurface::new(20, 4);
        let mut renderer = PageRenderer::new();
        renderer.draw_page(Some(&mut surface), &pages(5), 0, &style(ColumnMode::Double));

        assert_eq!(surface.row_text(1), " p0a       p1a      ");
        assert!(surface.cell(1, 1).unwrap().bold);
        assert!(!surface.cell(11, 1).unwrap().bold);
    }

    #[test]
    fn test_missing_page_leaves_blank_screen() {
        let mut surface = CellSurface::new(8, 3);
        let mut renderer = PageRenderer::new();
        renderer.draw_page(Some(&mut surface), &pages(1), 7, &style(ColumnMode::Single));
        for y in 0..3 {
            assert_eq!(surface.row_text(y), " ".repeat(8));
        }
    }

    #[test]
    fn test_unavailable_surface_is_noop() {
        let mut renderer: PageRenderer<CellSurface> = PageRenderer::new();
        renderer.draw_page(None, &pages(2), 0, &style(ColumnMode::Single));
        renderer.draw_placeholder(None, "no content", &style(ColumnMode::Single));
    }

    #[test]
    fn test_try_draw_reports_missing_surface() {
        let mut renderer = PageRenderer::new();
        let s = style(ColumnMode::Single);
        assert!(matches!(
            renderer.try_draw_page(None, &pages(2), 0, &s),
            Err(Error::SurfaceUnavailable)
        ));

        let mut surface = CellSurface::new(12, 4);
        assert!(renderer.try_draw_page(Some(&mut surface), &pages(2), 1, &s).is_ok());
        assert_eq!(surface.row_text(1), " p1a        ");
    }

    #[test]
    fn test_offset_draw_matches_direct_draw_at_zero() {
        let s = style(ColumnMode::Double);
        let mut direct = CellSurface::new(20, 4);
        let mut renderer = PageRenderer::new();
        renderer.draw_page(Some(&mut direct), &pages(4), 1, &s);

        let mut target = CellSurface::new(20, 4);
        renderer.draw_offset_page(&mut target, &pages(4), 1, 0.0, &s);
        assert_eq!(target, direct);
    }

    #[test]
    fn test_offset_draw_shifts_content() {
        let s = style(ColumnMode::Single);
        let mut target = CellSurface::new(10, 3);
        let mut renderer = PageRenderer::new();
        renderer.draw_offset_page(&mut target, &pages(1), 0, 5.0, &s);

        assert_eq!(target.row_text(1), "      p0a ");
        // Left of the shifted page stays blank
        assert_eq!(target.cell(0, 1).unwrap().bg, Rgb::BLACK);
        assert_eq!(target.cell(5, 1).unwrap().bg, COLORS.background);
    }

    #[test]
    fn test_scratch_follows_target_size() {
        let s = style(ColumnMode::Single);
        let mut renderer = PageRenderer::new();
        let mut small = CellSurface::new(6, 3);
        renderer.draw_offset_page(&mut small, &pages(1), 0, 0.0, &s);
        let mut large = CellSurface::new(12, 3);
        renderer.draw_offset_page(&mut large, &pages(1), 0, 0.0, &s);
        assert_eq!(large.cell(11, 0).unwrap().bg, COLORS.background);
    }

    #[test]
    fn test_placeholder_is_centred() {
        let mut surface = CellSurface::new(14, 5);
        let mut renderer = PageRenderer::new();
        renderer.draw_placeholder(Some(&mut surface), "no content", &style(ColumnMode::Single));
        assert_eq!(surface.row_text(2), "  no content  ");
    }
}
