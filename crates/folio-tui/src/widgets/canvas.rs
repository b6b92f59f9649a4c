use folio_core::surface::CellSurface;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::theme::to_color;

/// Presents the live page surface in a terminal area
pub struct CanvasWidget<'a> {
    surface: &'a CellSurface,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(surface: &'a CellSurface) -> Self {
        Self { surface }
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = (area.width as usize).min(self.surface.columns());
        let rows = (area.height as usize).min(self.surface.rows());

        for y in 0..rows {
            for x in 0..columns {
                let Some(cell) = self.surface.cell(x, y) else {
                    continue;
                };
                let position = (area.x + x as u16, area.y + y as u16);
                let Some(target) = buf.cell_mut(position) else {
                    continue;
                };

                let mut style = Style::default().fg(to_color(cell.fg)).bg(to_color(cell.bg));
                style = if cell.bold {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style.remove_modifier(Modifier::BOLD)
                };
                target.set_style(style);

                // The wide glyph to the left already covers this column
                if cell.is_continuation() {
                    target.set_symbol("");
                } else {
                    target.set_char(cell.symbol);
                }
            }
        }
    }
}
