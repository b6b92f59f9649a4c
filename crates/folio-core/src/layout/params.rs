use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One page per screen, or two pages side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnMode {
    Single,
    #[default]
    Double,
}

impl ColumnMode {
    pub fn from_single(single: bool) -> Self {
        if single {
            ColumnMode::Single
        } else {
            ColumnMode::Double
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ColumnMode::Single => ColumnMode::Double,
            ColumnMode::Double => ColumnMode::Single,
        }
    }

    /// Pages shown on one screen
    pub fn pages_per_screen(self) -> usize {
        match self {
            ColumnMode::Single => 1,
            ColumnMode::Double => 2,
        }
    }

    /// Index of the first page on screen `screen`
    pub fn first_page(self, screen: usize) -> usize {
        screen.saturating_mul(self.pages_per_screen())
    }

    /// Index of the screen showing page `page`
    pub fn screen_of(self, page: usize) -> usize {
        page / self.pages_per_screen()
    }
}

/// Everything the splitter's output depends on besides the text itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub font_size_px: f64,
    pub line_height_px: f64,
    pub canvas_width_px: f64,
    pub canvas_height_px: f64,
    pub padding_px: f64,
    pub column_mode: ColumnMode,
}

impl LayoutParams {
    /// Width a display line may occupy
    pub fn available_width(&self) -> f64 {
        match self.column_mode {
            ColumnMode::Single => self.canvas_width_px - 2.0 * self.padding_px,
            ColumnMode::Double => self.canvas_width_px / 2.0 - 2.0 * self.padding_px,
        }
    }

    /// Height at which a page is closed
    pub fn available_height(&self) -> f64 {
        self.canvas_height_px - 2.0 * self.padding_px
    }

    /// Reject geometry that cannot hold a single line
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size_px > 0.0) {
            return Err(Error::Layout(format!(
                "font size must be positive, got {}",
                self.font_size_px
            )));
        }
        if !(self.line_height_px > 0.0) {
            return Err(Error::Layout(format!(
                "line height must be positive, got {}",
                self.line_height_px
            )));
        }
        let width = self.available_width();
        if !(width > 0.0) {
            return Err(Error::Layout(format!(
                "no horizontal room: {}x{} canvas with padding {} leaves width {}",
                self.canvas_width_px, self.canvas_height_px, self.padding_px, width
            )));
        }
        let height = self.available_height();
        if !(height > 0.0) {
            return Err(Error::Layout(format!(
                "no vertical room: {}x{} canvas with padding {} leaves height {}",
                self.canvas_width_px, self.canvas_height_px, self.padding_px, height
            )));
        }
        Ok(())
    }
}
