//! Text-to-page layout
//!
//! - `params` - layout geometry and column mode
//! - `splitter` - greedy packing of lines into pages
//! - `chapter` - chapter text with its memoized pages

mod chapter;
mod params;
mod splitter;

pub use chapter::Chapter;
pub use params::{ColumnMode, LayoutParams};
pub use splitter::split_text_to_pages;

use serde::{Deserialize, Serialize};

/// One screenful of pre-wrapped display lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// A page holding a single empty line
    pub fn empty() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Number of screens needed to show `page_count` pages
pub fn screen_count(page_count: usize, column_mode: ColumnMode) -> usize {
    page_count.div_ceil(column_mode.pages_per_screen())
}
