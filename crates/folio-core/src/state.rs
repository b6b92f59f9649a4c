//! Reading position store
//!
//! Plain application state. Mutations live in [`crate::navigation`],
//! [`crate::preferences`] and [`crate::bookmarks`] as free functions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::config::{ReaderConfig, ThemeConfig};
use crate::layout::{Chapter, ColumnMode, LayoutParams, Page};
use crate::render::PageStyle;
use crate::surface::TextMeasurer;
use crate::theme::{ThemeColors, ThemeName};
use crate::{Error, Result};

/// Chapter and page being read.
///
/// In [`ReaderState::position`] the page index counts screens, so it is a
/// spread in double-column mode. Persisted positions (history, bookmarks)
/// always hold the first visible page instead; see
/// [`ReaderState::saved_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub chapter_index: usize,
    pub page_index: usize,
}

impl Position {
    pub fn new(chapter_index: usize, page_index: usize) -> Self {
        Self {
            chapter_index,
            page_index,
        }
    }
}

/// User-adjustable reading settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    pub font_size: f64,
    pub line_height: f64,
    pub theme: ThemeName,
}

impl ReaderSettings {
    pub fn from_config(reader: &ReaderConfig, theme: &ThemeConfig) -> Self {
        Self {
            font_size: reader.font_size,
            line_height: reader.line_height,
            theme: theme.theme_name(),
        }
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self::from_config(&ReaderConfig::default(), &ThemeConfig::default())
    }
}

/// Saved positions for one book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub histories: Vec<Position>,
    pub updated_at: DateTime<Utc>,
}

/// Size of the drawing area and its margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

#[derive(Debug, Clone)]
pub struct ReaderState {
    /// Title of the open book, `None` when nothing is open
    pub book_title: Option<String>,
    pub chapters: Vec<Chapter>,
    pub position: Position,
    /// Set while a page-turn animation is running
    pub is_animating: bool,
    pub column_mode: ColumnMode,
    pub settings: ReaderSettings,
    pub bookmarks: Vec<Bookmark>,
}

impl ReaderState {
    pub fn new(settings: ReaderSettings, column_mode: ColumnMode) -> Self {
        Self {
            book_title: None,
            chapters: Vec::new(),
            position: Position::default(),
            is_animating: false,
            column_mode,
            settings,
            bookmarks: Vec::new(),
        }
    }

    /// Replace the open book. `resume` is a persisted position; its page is
    /// clamped lazily by [`crate::navigation::reflow`].
    pub fn open_book(&mut self, book: Book, resume: Option<Position>) {
        self.book_title = Some(book.title.clone());
        self.chapters = book.into_chapters();
        let mut position = resume.map(|saved| self.screen_position(saved)).unwrap_or_default();
        position.chapter_index = position.chapter_index.min(self.chapters.len().saturating_sub(1));
        self.position = position;
        self.is_animating = false;
    }

    /// Current position with the first visible page as page index
    pub fn saved_position(&self) -> Position {
        Position::new(
            self.position.chapter_index,
            self.column_mode.first_page(self.position.page_index),
        )
    }

    /// Screen in the current column mode showing a persisted position
    pub fn screen_position(&self, saved: Position) -> Position {
        Position::new(saved.chapter_index, self.column_mode.screen_of(saved.page_index))
    }

    pub fn has_book(&self) -> bool {
        self.book_title.is_some() && !self.chapters.is_empty()
    }

    pub fn layout_params(&self, geometry: &Geometry) -> LayoutParams {
        LayoutParams {
            font_size_px: self.settings.font_size,
            line_height_px: self.settings.line_height,
            canvas_width_px: geometry.width,
            canvas_height_px: geometry.height,
            padding_px: geometry.padding,
            column_mode: self.column_mode,
        }
    }

    pub fn page_style(&self, geometry: &Geometry, colors: ThemeColors) -> PageStyle {
        PageStyle {
            font_size: self.settings.font_size,
            line_height: self.settings.line_height,
            padding: geometry.padding,
            column_mode: self.column_mode,
            colors,
        }
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.position.chapter_index)
    }

    /// Pages of a chapter split for the current settings and geometry
    pub fn ensure_split<M>(&mut self, chapter_index: usize, geometry: &Geometry, measurer: &M) -> Result<&[Page]>
    where
        M: TextMeasurer + ?Sized,
    {
        let params = self.layout_params(geometry);
        let chapter = self
            .chapters
            .get_mut(chapter_index)
            .ok_or(Error::ChapterOutOfRange(chapter_index))?;
        chapter.pages(&params, measurer)
    }

    /// Last valid page index of the current chapter, 0 if it is not split
    pub fn max_page_index(&self) -> usize {
        self.current_chapter()
            .and_then(|c| c.max_page_index(self.column_mode))
            .unwrap_or(0)
    }

    /// Bookmarked positions of the open book
    pub fn current_bookmarks(&self) -> &[Position] {
        self.book_title
            .as_ref()
            .and_then(|title| self.bookmarks.iter().find(|b| &b.title == title))
            .map(|b| b.histories.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CellMeasurer;
    use crate::test_support::book;

    #[test]
    fn test_open_book_clamps_chapter() {
        let mut state = ReaderState::new(ReaderSettings::default(), ColumnMode::Single);
        assert!(!state.has_book());
        state.open_book(book(2), Some(Position::new(9, 3)));
        assert!(state.has_book());
        assert_eq!(state.position, Position::new(1, 3));
        assert_eq!(state.chapters.len(), 2);
    }

    #[test]
    fn test_resume_converts_saved_page_to_spread() {
        let mut state = ReaderState::new(ReaderSettings::default(), ColumnMode::Double);
        state.open_book(book(2), Some(Position::new(1, 3)));
        assert_eq!(state.position, Position::new(1, 1));
        assert_eq!(state.saved_position(), Position::new(1, 2));
    }

    #[test]
    fn test_ensure_split_out_of_range() {
        let mut state = ReaderState::new(ReaderSettings::default(), ColumnMode::Single);
        state.open_book(book(1), None);
        let geometry = Geometry {
            width: 24.0,
            height: 10.0,
            padding: 2.0,
        };
        assert!(state.ensure_split(0, &geometry, &CellMeasurer).is_ok());
        assert!(matches!(
            state.ensure_split(4, &geometry, &CellMeasurer),
            Err(Error::ChapterOutOfRange(4))
        ));
    }

    #[test]
    fn test_max_page_index_unsplit_is_zero() {
        let mut state = ReaderState::new(ReaderSettings::default(), ColumnMode::Double);
        state.open_book(book(1), None);
        assert_eq!(state.max_page_index(), 0);
    }
}
