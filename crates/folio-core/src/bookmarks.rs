//! Bookmarks and reading history

use chrono::Utc;
use tracing::{debug, info};

use crate::state::{Bookmark, Position, ReaderState};
use crate::storage::StoreCommand;

/// Bookmark the current position of the open book.
///
/// Returns `None` when no book is open or the screen is already marked.
pub fn add_bookmark(state: &mut ReaderState) -> Option<StoreCommand> {
    let title = state.book_title.clone()?;
    if bookmark_on_screen(state).is_some() {
        return None;
    }
    let position = state.saved_position();

    match state.bookmarks.iter_mut().find(|b| b.title == title) {
        Some(bookmark) => {
            bookmark.histories.push(position);
            bookmark.updated_at = Utc::now();
        }
        None => state.bookmarks.push(Bookmark {
            title,
            histories: vec![position],
            updated_at: Utc::now(),
        }),
    }

    debug!("Bookmarked {}:{}", position.chapter_index, position.page_index);
    Some(StoreCommand::SaveBookmarks(state.bookmarks.clone()))
}

/// Saved bookmark of the open book shown on the current screen
pub fn bookmark_on_screen(state: &ReaderState) -> Option<Position> {
    state
        .current_bookmarks()
        .iter()
        .copied()
        .find(|saved| state.screen_position(*saved) == state.position)
}

/// Screen of the next (or previous) bookmark, wrapping around the book
pub fn cycle_bookmark(state: &ReaderState, forward: bool) -> Option<Position> {
    let mut screens: Vec<Position> = state
        .current_bookmarks()
        .iter()
        .map(|saved| state.screen_position(*saved))
        .collect();
    screens.sort_by_key(|p| (p.chapter_index, p.page_index));
    screens.dedup();

    let key = |p: &Position| (p.chapter_index, p.page_index);
    let current = key(&state.position);
    if forward {
        screens
            .iter()
            .find(|p| key(p) > current)
            .or_else(|| screens.first())
            .copied()
    } else {
        screens
            .iter()
            .rev()
            .find(|p| key(p) < current)
            .or_else(|| screens.last())
            .copied()
    }
}

/// Remove one saved position (as persisted) of the open book
pub fn remove_bookmark(state: &mut ReaderState, position: Position) -> Option<StoreCommand> {
    let title = state.book_title.as_ref()?;
    let index = state.bookmarks.iter().position(|b| &b.title == title)?;

    let bookmark = &mut state.bookmarks[index];
    let before = bookmark.histories.len();
    bookmark.histories.retain(|p| *p != position);
    if bookmark.histories.len() == before {
        return None;
    }
    bookmark.updated_at = Utc::now();
    if bookmark.histories.is_empty() {
        state.bookmarks.remove(index);
    }
    Some(StoreCommand::SaveBookmarks(state.bookmarks.clone()))
}

/// Close the open book, returning the history entry to persist.
pub fn close_book(state: &mut ReaderState) -> Option<StoreCommand> {
    let position = state.saved_position();
    let title = state.book_title.take()?;
    info!("Closing '{}' at {}:{}", title, position.chapter_index, position.page_index);

    state.chapters.clear();
    state.position = Position::default();
    state.is_animating = false;
    Some(StoreCommand::SaveHistory { title, position })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnMode;
    use crate::navigation::reflow;
    use crate::state::ReaderSettings;
    use crate::surface::CellMeasurer;
    use crate::test_support::{book, double_geometry, single_geometry};

    fn state() -> ReaderState {
        let mut state = ReaderState::new(ReaderSettings::default(), ColumnMode::Single);
        state.open_book(book(2), None);
        state
    }

    #[test]
    fn test_add_bookmark_dedupes() {
        let mut s = state();
        assert!(add_bookmark(&mut s).is_some());
        assert!(add_bookmark(&mut s).is_none());
        s.position = Position::new(1, 2);
        let command = add_bookmark(&mut s);

        assert_eq!(s.current_bookmarks(), &[Position::new(0, 0), Position::new(1, 2)]);
        assert!(matches!(command, Some(StoreCommand::SaveBookmarks(ref all)) if all.len() == 1));
    }

    #[test]
    fn test_bookmarks_are_per_book() {
        let mut s = state();
        add_bookmark(&mut s);
        let mut other = book(1);
        other.title = "Other".to_string();
        s.open_book(other, None);
        assert!(s.current_bookmarks().is_empty());
        add_bookmark(&mut s);
        assert_eq!(s.bookmarks.len(), 2);
    }

    #[test]
    fn test_remove_bookmark() {
        let mut s = state();
        add_bookmark(&mut s);
        assert!(remove_bookmark(&mut s, Position::new(4, 4)).is_none());
        assert!(remove_bookmark(&mut s, Position::new(0, 0)).is_some());
        assert!(s.bookmarks.is_empty());
    }

    #[test]
    fn test_no_book_no_bookmark() {
        let mut s = ReaderState::new(ReaderSettings::default(), ColumnMode::Single);
        assert!(add_bookmark(&mut s).is_none());
        assert!(close_book(&mut s).is_none());
    }

    #[test]
    fn test_bookmarks_persist_first_visible_page() {
        let mut s = ReaderState::new(ReaderSettings::default(), ColumnMode::Double);
        s.open_book(book(2), None);
        s.position = Position::new(1, 1);
        assert!(add_bookmark(&mut s).is_some());
        assert_eq!(s.current_bookmarks(), &[Position::new(1, 2)]);

        // Page 3 shares spread 1 with page 2
        s.bookmarks[0].histories = vec![Position::new(1, 3)];
        assert_eq!(bookmark_on_screen(&s), Some(Position::new(1, 3)));
        assert!(add_bookmark(&mut s).is_none());
    }

    #[test]
    fn test_cycle_bookmark_wraps() {
        let mut s = state();
        for position in [Position::new(1, 2), Position::new(0, 3)] {
            s.position = position;
            add_bookmark(&mut s);
        }
        s.position = Position::new(0, 0);
        assert_eq!(cycle_bookmark(&s, true), Some(Position::new(0, 3)));
        s.position = Position::new(0, 3);
        assert_eq!(cycle_bookmark(&s, true), Some(Position::new(1, 2)));
        s.position = Position::new(1, 2);
        assert_eq!(cycle_bookmark(&s, true), Some(Position::new(0, 3)));
        assert_eq!(cycle_bookmark(&s, false), Some(Position::new(0, 3)));
        s.position = Position::new(0, 3);
        assert_eq!(cycle_bookmark(&s, false), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_cycle_without_bookmarks() {
        let s = state();
        assert_eq!(cycle_bookmark(&s, true), None);
        assert_eq!(bookmark_on_screen(&s), None);
    }

    #[test]
    fn test_history_saved_in_single_resumes_in_double() {
        let mut s = state();
        s.position = Position::new(0, 1);
        let Some(StoreCommand::SaveHistory { position, .. }) = close_book(&mut s) else {
            panic!("expected a history entry");
        };
        assert_eq!(position, Position::new(0, 1));

        let mut double = ReaderState::new(ReaderSettings::default(), ColumnMode::Double);
        double.open_book(book(1), Some(position));
        reflow(&mut double, &double_geometry(), &CellMeasurer).unwrap();
        // Page 1 is the right half of spread 0
        assert_eq!(double.position, Position::new(0, 0));
    }

    #[test]
    fn test_history_saved_in_double_resumes_in_single() {
        let mut s = ReaderState::new(ReaderSettings::default(), ColumnMode::Double);
        s.open_book(book(1), None);
        s.position = Position::new(0, 1);
        let Some(StoreCommand::SaveHistory { position, .. }) = close_book(&mut s) else {
            panic!("expected a history entry");
        };
        assert_eq!(position, Position::new(0, 2));

        let mut single = ReaderState::new(ReaderSettings::default(), ColumnMode::Single);
        single.open_book(book(1), Some(position));
        reflow(&mut single, &single_geometry(), &CellMeasurer).unwrap();
        assert_eq!(single.position, Position::new(0, 2));
    }

    #[test]
    fn test_close_book_saves_history() {
        let mut s = state();
        s.position = Position::new(1, 3);
        let command = close_book(&mut s);
        assert_eq!(
            command,
            Some(StoreCommand::SaveHistory {
                title: "Test Book".to_string(),
                position: Position::new(1, 3)
            })
        );
        assert!(!s.has_book());
        assert_eq!(s.position, Position::default());
    }
}
