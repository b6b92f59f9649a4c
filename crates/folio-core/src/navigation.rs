//! Page and chapter navigation
//!
//! Every move checks the busy flag first and leaves the state untouched
//! while a page-turn animation is running. Page indices count spreads in
//! double-column mode.

use tracing::debug;

use crate::state::{Geometry, Position, ReaderState};
use crate::surface::TextMeasurer;
use crate::{Error, Result};

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Position changed; both chapters are split
    Moved { from: Position, to: Position },
    /// An animation is in flight, try again later
    Busy,
    /// Already at the first/last page, or no book is open
    AtBoundary,
}

fn max_index<M>(state: &mut ReaderState, chapter_index: usize, geometry: &Geometry, measurer: &M) -> Result<usize>
where
    M: TextMeasurer + ?Sized,
{
    state.ensure_split(chapter_index, geometry, measurer)?;
    Ok(state.chapters[chapter_index]
        .max_page_index(state.column_mode)
        .unwrap_or(0))
}

fn commit(state: &mut ReaderState, to: Position) -> NavOutcome {
    let from = state.position;
    if from == to {
        return NavOutcome::AtBoundary;
    }
    state.position = to;
    debug!(
        "Moved from {}:{} to {}:{}",
        from.chapter_index, from.page_index, to.chapter_index, to.page_index
    );
    NavOutcome::Moved { from, to }
}

/// Next page, continuing at the start of the next chapter
pub fn next_page<M>(state: &mut ReaderState, geometry: &Geometry, measurer: &M) -> Result<NavOutcome>
where
    M: TextMeasurer + ?Sized,
{
    if state.is_animating {
        return Ok(NavOutcome::Busy);
    }
    if !state.has_book() {
        return Ok(NavOutcome::AtBoundary);
    }

    let Position {
        chapter_index,
        page_index,
    } = state.position;
    let max = max_index(state, chapter_index, geometry, measurer)?;

    if page_index < max {
        Ok(commit(state, Position::new(chapter_index, page_index + 1)))
    } else if chapter_index + 1 < state.chapters.len() {
        state.ensure_split(chapter_index + 1, geometry, measurer)?;
        Ok(commit(state, Position::new(chapter_index + 1, 0)))
    } else {
        Ok(NavOutcome::AtBoundary)
    }
}

/// Previous page, continuing at the last page of the previous chapter
pub fn prev_page<M>(state: &mut ReaderState, geometry: &Geometry, measurer: &M) -> Result<NavOutcome>
where
    M: TextMeasurer + ?Sized,
{
    if state.is_animating {
        return Ok(NavOutcome::Busy);
    }
    if !state.has_book() {
        return Ok(NavOutcome::AtBoundary);
    }

    let Position {
        chapter_index,
        page_index,
    } = state.position;
    state.ensure_split(chapter_index, geometry, measurer)?;

    if page_index > 0 {
        Ok(commit(state, Position::new(chapter_index, page_index - 1)))
    } else if chapter_index > 0 {
        let last = max_index(state, chapter_index - 1, geometry, measurer)?;
        Ok(commit(state, Position::new(chapter_index - 1, last)))
    } else {
        Ok(NavOutcome::AtBoundary)
    }
}

/// First page of the next chapter
pub fn next_chapter<M>(state: &mut ReaderState, geometry: &Geometry, measurer: &M) -> Result<NavOutcome>
where
    M: TextMeasurer + ?Sized,
{
    if state.is_animating {
        return Ok(NavOutcome::Busy);
    }
    let target = state.position.chapter_index + 1;
    if !state.has_book() || target >= state.chapters.len() {
        return Ok(NavOutcome::AtBoundary);
    }
    state.ensure_split(state.position.chapter_index, geometry, measurer)?;
    state.ensure_split(target, geometry, measurer)?;
    Ok(commit(state, Position::new(target, 0)))
}

/// First page of the previous chapter
pub fn prev_chapter<M>(state: &mut ReaderState, geometry: &Geometry, measurer: &M) -> Result<NavOutcome>
where
    M: TextMeasurer + ?Sized,
{
    if state.is_animating {
        return Ok(NavOutcome::Busy);
    }
    if !state.has_book() || state.position.chapter_index == 0 {
        return Ok(NavOutcome::AtBoundary);
    }
    let target = state.position.chapter_index - 1;
    state.ensure_split(state.position.chapter_index, geometry, measurer)?;
    state.ensure_split(target, geometry, measurer)?;
    Ok(commit(state, Position::new(target, 0)))
}

/// Jump to an arbitrary position, clamping the page to the chapter's range
pub fn go_to<M>(state: &mut ReaderState, target: Position, geometry: &Geometry, measurer: &M) -> Result<NavOutcome>
where
    M: TextMeasurer + ?Sized,
{
    if state.is_animating {
        return Ok(NavOutcome::Busy);
    }
    if !state.has_book() {
        return Ok(NavOutcome::AtBoundary);
    }
    if target.chapter_index >= state.chapters.len() {
        return Err(Error::ChapterOutOfRange(target.chapter_index));
    }
    state.ensure_split(state.position.chapter_index, geometry, measurer)?;
    let max = max_index(state, target.chapter_index, geometry, measurer)?;
    Ok(commit(
        state,
        Position::new(target.chapter_index, target.page_index.min(max)),
    ))
}

/// Re-split the current chapter after a settings or geometry change and
/// clamp the page index into the new range.
pub fn reflow<M>(state: &mut ReaderState, geometry: &Geometry, measurer: &M) -> Result<()>
where
    M: TextMeasurer + ?Sized,
{
    if !state.has_book() {
        return Ok(());
    }
    let chapter_index = state.position.chapter_index;
    let max = max_index(state, chapter_index, geometry, measurer)?;
    if state.position.page_index > max {
        debug!("Clamping page {} to {}", state.position.page_index, max);
        state.position.page_index = max;
    }
    Ok(())
}
