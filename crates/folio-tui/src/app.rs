use std::sync::Arc;
use std::time::Instant;

use folio_core::{
    book::Book,
    bookmarks,
    navigation::{self, NavOutcome},
    preferences,
    state::{Bookmark, Geometry, Position, ReaderSettings, ReaderState},
    surface::{CellMeasurer, CellSurface},
    theme::{SystemPreference, ThemeColors},
    AppConfig, ColumnMode, FrameStatus, PageRenderer, PageStyle, StoreCommand, TransitionController,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::{debug, warn};

use crate::input::Action;
use crate::theme::theme_colors;

/// Message drawn in place of pages that could not be laid out
pub const NO_CONTENT: &str = "no content";

const FONT_SIZE_STEP: f64 = 1.0;
const FONT_SIZE_RANGE: (f64, f64) = (1.0, 4.0);
const LINE_HEIGHT_STEP: f64 = 1.0;
const LINE_HEIGHT_RANGE: (f64, f64) = (1.0, 4.0);

/// Split the terminal into the page area and an optional status bar row
pub fn screen_layout(area: Rect, show_status_bar: bool) -> (Rect, Option<Rect>) {
    if !show_status_bar || area.height < 2 {
        return (area, None);
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (rows[0], Some(rows[1]))
}

/// Terminal reader: reading state plus the surfaces it is drawn on
pub struct App {
    pub config: Arc<AppConfig>,
    pub state: ReaderState,
    /// Light/dark preference used by the `default` theme
    pub preference: SystemPreference,
    /// First key of a pending multi-key sequence
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    /// Set while the current chapter cannot be laid out
    pub layout_error: Option<String>,
    pub should_quit: bool,
    renderer: PageRenderer<CellSurface>,
    transition: TransitionController<CellSurface>,
    live: Option<CellSurface>,
    geometry: Option<Geometry>,
    /// A resize arrived mid-animation
    needs_relayout: bool,
    commands: Vec<StoreCommand>,
}

impl App {
    pub fn new(config: Arc<AppConfig>, preference: SystemPreference) -> Self {
        let settings = ReaderSettings::from_config(&config.reader, &config.theme);
        let column_mode = ColumnMode::from_single(config.reader.single_column);
        Self {
            state: ReaderState::new(settings, column_mode),
            transition: TransitionController::new(&config.animation),
            renderer: PageRenderer::new(),
            config,
            preference,
            pending_key: None,
            status_message: None,
            layout_error: None,
            should_quit: false,
            live: None,
            geometry: None,
            needs_relayout: false,
            commands: Vec::new(),
        }
    }

    pub fn open_book(&mut self, book: Book, resume: Option<Position>, bookmarks: Vec<Bookmark>) {
        self.state.bookmarks = bookmarks;
        self.state.open_book(book, resume);
        self.transition.set_cached_chapter(self.state.position.chapter_index);
        self.relayout();
    }

    /// Save the reading position and close the book
    pub fn close_book(&mut self) -> Option<StoreCommand> {
        bookmarks::close_book(&mut self.state)
    }

    /// The live surface, `None` until the first resize
    pub fn live(&self) -> Option<&CellSurface> {
        self.live.as_ref()
    }

    /// Resize the page area (in cells)
    pub fn resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width as usize, height as usize);
        match self.live.as_mut() {
            Some(live) if live.columns() == width && live.rows() == height => return,
            Some(live) => live.resize(width, height),
            None => self.live = Some(CellSurface::new(width, height)),
        }
        debug!("Page area resized to {}x{}", width, height);

        self.geometry = Some(Geometry {
            width: width as f64,
            height: height as f64,
            padding: self.config.reader.padding,
        });
        if self.state.is_animating {
            self.needs_relayout = true;
        } else {
            self.relayout();
        }
    }

    pub fn colors(&self) -> ThemeColors {
        theme_colors(&self.config, self.state.settings.theme, self.preference)
    }

    fn style(&self, geometry: &Geometry) -> PageStyle {
        self.state.page_style(geometry, self.colors())
    }

    /// Whether the event loop should poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.transition.needs_frame()
    }

    /// Commands produced since the last call, for the host to persist
    pub fn take_commands(&mut self) -> Vec<StoreCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Re-split for the current settings and geometry, then redraw
    fn relayout(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        if let Err(e) = navigation::reflow(&mut self.state, &geometry, &CellMeasurer) {
            self.show_layout_error(e, &geometry);
            return;
        }
        self.redraw();
    }

    /// Draw the current page straight onto the live surface
    pub fn redraw(&mut self) {
        let Some(geometry) = self.geometry else {
            return;
        };
        let style = self.style(&geometry);
        if !self.state.has_book() {
            self.renderer.draw_placeholder(self.live.as_mut(), "no book open", &style);
            return;
        }

        let Position {
            chapter_index,
            page_index,
        } = self.state.position;
        match self.state.ensure_split(chapter_index, &geometry, &CellMeasurer) {
            Ok(pages) => {
                self.layout_error = None;
                self.renderer.draw_page(self.live.as_mut(), pages, page_index, &style);
                self.transition.set_cached_chapter(chapter_index);
            }
            Err(e) => self.show_layout_error(e, &geometry),
        }
    }

    fn show_layout_error(&mut self, error: folio_core::Error, geometry: &Geometry) {
        warn!("Cannot lay out chapter {}: {}", self.state.position.chapter_index, error);
        self.layout_error = Some(error.to_string());
        let style = self.style(geometry);
        self.renderer.draw_placeholder(self.live.as_mut(), NO_CONTENT, &style);
    }

    /// Deliver an animation frame
    pub fn tick(&mut self, now: Instant) -> FrameStatus {
        if !self.transition.needs_frame() {
            return FrameStatus::Idle;
        }
        let Some(geometry) = self.geometry else {
            return FrameStatus::Idle;
        };
        let style = self.style(&geometry);
        let status = self
            .transition
            .on_frame(now, &mut self.state, &mut self.renderer, self.live.as_mut(), &style);

        if status == FrameStatus::Completed && self.needs_relayout {
            self.needs_relayout = false;
            self.relayout();
        }
        status
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        if action == Action::PendingG {
            self.pending_key = Some('g');
            return;
        }
        self.pending_key = None;

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextPage => self.navigate(now, |s, g, m| navigation::next_page(s, g, m)),
            Action::PrevPage => self.navigate(now, |s, g, m| navigation::prev_page(s, g, m)),
            Action::NextChapter => self.navigate(now, |s, g, m| navigation::next_chapter(s, g, m)),
            Action::PrevChapter => self.navigate(now, |s, g, m| navigation::prev_chapter(s, g, m)),
            Action::FirstPage => {
                let target = Position::new(self.state.position.chapter_index, 0);
                self.navigate(now, move |s, g, m| navigation::go_to(s, target, g, m));
            }
            Action::LastPage => {
                // Clamped to the chapter's last page
                let target = Position::new(self.state.position.chapter_index, usize::MAX);
                self.navigate(now, move |s, g, m| navigation::go_to(s, target, g, m));
            }
            Action::ToggleColumns => {
                if preferences::toggle_column_mode(&mut self.state) {
                    let label = match self.state.column_mode {
                        ColumnMode::Single => "Single column",
                        ColumnMode::Double => "Two columns",
                    };
                    self.set_status(label);
                    self.relayout();
                }
            }
            Action::CycleTheme => {
                let next = self.state.settings.theme.next();
                let command = preferences::set_theme(&mut self.state, next);
                if self.apply_setting(command) {
                    self.set_status(format!("Theme: {}", next));
                }
            }
            Action::AddBookmark => match bookmarks::add_bookmark(&mut self.state) {
                Some(command) => {
                    self.commands.push(command);
                    self.set_status("Bookmark added");
                }
                None if self.state.has_book() => self.set_status("Already bookmarked"),
                None => {}
            },
            Action::RemoveBookmark => match bookmarks::bookmark_on_screen(&self.state) {
                Some(saved) => {
                    if let Some(command) = bookmarks::remove_bookmark(&mut self.state, saved) {
                        self.commands.push(command);
                        self.set_status("Bookmark removed");
                    }
                }
                None if self.state.has_book() => self.set_status("No bookmark on this page"),
                None => {}
            },
            Action::NextBookmark | Action::PrevBookmark => {
                let forward = action == Action::NextBookmark;
                match bookmarks::cycle_bookmark(&self.state, forward) {
                    Some(target) => self.navigate(now, move |s, g, m| navigation::go_to(s, target, g, m)),
                    None if self.state.has_book() => self.set_status("No bookmarks"),
                    None => {}
                }
            }
            Action::FontLarger | Action::FontSmaller => {
                let delta = if action == Action::FontLarger {
                    FONT_SIZE_STEP
                } else {
                    -FONT_SIZE_STEP
                };
                let size = (self.state.settings.font_size + delta).clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
                let command = preferences::set_font_size(&mut self.state, size);
                self.apply_setting(command);
            }
            Action::LineTaller | Action::LineShorter => {
                let delta = if action == Action::LineTaller {
                    LINE_HEIGHT_STEP
                } else {
                    -LINE_HEIGHT_STEP
                };
                let height = (self.state.settings.line_height + delta).clamp(LINE_HEIGHT_RANGE.0, LINE_HEIGHT_RANGE.1);
                let command = preferences::set_line_height(&mut self.state, height);
                self.apply_setting(command);
            }
            Action::PendingG | Action::None => {}
        }
    }

    /// Queue a settings change and relayout; false when nothing changed
    fn apply_setting(&mut self, command: Option<StoreCommand>) -> bool {
        let Some(command) = command else {
            return false;
        };
        self.commands.push(command);
        self.relayout();
        true
    }

    fn navigate<F>(&mut self, now: Instant, nav: F)
    where
        F: FnOnce(&mut ReaderState, &Geometry, &CellMeasurer) -> folio_core::Result<NavOutcome>,
    {
        let Some(geometry) = self.geometry else {
            return;
        };
        match nav(&mut self.state, &geometry, &CellMeasurer) {
            Ok(NavOutcome::Moved { from, to }) => {
                self.clear_status();
                let started = self.transition.animate_transition(
                    &mut self.state,
                    from.page_index,
                    to.page_index,
                    self.live.as_ref(),
                    now,
                );
                if !started {
                    self.redraw();
                }
            }
            Ok(NavOutcome::Busy) => debug!("Navigation deferred: page turn in progress"),
            Ok(NavOutcome::AtBoundary) => {}
            Err(e) => self.show_layout_error(e, &geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_core::book::ChapterSource;

    use super::*;

    fn book() -> Book {
        Book {
            title: "Test Book".to_string(),
            chapters: (0..2)
                .map(|i| ChapterSource {
                    title: format!("Chapter {}", i + 1),
                    lines: vec!["x".repeat(20); 6],
                })
                .collect(),
        }
    }

    /// 28x10 two-column area: 4 pages per chapter, 2 spreads
    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), SystemPreference::Light);
        app.resize(28, 10);
        app.open_book(book(), None, Vec::new());
        app
    }

    #[test]
    fn test_open_book_draws_first_page() {
        let app = app();
        let live = app.live().unwrap();
        assert_eq!(&live.row_text(2)[2..11], "Chapter 1");
        assert!(app.layout_error.is_none());
    }

    #[test]
    fn test_page_turn_animates_and_defers_input() {
        let mut app = app();
        let start = Instant::now();

        app.handle_action(Action::NextPage, start);
        assert_eq!(app.state.position, Position::new(0, 1));
        assert!(app.needs_fast_update());

        app.handle_action(Action::NextPage, start);
        assert_eq!(app.state.position, Position::new(0, 1));

        assert!(matches!(app.tick(start + Duration::from_millis(50)), FrameStatus::Running { .. }));
        assert_eq!(app.tick(start + Duration::from_millis(150)), FrameStatus::Completed);
        assert!(!app.needs_fast_update());

        app.handle_action(Action::NextPage, start + Duration::from_millis(200));
        assert_eq!(app.state.position, Position::new(1, 0));
    }

    #[test]
    fn test_last_and_first_page() {
        let mut config = AppConfig::default();
        config.animation.enabled = false;
        let mut app = App::new(Arc::new(config), SystemPreference::Light);
        app.resize(28, 10);
        app.open_book(book(), None, Vec::new());
        let now = Instant::now();

        app.handle_action(Action::LastPage, now);
        assert_eq!(app.state.position, Position::new(0, 1));
        app.handle_action(Action::PendingG, now);
        assert_eq!(app.pending_key, Some('g'));
        app.handle_action(Action::FirstPage, now);
        assert_eq!(app.state.position, Position::new(0, 0));
        assert_eq!(app.pending_key, None);
    }

    #[test]
    fn test_settings_changes_queue_commands() {
        let mut app = app();
        let now = Instant::now();
        app.handle_action(Action::FontLarger, now);
        app.handle_action(Action::CycleTheme, now);
        app.handle_action(Action::AddBookmark, now);
        app.handle_action(Action::AddBookmark, now);

        let commands = app.take_commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(app.state.settings.font_size, 2.0);
        assert_eq!(app.status_message.as_deref(), Some("Already bookmarked"));
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_remove_bookmark_action() {
        let mut app = app();
        let now = Instant::now();
        app.handle_action(Action::RemoveBookmark, now);
        assert_eq!(app.status_message.as_deref(), Some("No bookmark on this page"));

        app.handle_action(Action::AddBookmark, now);
        app.handle_action(Action::RemoveBookmark, now);
        assert_eq!(app.status_message.as_deref(), Some("Bookmark removed"));
        assert!(app.state.bookmarks.is_empty());

        let commands = app.take_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], StoreCommand::SaveBookmarks(Vec::new()));
    }

    #[test]
    fn test_bookmark_cycling_jumps_between_marks() {
        let mut config = AppConfig::default();
        config.animation.enabled = false;
        let mut app = App::new(Arc::new(config), SystemPreference::Light);
        app.resize(28, 10);
        // Saved as raw pages: page 3 of chapter 1 is on spread 1
        let saved = Bookmark {
            title: "Test Book".to_string(),
            histories: vec![Position::new(1, 3), Position::new(0, 2)],
            updated_at: chrono::Utc::now(),
        };
        app.open_book(book(), None, vec![saved]);
        let now = Instant::now();

        app.handle_action(Action::NextBookmark, now);
        assert_eq!(app.state.position, Position::new(0, 1));
        app.handle_action(Action::NextBookmark, now);
        assert_eq!(app.state.position, Position::new(1, 1));
        app.handle_action(Action::NextBookmark, now);
        assert_eq!(app.state.position, Position::new(0, 1));
        app.handle_action(Action::PrevBookmark, now);
        assert_eq!(app.state.position, Position::new(1, 1));
    }

    #[test]
    fn test_bookmark_cycling_without_marks() {
        let mut app = app();
        app.handle_action(Action::NextBookmark, Instant::now());
        assert_eq!(app.status_message.as_deref(), Some("No bookmarks"));
        assert_eq!(app.state.position, Position::new(0, 0));
    }

    #[test]
    fn test_chapter_turn_slides_from_shown_chapter() {
        let mut app = app();
        let start = Instant::now();
        app.handle_action(Action::NextChapter, start);

        let session = app.transition.session().cloned().unwrap();
        assert_eq!(session.from, Position::new(0, 0));
        assert_eq!(session.to, Position::new(1, 0));
        assert_eq!(app.transition.cached_chapter(), 1);
        assert_eq!(app.tick(start + Duration::from_millis(500)), FrameStatus::Completed);
    }

    #[test]
    fn test_font_size_is_clamped() {
        let mut app = app();
        app.handle_action(Action::FontSmaller, Instant::now());
        assert_eq!(app.state.settings.font_size, 1.0);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn test_layout_error_shows_placeholder_and_recovers() {
        let mut app = app();
        app.resize(6, 10);
        assert!(app.layout_error.is_some());

        app.resize(28, 10);
        assert!(app.layout_error.is_none());
        assert_eq!(&app.live().unwrap().row_text(2)[2..11], "Chapter 1");
    }

    #[test]
    fn test_screen_layout() {
        let (pages, status) = screen_layout(Rect::new(0, 0, 80, 24), true);
        assert_eq!(pages.height, 23);
        assert_eq!(status.map(|r| r.y), Some(23));
        assert_eq!(screen_layout(Rect::new(0, 0, 80, 24), false).1, None);
    }
}
