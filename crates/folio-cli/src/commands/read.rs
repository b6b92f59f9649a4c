use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::{info, warn};

use folio_core::{
    book::Book,
    state::ReaderSettings,
    storage::{apply_command, load_bookmarks, load_history, load_settings, FileStore},
    AppConfig,
};
use folio_tui::{
    app::{screen_layout, App},
    detect_system_preference,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{CanvasWidget, StatusBarWidget},
};

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: Arc<AppConfig>, book_path: PathBuf) -> Result<()> {
    let content = tokio::fs::read_to_string(&book_path)
        .await
        .with_context(|| format!("Cannot read {}", book_path.display()))?;
    let book = Book::from_json(&content)?;
    info!("Opening '{}' ({} chapters)", book.title, book.chapters.len());

    let mut store = FileStore::open(config.store_path())?;
    let defaults = ReaderSettings::from_config(&config.reader, &config.theme);
    let settings = load_settings(&store, defaults)?;
    let bookmarks = load_bookmarks(&store)?;
    let resume = load_history(&store, &book.title)?;

    let keymap = Keymap::from_config(&config.keymap);
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.animation.animation_fps);
    let preference = config
        .reader
        .appearance
        .fixed()
        .unwrap_or_else(detect_system_preference);

    let mut app = App::new(config.clone(), preference);
    app.state.settings = settings;
    let title = format!("Folio - {}", book.title);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let (page_area, _) = screen_layout(Rect::new(0, 0, size.width, size.height), config.ui.show_status_bar);
    app.resize(page_area.width, page_area.height);
    app.open_book(book, resume, bookmarks);

    let result = run_loop(&mut terminal, &mut app, &mut store, &keymap, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(command) = app.close_book() {
        apply_command(&mut store, &command)?;
    }

    result
}

fn run_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    store: &mut FileStore,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    let show_status_bar = app.config.ui.show_status_bar;

    loop {
        // Advance a running page turn before drawing
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let (page_area, status_area) = screen_layout(frame.area(), show_status_bar);
            if let Some(live) = app.live() {
                frame.render_widget(CanvasWidget::new(live), page_area);
            }
            if let Some(area) = status_area {
                StatusBarWidget::render(frame, area, app);
            }
        })?;

        // Use the animation frame rate while a page turn is running
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.handle_action(action, Instant::now());
                }
                AppEvent::Resize(width, height) => {
                    let (page_area, _) = screen_layout(Rect::new(0, 0, width, height), show_status_bar);
                    app.resize(page_area.width, page_area.height);
                }
                AppEvent::Tick => {}
            }
        }

        for command in app.take_commands() {
            if let Err(e) = apply_command(store, &command) {
                warn!("Failed to save {:?}: {}", command, e);
                app.set_status(format!("Could not save: {}", e));
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
