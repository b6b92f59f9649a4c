//! Reader settings mutators
//!
//! Each mutator is a no-op while a page turn is running or when the value
//! does not change. Changed settings come back as a [`StoreCommand`] for the
//! host to persist; the next split picks up the new layout params, followed
//! by [`crate::navigation::reflow`] to clamp the page index.

use tracing::debug;

use crate::state::ReaderState;
use crate::storage::StoreCommand;
use crate::theme::ThemeName;

fn valid(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn set_font_size(state: &mut ReaderState, font_size: f64) -> Option<StoreCommand> {
    if state.is_animating || !valid(font_size) || state.settings.font_size == font_size {
        return None;
    }
    debug!("Font size {} -> {}", state.settings.font_size, font_size);
    state.settings.font_size = font_size;
    Some(StoreCommand::SaveSettings(state.settings))
}

pub fn set_line_height(state: &mut ReaderState, line_height: f64) -> Option<StoreCommand> {
    if state.is_animating || !valid(line_height) || state.settings.line_height == line_height {
        return None;
    }
    debug!("Line height {} -> {}", state.settings.line_height, line_height);
    state.settings.line_height = line_height;
    Some(StoreCommand::SaveSettings(state.settings))
}

pub fn set_theme(state: &mut ReaderState, theme: ThemeName) -> Option<StoreCommand> {
    if state.is_animating || state.settings.theme == theme {
        return None;
    }
    debug!("Theme {} -> {}", state.settings.theme, theme);
    state.settings.theme = theme;
    Some(StoreCommand::SaveSettings(state.settings))
}

/// Switch between one page and two-page spreads, keeping the first visible
/// page on screen. Returns whether the mode changed.
///
/// The column mode follows the config file and is not persisted.
pub fn toggle_column_mode(state: &mut ReaderState) -> bool {
    if state.is_animating {
        return false;
    }
    let saved = state.saved_position();
    state.column_mode = state.column_mode.toggled();
    state.position = state.screen_position(saved);
    debug!("Column mode now {:?}", state.column_mode);
    true
}
