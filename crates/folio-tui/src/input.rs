use crossterm::event::KeyEvent;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    NextChapter,
    PrevChapter,
    FirstPage,
    LastPage,
    PendingG, // First 'g' press, waiting for second 'g'
    ToggleColumns,
    CycleTheme,
    AddBookmark,
    RemoveBookmark,
    NextBookmark,
    PrevBookmark,
    FontLarger,
    FontSmaller,
    LineTaller,
    LineShorter,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::from_event(&key);

    // gg requires double press
    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().copied().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}
