use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Binding for a pressed key. Terminals disagree on whether symbols like
    /// '+' carry SHIFT, so it only counts for letters.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers = key.modifiers;
        if let KeyCode::Char(c) = key.code {
            if c.is_ascii_uppercase() {
                modifiers.insert(KeyModifiers::SHIFT);
            } else if !c.is_ascii_alphabetic() {
                modifiers.remove(KeyModifiers::SHIFT);
            }
        }
        Self::new(key.code, modifiers)
    }
}

/// Runtime keymap for efficient key-to-action lookup
pub struct Keymap {
    /// Primary key bindings
    bindings: HashMap<KeyBinding, Action>,
    /// Special handling for multi-key sequences (e.g., "gg")
    /// Stores the first key and the action it triggers
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            // Handle special "gg" sequence
            if key_str == "gg" {
                pending_g_action = Some(action);
                return;
            }

            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.next_page, Action::NextPage);
        add_binding(&config.prev_page, Action::PrevPage);
        add_binding(&config.next_chapter, Action::NextChapter);
        add_binding(&config.prev_chapter, Action::PrevChapter);
        add_binding(&config.first_page, Action::FirstPage);
        add_binding(&config.last_page, Action::LastPage);
        add_binding(&config.toggle_columns, Action::ToggleColumns);
        add_binding(&config.cycle_theme, Action::CycleTheme);
        add_binding(&config.add_bookmark, Action::AddBookmark);
        add_binding(&config.remove_bookmark, Action::RemoveBookmark);
        add_binding(&config.next_bookmark, Action::NextBookmark);
        add_binding(&config.prev_bookmark, Action::PrevBookmark);
        add_binding(&config.font_larger, Action::FontLarger);
        add_binding(&config.font_smaller, Action::FontSmaller);
        add_binding(&config.line_taller, Action::LineTaller);
        add_binding(&config.line_shorter, Action::LineShorter);

        // Add hardcoded bindings that shouldn't be configurable
        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Page keys (always available as alternatives)
        bindings.entry(KeyBinding::simple(KeyCode::Left)).or_insert(Action::PrevPage);
        bindings.entry(KeyBinding::simple(KeyCode::Right)).or_insert(Action::NextPage);
        bindings.entry(KeyBinding::simple(KeyCode::PageUp)).or_insert(Action::PrevPage);
        bindings.entry(KeyBinding::simple(KeyCode::PageDown)).or_insert(Action::NextPage);
        bindings.entry(KeyBinding::simple(KeyCode::Char(' '))).or_insert(Action::NextPage);
        bindings.entry(KeyBinding::simple(KeyCode::Home)).or_insert(Action::FirstPage);
        bindings.entry(KeyBinding::simple(KeyCode::End)).or_insert(Action::LastPage);

        Self {
            bindings,
            pending_g_action,
        }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Check if "gg" sequence is configured
    pub fn has_pending_g(&self) -> bool {
        self.pending_g_action.is_some()
    }

    /// Get the action for completed "gg" sequence
    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Check if a single 'g' press should start a pending sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "l", "h", "]", "+", etc.
/// - Uppercase (Shift): "G"
/// - Ctrl: "<C-j>", "<C-k>", etc.
/// - Shift: "<S-Tab>"
/// - Special keys: "<Space>", "<PageDown>", "<Home>", "<F1>" .. "<F12>", ...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    // Handle special notation <...>
    if s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    // Single character
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Uppercase letters carry Shift
        if c.is_ascii_uppercase() {
            return Some(KeyBinding::shift(KeyCode::Char(c)));
        }
        return Some(KeyBinding::simple(KeyCode::Char(c)));
    }

    // "gg" is handled by Keymap; the binding itself is a plain 'g'
    if s == "gg" {
        return Some(KeyBinding::simple(KeyCode::Char('g')));
    }

    None
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    // Modifiers: C- (Ctrl), S- (Shift)
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::shift(key));
    }

    // Handle special key names without modifiers
    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "del" | "delete" => Some(KeyCode::Delete),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "insert" | "ins" => Some(KeyCode::Insert),
        key if key.len() > 1 && key.starts_with('f') => {
            key[1..].parse::<u8>().ok().filter(|n| (1..=12).contains(n)).map(KeyCode::F)
        }
        _ => {
            // Single character after modifier (e.g., "j" in "<C-j>")
            if name.len() == 1 {
                let c = name.chars().next()?;
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}
