use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use super::{KeyValueStore, StoreCommand, BOOKMARKS_KEY, HISTORY_KEY, SETTINGS_KEY};
use crate::state::{Bookmark, Position, ReaderSettings};
use crate::theme::ThemeName;
use crate::Result;

/// Persisted settings; any field may be missing from older stores
#[derive(Debug, Default, Deserialize)]
struct PartialSettings {
    font_size: Option<f64>,
    line_height: Option<f64>,
    theme: Option<String>,
}

/// Write a command's payload to the store
pub fn apply_command<K: KeyValueStore + ?Sized>(store: &mut K, command: &StoreCommand) -> Result<()> {
    match command {
        StoreCommand::SaveSettings(settings) => {
            store.set(SETTINGS_KEY, serde_json::to_string(settings)?)
        }
        StoreCommand::SaveBookmarks(bookmarks) => {
            store.set(BOOKMARKS_KEY, serde_json::to_string(bookmarks)?)
        }
        StoreCommand::SaveHistory { title, position } => {
            let mut history = read_history(store)?;
            history.insert(title.clone(), *position);
            store.set(HISTORY_KEY, serde_json::to_string(&history)?)
        }
    }
}

/// Settings overlaid on `defaults`. Unreadable values fall back to the
/// defaults with a warning.
pub fn load_settings<K: KeyValueStore + ?Sized>(store: &K, defaults: ReaderSettings) -> Result<ReaderSettings> {
    let Some(raw) = store.get(SETTINGS_KEY)? else {
        return Ok(defaults);
    };
    let partial: PartialSettings = match serde_json::from_str(&raw) {
        Ok(partial) => partial,
        Err(e) => {
            warn!("Ignoring stored settings: {}", e);
            return Ok(defaults);
        }
    };

    let mut settings = defaults;
    if let Some(size) = partial.font_size.filter(|v| v.is_finite() && *v > 0.0) {
        settings.font_size = size;
    }
    if let Some(height) = partial.line_height.filter(|v| v.is_finite() && *v > 0.0) {
        settings.line_height = height;
    }
    if let Some(theme) = partial.theme {
        match theme.parse::<ThemeName>() {
            Ok(name) => settings.theme = name,
            Err(e) => warn!("Ignoring stored theme: {}", e),
        }
    }
    Ok(settings)
}

/// Bookmarks of every book
pub fn load_bookmarks<K: KeyValueStore + ?Sized>(store: &K) -> Result<Vec<Bookmark>> {
    let Some(raw) = store.get(BOOKMARKS_KEY)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(bookmarks) => Ok(bookmarks),
        Err(e) => {
            warn!("Ignoring stored bookmarks: {}", e);
            Ok(Vec::new())
        }
    }
}

/// Last read position of the book titled `title`
pub fn load_history<K: KeyValueStore + ?Sized>(store: &K, title: &str) -> Result<Option<Position>> {
    Ok(read_history(store)?.get(title).copied())
}

fn read_history<K: KeyValueStore + ?Sized>(store: &K) -> Result<BTreeMap<String, Position>> {
    let Some(raw) = store.get(HISTORY_KEY)? else {
        return Ok(BTreeMap::new());
    };
    match serde_json::from_str(&raw) {
        Ok(history) => Ok(history),
        Err(e) => {
            warn!("Ignoring stored history: {}", e);
            Ok(BTreeMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_settings_round_trip() {
        let mut store = MemoryStore::new();
        let settings = ReaderSettings {
            font_size: 2.0,
            line_height: 1.5,
            theme: ThemeName::Paper,
        };
        apply_command(&mut store, &StoreCommand::SaveSettings(settings)).unwrap();
        assert_eq!(load_settings(&store, ReaderSettings::default()).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(SETTINGS_KEY, r#"{ "theme": "theme-dark", "font_size": -1 }"#.to_string())
            .unwrap();
        let settings = load_settings(&store, ReaderSettings::default()).unwrap();
        assert_eq!(settings.theme, ThemeName::Dark);
        assert_eq!(settings.font_size, ReaderSettings::default().font_size);
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{".to_string()).unwrap();
        store.set(BOOKMARKS_KEY, "42".to_string()).unwrap();
        store.set(HISTORY_KEY, "[]".to_string()).unwrap();
        assert_eq!(load_settings(&store, ReaderSettings::default()).unwrap(), ReaderSettings::default());
        assert!(load_bookmarks(&store).unwrap().is_empty());
        assert_eq!(load_history(&store, "Book").unwrap(), None);
    }

    #[test]
    fn test_history_is_kept_per_book() {
        let mut store = MemoryStore::new();
        for (title, position) in [("A", Position::new(1, 2)), ("B", Position::new(3, 0)), ("A", Position::new(2, 0))] {
            apply_command(
                &mut store,
                &StoreCommand::SaveHistory {
                    title: title.to_string(),
                    position,
                },
            )
            .unwrap();
        }
        assert_eq!(load_history(&store, "A").unwrap(), Some(Position::new(2, 0)));
        assert_eq!(load_history(&store, "B").unwrap(), Some(Position::new(3, 0)));
        assert_eq!(load_history(&store, "C").unwrap(), None);
    }

    #[test]
    fn test_bookmarks_round_trip() {
        let mut store = MemoryStore::new();
        let bookmarks = vec![Bookmark {
            title: "A".to_string(),
            histories: vec![Position::new(0, 1)],
            updated_at: Utc::now(),
        }];
        apply_command(&mut store, &StoreCommand::SaveBookmarks(bookmarks.clone())).unwrap();
        assert_eq!(load_bookmarks(&store).unwrap(), bookmarks);
    }
}
