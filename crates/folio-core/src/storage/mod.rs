//! Persistence of reader settings, bookmarks and history
//!
//! The core never writes to storage directly. Mutations return a
//! [`StoreCommand`] and the host applies it to whatever [`KeyValueStore`] it
//! owns. Values are JSON strings.

mod file_store;
mod memory;
mod reader_repo;

pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use reader_repo::{apply_command, load_bookmarks, load_history, load_settings};

use crate::state::{Bookmark, Position, ReaderSettings};
use crate::Result;

pub const SETTINGS_KEY: &str = "settings";
pub const BOOKMARKS_KEY: &str = "bookmarks";
pub const HISTORY_KEY: &str = "history";

/// Opaque string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// A write the host should persist
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    SaveSettings(ReaderSettings),
    /// Bookmarks of every book
    SaveBookmarks(Vec<Bookmark>),
    /// Last read position of one book
    SaveHistory { title: String, position: Position },
}
