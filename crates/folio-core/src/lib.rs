pub mod book;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod layout;
pub mod navigation;
pub mod preferences;
pub mod render;
pub mod state;
pub mod storage;
pub mod surface;
pub mod theme;
pub mod transition;

#[cfg(test)]
mod test_support;

pub use book::Book;
pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use layout::{split_text_to_pages, Chapter, ColumnMode, LayoutParams, Page};
pub use navigation::NavOutcome;
pub use render::{PageRenderer, PageStyle};
pub use state::{Bookmark, Geometry, Position, ReaderSettings, ReaderState};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreCommand};
pub use surface::{CellSurface, Surface, TextMeasurer};
pub use theme::{ThemeColors, ThemeName};
pub use transition::{FrameStatus, TransitionController};
