pub mod bookmarks;
pub mod paginate;
pub mod read;
pub mod themes;
