use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Drawing surface is not available")]
    SurfaceUnavailable,

    #[error("Chapter index out of range: {0}")]
    ChapterOutOfRange(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Book format error: {0}")]
    Book(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
