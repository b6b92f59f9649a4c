//! Fixtures shared by unit tests

use crate::book::{Book, ChapterSource};
use crate::state::Geometry;

/// `chapters` chapters of 6 lines x 20 chars each
pub fn book(chapters: usize) -> Book {
    Book {
        title: "Test Book".to_string(),
        chapters: (0..chapters)
            .map(|i| ChapterSource {
                title: format!("Chapter {}", i + 1),
                lines: vec!["x".repeat(20); 6],
            })
            .collect(),
    }
}

/// 10 columns per page in single mode, 4 lines per page
pub fn single_geometry() -> Geometry {
    Geometry {
        width: 14.0,
        height: 10.0,
        padding: 2.0,
    }
}

/// 10 columns per page in double mode, 4 lines per page
pub fn double_geometry() -> Geometry {
    Geometry {
        width: 28.0,
        height: 10.0,
        padding: 2.0,
    }
}
