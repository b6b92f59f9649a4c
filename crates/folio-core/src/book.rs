//! Book documents
//!
//! A book arrives already decoded and split into chapters of lines:
//!
//! ```json
//! { "title": "Book", "chapters": [ { "title": "One", "lines": ["...", "..."] } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::Chapter;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSource {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub chapters: Vec<ChapterSource>,
}

impl Book {
    pub fn from_json(content: &str) -> Result<Self> {
        let book: Book = serde_json::from_str(content)?;
        if book.chapters.is_empty() {
            return Err(Error::Book(format!("'{}' has no chapters", book.title)));
        }
        Ok(book)
    }

    /// Chapters ready for pagination. The chapter title becomes the first
    /// raw line unless the text already starts with it.
    pub fn into_chapters(self) -> Vec<Chapter> {
        self.chapters
            .into_iter()
            .map(|source| {
                let mut lines = source.lines;
                let starts_with_title = lines
                    .first()
                    .is_some_and(|first| first.trim() == source.title.trim());
                if !starts_with_title && !source.title.trim().is_empty() {
                    lines.insert(0, source.title.clone());
                }
                Chapter::new(source.title, lines)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let book = Book::from_json(
            r#"{ "title": "B", "chapters": [
                { "title": "One", "lines": ["a", "b"] },
                { "title": "Two" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(book.title, "B");
        assert_eq!(book.chapters.len(), 2);
        assert!(book.chapters[1].lines.is_empty());
    }

    #[test]
    fn test_book_without_chapters_is_rejected() {
        let err = Book::from_json(r#"{ "title": "B", "chapters": [] }"#).unwrap_err();
        assert!(matches!(err, Error::Book(_)));
        assert!(matches!(Book::from_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_title_is_prepended_once() {
        let book = Book {
            title: "B".to_string(),
            chapters: vec![
                ChapterSource {
                    title: "One".to_string(),
                    lines: vec!["body".to_string()],
                },
                ChapterSource {
                    title: "Two".to_string(),
                    lines: vec!["Two".to_string(), "body".to_string()],
                },
                ChapterSource {
                    title: String::new(),
                    lines: vec!["body".to_string()],
                },
            ],
        };
        let chapters = book.into_chapters();
        assert_eq!(chapters[0].raw_lines, vec!["One", "body"]);
        assert_eq!(chapters[1].raw_lines, vec!["Two", "body"]);
        assert_eq!(chapters[2].raw_lines, vec!["body"]);
    }
}
