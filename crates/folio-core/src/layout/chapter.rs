use super::{screen_count, split_text_to_pages, ColumnMode, LayoutParams, Page};
use crate::surface::TextMeasurer;
use crate::Result;

/// Pages computed for one set of layout params
#[derive(Debug, Clone)]
struct PageCache {
    params: LayoutParams,
    pages: Vec<Page>,
}

/// A chapter's raw text plus its memoized pagination
#[derive(Debug, Clone)]
pub struct Chapter {
    pub title: String,
    pub raw_lines: Vec<String>,
    cache: Option<PageCache>,
}

impl Chapter {
    pub fn new(title: impl Into<String>, raw_lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            raw_lines,
            cache: None,
        }
    }

    /// Pages for `params`, re-splitting when they differ from the last split
    pub fn pages<M>(&mut self, params: &LayoutParams, measurer: &M) -> Result<&[Page]>
    where
        M: TextMeasurer + ?Sized,
    {
        let stale = self
            .cache
            .as_ref()
            .map_or(true, |cache| cache.params != *params);

        if stale {
            // Drop the old pages first so a failed split never leaves them behind
            self.cache = None;
            let pages = split_text_to_pages(&self.raw_lines, params, measurer)?;
            self.cache = Some(PageCache {
                params: *params,
                pages,
            });
        }

        Ok(self.cache.as_ref().map(|c| c.pages.as_slice()).unwrap_or(&[]))
    }

    /// Pages from the last split, whatever params it used
    pub fn cached_pages(&self) -> Option<&[Page]> {
        self.cache.as_ref().map(|c| c.pages.as_slice())
    }

    /// Whether the cache matches `params`
    pub fn is_split_for(&self, params: &LayoutParams) -> bool {
        self.cache.as_ref().is_some_and(|c| c.params == *params)
    }

    /// Forget the cached pages
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Highest valid page index (spreads in double-column mode), if split
    pub fn max_page_index(&self, column_mode: ColumnMode) -> Option<usize> {
        self.cached_pages()
            .map(|pages| screen_count(pages.len(), column_mode).saturating_sub(1))
    }
}
