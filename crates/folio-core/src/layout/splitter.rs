//! Greedy character-wise page splitter
//!
//! Every character is a break candidate. A display line is committed as soon
//! as the next character would overflow the available width, and a page is
//! closed once the accumulated line height reaches the available height.

use tracing::debug;

use super::{LayoutParams, Page};
use crate::surface::{Font, TextMeasurer};
use crate::Result;

/// Accumulates display lines into pages
struct PageBuilder {
    pages: Vec<Page>,
    lines: Vec<String>,
    height_used: f64,
    padding: f64,
    line_height: f64,
    available_height: f64,
}

impl PageBuilder {
    fn new(params: &LayoutParams) -> Self {
        Self {
            pages: Vec::new(),
            lines: Vec::new(),
            height_used: params.padding_px,
            padding: params.padding_px,
            line_height: params.line_height_px,
            available_height: params.available_height(),
        }
    }

    fn commit_line(&mut self, line: String) {
        self.lines.push(line);
        self.height_used += self.line_height;
    }

    /// Close the page once it is full
    fn close_if_full(&mut self) {
        if self.height_used >= self.available_height {
            self.pages.push(Page::new(std::mem::take(&mut self.lines)));
            self.height_used = self.padding;
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.lines.is_empty() {
            self.pages.push(Page::new(self.lines));
        }
        if self.pages.is_empty() {
            self.pages.push(Page::empty());
        }
        self.pages
    }
}

/// Split a chapter's lines into pages that fit `params`.
///
/// Fails with [`crate::Error::Layout`] when the geometry leaves no room for
/// text. Zero lines (or only empty lines) yield one page with one empty line.
pub fn split_text_to_pages<S, M>(lines: &[S], params: &LayoutParams, measurer: &M) -> Result<Vec<Page>>
where
    S: AsRef<str>,
    M: TextMeasurer + ?Sized,
{
    params.validate()?;

    let font = Font::regular(params.font_size_px);
    let available_width = params.available_width();
    let mut builder = PageBuilder::new(params);

    for line in lines {
        let mut current = String::new();

        for c in line.as_ref().chars() {
            let mut candidate = current.clone();
            candidate.push(c);

            if !current.is_empty() && measurer.measure_text(&candidate, &font) > available_width {
                builder.commit_line(std::mem::replace(&mut current, c.to_string()));
                builder.close_if_full();
            } else {
                current = candidate;
            }
        }

        if !current.is_empty() {
            builder.commit_line(current);
        }
        builder.close_if_full();
    }

    let pages = builder.finish();
    debug!(
        "Split {} lines into {} pages (width {}, height {})",
        lines.len(),
        pages.len(),
        available_width,
        params.available_height()
    );
    Ok(pages)
}
