use std::path::Path;

use anyhow::{Context, Result};

use folio_core::{
    book::Book,
    layout::{screen_count, split_text_to_pages, ColumnMode, LayoutParams},
    surface::CellMeasurer,
    AppConfig,
};

pub struct Options {
    pub width: u16,
    pub height: u16,
    pub single: bool,
    pub dump: bool,
}

pub async fn run(config: &AppConfig, book_path: &Path, options: Options) -> Result<()> {
    let content = tokio::fs::read_to_string(book_path)
        .await
        .with_context(|| format!("Cannot read {}", book_path.display()))?;
    let book = Book::from_json(&content)?;

    let column_mode = if options.single {
        ColumnMode::Single
    } else {
        ColumnMode::Double
    };
    let params = LayoutParams {
        font_size_px: config.reader.font_size,
        line_height_px: config.reader.line_height,
        canvas_width_px: options.width as f64,
        canvas_height_px: options.height as f64,
        padding_px: config.reader.padding,
        column_mode,
    };

    println!("{} ({} chapters)\n", book.title, book.chapters.len());

    let mut total_pages = 0;
    for (index, chapter) in book.into_chapters().iter().enumerate() {
        let pages = split_text_to_pages(&chapter.raw_lines, &params, &CellMeasurer)
            .with_context(|| format!("Chapter {} cannot be laid out", index + 1))?;
        total_pages += pages.len();

        println!(
            "  {:>3}. {} - {} pages, {} screens",
            index + 1,
            chapter.title,
            pages.len(),
            screen_count(pages.len(), column_mode)
        );

        if options.dump {
            for (page_index, page) in pages.iter().enumerate() {
                println!("      --- page {} ---", page_index + 1);
                for line in page.lines() {
                    println!("      {}", line);
                }
            }
            println!();
        }
    }

    println!("\nTotal: {} pages", total_pages);
    Ok(())
}
