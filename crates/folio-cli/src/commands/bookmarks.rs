use anyhow::Result;

use folio_core::{
    storage::{load_bookmarks, FileStore},
    AppConfig,
};

pub fn run(config: &AppConfig) -> Result<()> {
    let store = FileStore::open(config.store_path())?;
    let bookmarks = load_bookmarks(&store)?;

    if bookmarks.is_empty() {
        println!("No bookmarks yet.");
        println!("\nPress 'm' while reading to bookmark a page, 'b' to jump to the next one.");
        return Ok(());
    }

    println!("Bookmarks ({} books):\n", bookmarks.len());

    for bookmark in &bookmarks {
        println!("  {}", bookmark.title);
        println!("    Updated: {}", bookmark.updated_at.format("%Y-%m-%d %H:%M"));
        for position in &bookmark.histories {
            println!(
                "    - chapter {}, page {}",
                position.chapter_index + 1,
                position.page_index + 1
            );
        }
        println!();
    }

    Ok(())
}
