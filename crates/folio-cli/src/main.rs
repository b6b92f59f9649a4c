use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A paged terminal reader for plain-text books")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a book in the terminal reader
    Read {
        /// Book document (JSON with a title and chapters of lines)
        book: PathBuf,
    },
    /// Print how a book splits into pages
    Paginate {
        book: PathBuf,
        /// Page area width in cells
        #[arg(long, default_value_t = 80)]
        width: u16,
        /// Page area height in cells
        #[arg(long, default_value_t = 24)]
        height: u16,
        /// One page per screen instead of two-page spreads
        #[arg(long)]
        single: bool,
        /// Print every page's lines
        #[arg(long)]
        dump: bool,
    },
    /// List saved bookmarks
    Bookmarks,
    /// List themes, or set the configured one
    Themes {
        /// Theme to write to the config file
        #[arg(long)]
        set: Option<String>,
    },
}

/// Log to stderr, or to the log file while the reader owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Cannot open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    init_logging(&config, matches!(cli.command, Commands::Read { .. }))?;

    match cli.command {
        Commands::Read { book } => commands::read::run(config, book).await,
        Commands::Paginate {
            book,
            width,
            height,
            single,
            dump,
        } => {
            let options = commands::paginate::Options {
                width,
                height,
                single,
                dump,
            };
            commands::paginate::run(&config, &book, options).await
        }
        Commands::Bookmarks => commands::bookmarks::run(&config),
        Commands::Themes { set } => commands::themes::run(&config, set.as_deref()),
    }
}
