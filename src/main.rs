// src/main.rs
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use gutenberg_cleaner::extractors::normalize::normalize_line_endings;
use gutenberg_cleaner::extractors::{decode, read_normalized, Encoding, GutenbergExtractor};
use gutenberg_cleaner::fetch::{self, DEFAULT_USER_AGENT};
use gutenberg_cleaner::storage::{DocumentCache, StorageManager};
use gutenberg_cleaner::utils::{self, AppError};
use gutenberg_cleaner::PhraseConfig;

/// Strip the Project Gutenberg header, notes and footer from an etext
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the etext, e.g. http://www.gutenberg.org/dirs/etext00/0ws2510.txt
    source: String,

    /// Treat SOURCE as a local file path instead of a URL
    #[arg(short, long)]
    file: bool,

    /// JSON file overriding the marker phrase sets
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for cached downloads
    #[arg(long, default_value = "./cache")]
    cache_dir: String,

    /// Always download, bypassing the cache
    #[arg(long)]
    no_cache: bool,

    /// Save the cleaned text and metadata here instead of printing it
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Encoding of the raw etext
    #[arg(long, value_enum, default_value_t = Encoding::Latin1)]
    encoding: Encoding,

    /// User-Agent header sent with downloads
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Compile marker phrases
    let custom_extractor = match &args.config {
        Some(path) => Some(GutenbergExtractor::new(&PhraseConfig::load(path)?)?),
        None => None,
    };
    let extractor = custom_extractor
        .as_ref()
        .unwrap_or_else(|| GutenbergExtractor::default_ref());

    // 4. Obtain and normalize the text
    let text = if args.file {
        tracing::info!("Reading etext from file: {}", args.source);
        read_normalized(std::fs::File::open(&args.source)?, args.encoding)?
    } else {
        let cache = if args.no_cache {
            None
        } else {
            Some(DocumentCache::new(&args.cache_dir)?)
        };
        let raw = fetch::fetch_document(&args.source, &args.user_agent, cache.as_ref()).await?;
        tracing::info!("Loaded {} bytes", raw.len());
        normalize_line_endings(&decode(&raw, args.encoding)?)
    };

    // 5. Extract
    let extraction = extractor.extract(&text);

    // 6. Save or print
    match &args.output_dir {
        Some(dir) => {
            let storage = StorageManager::new(dir)?;
            let name = args
                .source
                .rsplit(['/', '\\'])
                .next()
                .and_then(|file| file.split('.').next())
                .filter(|stem| !stem.is_empty())
                .unwrap_or(&args.source);
            storage.save_text(name, &extraction)?;
            storage.save_metadata(name, &args.source, &extraction)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(extraction.text.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }

    tracing::info!(
        "Processing finished for {} ({} bytes of core text{})",
        args.source,
        extraction.text.len(),
        if extraction.degenerate { ", degenerate" } else { "" }
    );
    Ok(())
}
