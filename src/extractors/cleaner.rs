// src/extractors/cleaner.rs

// --- Imports ---
use crate::config::PhraseConfig;
use crate::extractors::boundary::{BoundaryLocator, Direction};
use crate::extractors::normalize;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;

// Built-in phrases are constants, so compiling them cannot fail at runtime.
static DEFAULT_EXTRACTOR: Lazy<GutenbergExtractor> = Lazy::new(|| {
    GutenbergExtractor::new(&PhraseConfig::default())
        .expect("Failed to compile default marker phrases")
});

// Trailing ASCII whitespace only (space, \t, \n, \x0b, \x0c, \r). Latin-1 NEL and
// no-break space are part of the text.
fn trim_ascii_end(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b')
}

// --- Data Structures ---
/// The core text of one etext and the offsets it was cut at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub header_end: usize,
    pub notes_end: usize,
    pub footer_start: usize,
    /// Where the core text starts: `notes_end` when notes were found, `header_end` otherwise.
    pub start: usize,
    /// Set when the start did not precede the footer or nothing but whitespace was left.
    pub degenerate: bool,
}

/// Strips Project Gutenberg header, editorial notes and footer from an etext.
#[derive(Debug, Clone)]
pub struct GutenbergExtractor {
    header_end: BoundaryLocator,
    notes_end: BoundaryLocator,
    footer_start: BoundaryLocator,
}

impl GutenbergExtractor {
    pub fn new(config: &PhraseConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            header_end: BoundaryLocator::new(&config.header_end_phrases, Direction::Latest)?,
            notes_end: BoundaryLocator::new(&config.notes_end_phrases, Direction::Latest)?,
            footer_start: BoundaryLocator::new(&config.footer_start_phrases, Direction::Earliest)?,
        })
    }

    /// Shared extractor for the built-in phrase sets.
    pub fn default_ref() -> &'static GutenbergExtractor {
        &DEFAULT_EXTRACTOR
    }

    /// End of the last header marker paragraph, `0` if there is none.
    pub fn header_end(&self, text: &str) -> usize {
        self.header_end.locate(text)
    }

    /// End of the last notes marker paragraph, `0` if the etext has no notes.
    pub fn notes_end(&self, text: &str) -> usize {
        self.notes_end.locate(text)
    }

    /// Start of the first footer marker paragraph, the text length if there is no footer.
    pub fn footer_start(&self, text: &str) -> usize {
        self.footer_start.locate(text)
    }

    /// Extracts the core text from normalized text.
    pub fn extract(&self, text: &str) -> Extraction {
        let notes_end = self.notes_end(text);
        let header_end = self.header_end(text);
        let footer_start = self.footer_start(text);
        tracing::debug!(
            "Boundaries: header_end={}, notes_end={}, footer_start={} (text length {})",
            header_end,
            notes_end,
            footer_start,
            text.len()
        );

        let start = if notes_end > 0 { notes_end } else { header_end };
        // footer_start is deliberately not clamped against start
        let core = if start < footer_start {
            trim_ascii_end(&text[start..footer_start])
        } else {
            ""
        };

        let degenerate = core.is_empty();
        if degenerate {
            tracing::warn!(
                "Extraction is empty: start offset {} is not before footer offset {} (or only whitespace remained)",
                start,
                footer_start
            );
        } else {
            tracing::info!("Extracted core text of {} bytes from {}..{}", core.len(), start, footer_start);
        }

        Extraction {
            text: core.to_string(),
            header_end,
            notes_end,
            footer_start,
            start,
            degenerate,
        }
    }

    /// Like [`extract`](Self::extract) but only returns the text.
    pub fn extract_text(&self, text: &str) -> String {
        self.extract(text).text
    }

    /// Normalizes raw Latin-1 bytes, then extracts.
    pub fn clean_bytes(&self, raw: &[u8]) -> Extraction {
        let text = normalize::normalize(raw);
        self.extract(&text)
    }
}
