// src/lib.rs
//! Strips the Project Gutenberg header, editorial notes and footer from plain-text etexts.
pub mod config;
pub mod extractors;
pub mod fetch;
pub mod storage;
pub mod utils;

pub use config::{Phrase, PhraseConfig};
pub use extractors::{Encoding, Extraction, GutenbergExtractor};
pub use utils::AppError;

/// Cleans raw Latin-1 etext bytes with the built-in phrase sets.
pub fn clean(raw: &[u8]) -> Extraction {
    GutenbergExtractor::default_ref().clean_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_uses_built_in_phrases() {
        let raw = b"Project Gutenberg's Etext of Candide\r\n\r\nCHAPTER I\r\n\r\nEnd of Project Gutenberg's Candide\r\n\r\n";
        let extraction = clean(raw);
        assert_eq!(extraction.text, "CHAPTER I");
        assert!(!extraction.degenerate);
    }
}
