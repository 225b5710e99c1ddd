// src/config.rs
use crate::utils::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

// --- Default marker phrases ---
const HEADER_END_LITERALS: [&str; 2] = [
    "Project Gutenberg's Etext of",
    "This etext was prepared by",
];
// Small-print banners come as "*END*THE SMALL PRINT!" and "**END THE SMALL PRINT**" among others
const SMALL_PRINT_END_PATTERN: &str = "END.*THE SMALL PRINT";
const START_OF_TEXT_LITERAL: &str = "START OF THIS PROJECT GUTENBERG";

const NOTES_START_LITERALS: [&str; 1] = ["Executive Director's Notes:"];
// Only known to close the notes of the Shakespeare First Folio etexts.
const NOTES_END_LITERALS: [&str; 1] = ["David Reed"];

const FOOTER_START_LITERALS: [&str; 2] = ["End of Project Gutenberg", "End of The Project Gutenberg"];

/// A marker phrase as written in configuration.
///
/// In JSON a bare string is a literal; `{"pattern": "..."}` is a regex fragment
/// spliced into the marker-paragraph pattern as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Phrase {
    Literal(String),
    Pattern { pattern: String },
}

impl Phrase {
    pub fn literal(text: impl Into<String>) -> Self {
        Phrase::Literal(text.into())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Phrase::Pattern { pattern: pattern.into() }
    }

    /// The phrase as it appears in config and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Phrase::Literal(text) => text,
            Phrase::Pattern { pattern } => pattern,
        }
    }

    /// Regex source for this phrase, with literal text escaped.
    pub fn to_regex_fragment(&self) -> String {
        match self {
            Phrase::Literal(text) => regex::escape(text),
            Phrase::Pattern { pattern } => pattern.clone(),
        }
    }
}

fn literals(items: &[&str]) -> Vec<Phrase> {
    items.iter().map(|s| Phrase::literal(*s)).collect()
}

/// Marker phrases for each boundary role. Missing roles in a config file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    pub header_end_phrases: Vec<Phrase>,
    /// Recognized in config files but not used to locate any boundary.
    pub notes_start_phrases: Vec<Phrase>,
    pub notes_end_phrases: Vec<Phrase>,
    pub footer_start_phrases: Vec<Phrase>,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        let mut header_end_phrases = literals(&HEADER_END_LITERALS);
        header_end_phrases.push(Phrase::pattern(SMALL_PRINT_END_PATTERN));
        header_end_phrases.push(Phrase::literal(START_OF_TEXT_LITERAL));

        Self {
            header_end_phrases,
            notes_start_phrases: literals(&NOTES_START_LITERALS),
            notes_end_phrases: literals(&NOTES_END_LITERALS),
            footer_start_phrases: literals(&FOOTER_START_LITERALS),
        }
    }
}

impl PhraseConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid phrase configuration: {}", e)))
    }

    /// Loads a JSON phrase configuration from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        tracing::info!("Loading phrase configuration from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(
            "Loaded {} header, {} notes and {} footer phrases",
            config.header_end_phrases.len(),
            config.notes_end_phrases.len(),
            config.footer_start_phrases.len()
        );
        Ok(config)
    }
}
