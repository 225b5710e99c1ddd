// src/extractors/boundary.rs

// --- Imports ---
use crate::config::Phrase;
use crate::utils::error::ExtractError;
use regex::{Regex, RegexBuilder};

// --- Pattern pieces ---
// Rest of the marker paragraph: lines with an ASCII word character somewhere inside them.
// Blank and whitespace-only lines never match, so the paragraph stops at the first gap.
const PARAGRAPH_LINES: &str = r"(?:^.+(?-u:\w).+\n)*";
// The blank-line gap after the paragraph. ASCII only: Latin-1 NEL (0x85) and
// no-break space (0xA0) belong to the text that follows.
const TRAILING_GAP: &str = r"(?-u:\s)+";

/// Which end of the matches decides the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Furthest match end; `0` when nothing matches.
    Latest,
    /// Earliest match start; the text length when nothing matches.
    Earliest,
}

impl Direction {
    /// Offset reported when no phrase matched.
    pub fn sentinel(self, text: &str) -> usize {
        match self {
            Direction::Latest => 0,
            Direction::Earliest => text.len(),
        }
    }
}

/// Byte span of one marker paragraph in the normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMatch {
    pub start: usize,
    pub end: usize,
}

/// Builds the marker-paragraph regex for one phrase: the whole line holding the
/// phrase, the rest of its paragraph and the whitespace that follows.
pub fn marker_paragraph_regex(phrase: &Phrase) -> Result<Regex, ExtractError> {
    let source = format!(
        r"^.*(?:{}).*\n{}{}",
        phrase.to_regex_fragment(),
        PARAGRAPH_LINES,
        TRAILING_GAP
    );

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| ExtractError::InvalidPhrase {
            phrase: phrase.as_str().to_string(),
            reason: e.to_string(),
        })
}

/// A phrase together with its compiled marker-paragraph regex.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    phrase: Phrase,
    regex: Regex,
}

impl MarkerPattern {
    pub fn new(phrase: &Phrase) -> Result<Self, ExtractError> {
        Ok(Self {
            phrase: phrase.clone(),
            regex: marker_paragraph_regex(phrase)?,
        })
    }

    /// First marker paragraph in `text`, if any.
    pub fn find(&self, text: &str) -> Option<BoundaryMatch> {
        self.regex.find(text).map(|m| BoundaryMatch { start: m.start(), end: m.end() })
    }

    /// All non-overlapping marker paragraphs in `text`.
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = BoundaryMatch> + 'a {
        self.regex
            .find_iter(text)
            .map(|m| BoundaryMatch { start: m.start(), end: m.end() })
    }
}

/// Locates one boundary from a set of phrases. Compile once, reuse across documents.
#[derive(Debug, Clone)]
pub struct BoundaryLocator {
    patterns: Vec<MarkerPattern>,
    direction: Direction,
}

impl BoundaryLocator {
    pub fn new(phrases: &[Phrase], direction: Direction) -> Result<Self, ExtractError> {
        let patterns = phrases
            .iter()
            .map(MarkerPattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns, direction })
    }

    /// Every marker paragraph for every phrase, in phrase order.
    pub fn matches(&self, text: &str) -> Vec<BoundaryMatch> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            for m in pattern.find_all(text) {
                tracing::trace!(
                    "Phrase '{}' matched at {}..{}",
                    pattern.phrase.as_str(),
                    m.start,
                    m.end
                );
                found.push(m);
            }
        }
        found
    }

    /// Combines all matches into a single offset, or the direction's sentinel.
    pub fn locate(&self, text: &str) -> usize {
        let matches = self.matches(text);
        let offset = match self.direction {
            Direction::Latest => matches.iter().map(|m| m.end).max(),
            Direction::Earliest => matches.iter().map(|m| m.start).min(),
        };
        let offset = offset.unwrap_or_else(|| self.direction.sentinel(text));
        tracing::debug!("{:?} boundary over {} match(es): {}", self.direction, matches.len(), offset);
        offset
    }
}

/// One-shot form of [`BoundaryLocator::locate`]. Only fails on an invalid pattern phrase.
pub fn locate(text: &str, phrases: &[Phrase], direction: Direction) -> Result<usize, ExtractError> {
    Ok(BoundaryLocator::new(phrases, direction)?.locate(text))
}
