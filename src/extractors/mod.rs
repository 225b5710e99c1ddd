// src/extractors/mod.rs
pub mod boundary;
pub mod cleaner;
pub mod normalize;

// Re-export key extraction types for convenience
pub use boundary::{locate, BoundaryLocator, BoundaryMatch, Direction, MarkerPattern};
pub use cleaner::{Extraction, GutenbergExtractor};
pub use normalize::{decode, normalize, read_normalized, Encoding};
