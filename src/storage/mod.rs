// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::Extraction;
use crate::utils::error::StorageError;

/// Turns a title or URL into a file name: ASCII alphanumerics, `-` and `.` are kept,
/// everything else collapses into single underscores.
pub fn safe_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches(|c| c == '_' || c == '.');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(StorageError::IoError)?;
    }
    Ok(())
}

/// On-disk cache of raw downloads, one file per URL.
pub struct DocumentCache {
    cache_dir: PathBuf,
}

impl DocumentCache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self, StorageError> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        ensure_dir(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        let without_scheme = url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(url);
        self.cache_dir.join(safe_file_name(without_scheme))
    }

    /// Cached bytes for `url`, or `None` on a miss.
    pub fn get(&self, url: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(url);
        if !path.is_file() {
            tracing::debug!("Cache miss for {}", url);
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(StorageError::IoError)?;
        tracing::debug!("Cache hit for {} ({} bytes at {})", url, bytes.len(), path.display());
        Ok(Some(bytes))
    }

    pub fn put(&self, url: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.path_for(url);
        fs::write(&path, bytes).map_err(StorageError::IoError)?;
        tracing::debug!("Cached {} bytes for {} at {}", bytes.len(), url, path.display());
        Ok(path)
    }
}

/// Writes cleaned texts and their metadata under a base directory.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        ensure_dir(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Saves the cleaned text as `<name>.txt`.
    pub fn save_text(&self, name: &str, extraction: &Extraction) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}.txt", safe_file_name(name)));
        fs::write(&file_path, extraction.text.as_bytes()).map_err(StorageError::IoError)?;
        tracing::info!("Saved cleaned text to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves the boundary offsets and source of an extraction as `<name>_meta.json`.
    pub fn save_metadata(&self, name: &str, source: &str, extraction: &Extraction) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", safe_file_name(name)));

        let metadata = serde_json::json!({
            "source": source,
            "header_end": extraction.header_end,
            "notes_end": extraction.notes_end,
            "footer_start": extraction.footer_start,
            "start": extraction.start,
            "content_length": extraction.text.len(),
            "degenerate": extraction.degenerate,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}
