// src/fetch/mod.rs
pub mod client;

pub use client::{download_document, DEFAULT_USER_AGENT};

use crate::storage::DocumentCache;
use crate::utils::AppError;

/// Returns the raw bytes for `url`, serving them from `cache` when present.
///
/// Fresh downloads are written back to the cache. A failed cache write is logged and
/// does not fail the fetch.
pub async fn fetch_document(
    url: &str,
    user_agent: &str,
    cache: Option<&DocumentCache>,
) -> Result<Vec<u8>, AppError> {
    if let Some(cache) = cache {
        if let Some(bytes) = cache.get(url)? {
            tracing::info!("Using cached copy of {} ({} bytes)", url, bytes.len());
            return Ok(bytes);
        }
    }

    let bytes = download_document(url, user_agent).await?;

    if let Some(cache) = cache {
        if let Err(e) = cache.put(url, &bytes) {
            tracing::warn!("Failed to cache {}: {}", url, e);
        }
    }

    Ok(bytes)
}
