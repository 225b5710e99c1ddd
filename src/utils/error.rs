// src/utils/error.rs
use thiserror::Error;

// Errors raised while talking to the Gutenberg mirrors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Request refused (403 Forbidden) - check the User-Agent")]
    Forbidden,

    #[error("Could not find document: {0}")]
    DocumentNotFound(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not decode document as {encoding}: invalid byte sequence at offset {offset}")]
    Decode { encoding: &'static str, offset: usize },

    #[error("Invalid marker phrase '{phrase}': {reason}")]
    InvalidPhrase { phrase: String, reason: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetching document failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
