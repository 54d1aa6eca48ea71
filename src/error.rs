//! Error handling for the itemscan crate

use std::fmt;
use thiserror::Error;

/// Unified error type for store access and local persistence
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Local file I/O errors (preference storage)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote store query or insert errors
    #[error("Store error: {0}")]
    Store(String),

    /// Decoder stream errors
    #[error("Decoder error: {0}")]
    Decoder(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new store error
    pub fn store<T: fmt::Display>(msg: T) -> Self {
        Error::Store(msg.to_string())
    }

    /// Create a new decoder error
    pub fn decoder<T: fmt::Display>(msg: T) -> Self {
        Error::Decoder(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
