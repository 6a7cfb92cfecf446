//! Error types for the slide capture pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during slide capture, OCR, or store access.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The store file could not be parsed or serialized.
    #[error("Store JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to decode or encode a screenshot image.
    #[error("Image error: {0}")]
    ImageError(String),

    /// The OCR engine failed or could not be invoked.
    #[error("OCR error: {0}")]
    OcrError(String),

    /// The browser session failed in a way that is not a normal
    /// end-of-presentation signal.
    #[error("Browser error: {0}")]
    BrowserError(String),
}
