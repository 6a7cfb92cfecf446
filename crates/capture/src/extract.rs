//! Preprocess-then-OCR extractor used for real capture runs.

use slidecap_core::Result;
use slidecap_ocr::{preprocess_image, OcrEngine};

use crate::source::TextExtractor;

/// Runs the fixed preprocessing recipe and hands the result to Tesseract.
#[derive(Debug, Clone, Default)]
pub struct OcrTextExtractor {
    engine: OcrEngine,
}

impl OcrTextExtractor {
    /// Create an extractor with the default OCR configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor around a configured engine.
    pub fn with_engine(engine: OcrEngine) -> Self {
        Self { engine }
    }
}

impl TextExtractor for OcrTextExtractor {
    fn extract(&self, frame: &[u8]) -> Result<String> {
        let preprocessed = preprocess_image(frame)?;
        self.engine.recognize(&preprocessed)
    }
}
