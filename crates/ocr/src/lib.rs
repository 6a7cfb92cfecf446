//! Screenshot preprocessing and Tesseract OCR for slide text capture.
//!
//! Screenshots of rendered slides are low-contrast for OCR purposes, so
//! they go through a fixed binarize-and-upscale recipe before being handed
//! to the `tesseract` binary.

pub mod engine;
pub mod preprocess;

pub use engine::OcrEngine;
pub use preprocess::preprocess_image;
