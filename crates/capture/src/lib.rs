//! Slide walker, duplicate-frame termination, and the headless-browser
//! slide source.
//!
//! The walker drives a [`SlideSource`] forward one slide at a time,
//! hashing each captured frame to decide when the presentation has ended,
//! and appends OCR text to the store as it goes.

pub mod browser;
pub mod extract;
pub mod hash;
pub mod source;
pub mod walker;

pub use browser::BrowserSlideSource;
pub use extract::OcrTextExtractor;
pub use hash::{content_hash, ContentHash};
pub use source::{SlideSource, TextExtractor};
pub use walker::{SlideWalker, StopReason, WalkConfig, WalkSummary};
