//! Core error type, text cleaning, and the persisted text store
//! for slide OCR capture.

pub mod clean;
pub mod error;
pub mod store;

pub use clean::TextCleaner;
pub use error::{Error, Result};
pub use store::{StoreMap, TextStore};
