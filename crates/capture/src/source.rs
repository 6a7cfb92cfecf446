//! Seams between the walker and its collaborators.

use slidecap_core::Result;

/// A presentation that can be captured one visible frame at a time.
pub trait SlideSource {
    /// Capture the currently visible frame as encoded image bytes.
    fn capture(&mut self) -> Result<Vec<u8>>;

    /// Try to move to the next slide.
    ///
    /// An error here means the "next" control could not be found or
    /// activated within the allotted time. The walker treats that as the
    /// end of the presentation, not as a failure of the run.
    fn advance(&mut self) -> Result<()>;
}

/// Turns one captured frame into text.
pub trait TextExtractor {
    /// Extract text from encoded frame bytes. May return an empty string.
    fn extract(&self, frame: &[u8]) -> Result<String>;
}
