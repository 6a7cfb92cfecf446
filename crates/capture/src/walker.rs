//! The slide-capture loop: capture, hash, dedup, OCR, append, advance.

use std::fs;
use std::path::{Path, PathBuf};

use slidecap_core::{Result, TextStore};

use crate::hash::{content_hash, ContentHash};
use crate::source::{SlideSource, TextExtractor};

/// Upper bound on accepted slides when none is configured. A presentation
/// longer than this is assumed to be a looping or broken deck.
pub const DEFAULT_MAX_SLIDES: usize = 200;

/// Why the walker stopped.
///
/// The duplicate-hash heuristic alone cannot tell "I am done" from
/// "something broke", so the walker reports which condition fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The captured frame was byte-identical (by digest) to the previous
    /// one: no more new slides.
    DuplicateFrame,
    /// The frame could not be captured, or the "next" control could not
    /// be found or clicked in time. Logged, never retried.
    AdvanceFailed,
    /// The configured slide bound was reached.
    SlideLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFrame => write!(f, "duplicate frame"),
            Self::AdvanceFailed => write!(f, "advance failed"),
            Self::SlideLimit => write!(f, "slide limit reached"),
        }
    }
}

/// Outcome of one capture run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSummary {
    /// Number of slides accepted and appended to the store.
    pub accepted: usize,
    /// The termination condition that ended the loop.
    pub reason: StopReason,
}

/// Configuration for one capture run.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Store key the extracted text is appended under.
    pub label: String,
    /// Directory for per-slide screenshot artifacts; none keeps frames
    /// in memory only.
    pub screenshot_dir: Option<PathBuf>,
    /// Maximum number of slides to accept before stopping.
    pub max_slides: usize,
}

impl WalkConfig {
    /// Config for the given label with defaults.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            screenshot_dir: None,
            max_slides: DEFAULT_MAX_SLIDES,
        }
    }

    /// Keep each accepted frame on disk as `screenshot_<label>_<n>.png`.
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    /// Bound the number of accepted slides.
    pub fn with_max_slides(mut self, max: usize) -> Self {
        self.max_slides = max;
        self
    }
}

/// Drives a [`SlideSource`] forward one slide at a time.
pub struct SlideWalker {
    config: WalkConfig,
}

impl SlideWalker {
    /// Create a walker for one capture run.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Run the capture loop until a termination condition fires.
    ///
    /// Each iteration captures the visible frame, hashes it, and compares
    /// the digest with the previous iteration's. An equal digest discards
    /// the frame and stops the loop. Otherwise the frame is OCR'd and the
    /// text appended under the configured label, and the source is asked
    /// to advance. The first frame is always accepted; there is no prior
    /// digest to match.
    ///
    /// OCR and image-decode failures propagate and abort the run.
    /// Capture and advance failures end the loop cleanly with
    /// [`StopReason::AdvanceFailed`].
    pub fn run<S, X>(
        &self,
        source: &mut S,
        extractor: &X,
        store: &mut TextStore,
    ) -> Result<WalkSummary>
    where
        S: SlideSource,
        X: TextExtractor,
    {
        let label = &self.config.label;
        let mut slide_number = match &self.config.screenshot_dir {
            Some(dir) => next_slide_number(dir, label)?,
            None => 1,
        };
        let mut last_hash: Option<ContentHash> = None;
        let mut accepted = 0usize;

        loop {
            if accepted >= self.config.max_slides {
                log::warn!(
                    "Slide limit {} reached for '{}'; stopping",
                    self.config.max_slides,
                    label
                );
                return Ok(WalkSummary {
                    accepted,
                    reason: StopReason::SlideLimit,
                });
            }

            let frame = match source.capture() {
                Ok(frame) => frame,
                Err(e) => {
                    log::warn!("Failed to capture slide {} for '{}': {}", slide_number, label, e);
                    return Ok(WalkSummary {
                        accepted,
                        reason: StopReason::AdvanceFailed,
                    });
                }
            };

            let artifact = self.save_screenshot(&frame, slide_number)?;

            let hash = content_hash(&frame);
            if last_hash == Some(hash) {
                log::info!("No more slides or duplicate slide detected for '{}'", label);
                if let Some(path) = artifact {
                    if let Err(e) = fs::remove_file(&path) {
                        log::warn!("Failed to remove duplicate screenshot {}: {}", path.display(), e);
                    }
                }
                return Ok(WalkSummary {
                    accepted,
                    reason: StopReason::DuplicateFrame,
                });
            }
            last_hash = Some(hash);

            let text = extractor.extract(&frame)?;
            store.append(label, &text)?;
            accepted += 1;
            log::debug!("Accepted slide {} for '{}'", slide_number, label);

            if let Err(e) = source.advance() {
                log::info!(
                    "No more slides or an error occurred on slide {} for '{}': {}",
                    slide_number,
                    label,
                    e
                );
                return Ok(WalkSummary {
                    accepted,
                    reason: StopReason::AdvanceFailed,
                });
            }
            slide_number += 1;
        }
    }

    /// Write the frame to the screenshot directory, if one is configured.
    fn save_screenshot(&self, frame: &[u8], slide_number: usize) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.config.screenshot_dir else {
            return Ok(None);
        };
        let path = dir.join(screenshot_filename(&self.config.label, slide_number));
        fs::write(&path, frame)?;
        Ok(Some(path))
    }
}

/// File name of the per-slide screenshot artifact.
fn screenshot_filename(label: &str, slide_number: usize) -> String {
    format!("screenshot_{}_{}.png", label, slide_number)
}

/// Next free slide number in a screenshot directory.
///
/// Scans for existing `screenshot_<label>_<n>.png` files and returns
/// max(n) + 1, or 1 when there are none (or the directory does not exist
/// yet). Lets a manually restarted run keep numbering where it left off.
pub fn next_slide_number(dir: &Path, label: &str) -> Result<usize> {
    if !dir.exists() {
        return Ok(1);
    }

    let prefix = format!("screenshot_{}_", label);
    let mut highest = 0usize;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(stem) = name.strip_suffix(".png") else { continue };
        let Some(number) = stem.strip_prefix(&prefix) else { continue };
        if let Ok(number) = number.parse::<usize>() {
            highest = highest.max(number);
        }
    }

    Ok(highest + 1)
}
