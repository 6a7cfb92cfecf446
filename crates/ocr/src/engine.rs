//! Tesseract invocation with a fixed language and engine-mode setup.
//!
//! The preprocessed image is written to a scratch PNG and handed to the
//! `tesseract` binary with `stdout` as the output target. Text only; no
//! bounding boxes, no confidence data, no retries.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::GrayImage;

use slidecap_core::{Error, Result};

/// OCR engine configuration. Defaults match the capture deployment:
/// Russian plus English, default OCR engine mode, uniform-block page
/// segmentation.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    lang: String,
    oem: u32,
    psm: u32,
    tessdata_dir: Option<PathBuf>,
}

impl Default for OcrEngine {
    fn default() -> Self {
        Self {
            lang: "rus+eng".to_string(),
            oem: 3,
            psm: 6,
            tessdata_dir: None,
        }
    }
}

impl OcrEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Tesseract language spec (e.g. "eng" or "rus+eng").
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Point Tesseract at a non-default tessdata directory.
    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    /// Check whether the `tesseract` binary can be invoked at all.
    pub fn is_available() -> bool {
        Command::new("tesseract").arg("--version").output().is_ok()
    }

    /// Recognize text in a preprocessed image.
    ///
    /// Returns the raw recognized text, which may be empty. A failed or
    /// unspawnable subprocess is an OCR error and aborts the caller's run.
    pub fn recognize(&self, image: &GrayImage) -> Result<String> {
        let scratch = tempfile::Builder::new()
            .prefix("slidecap_ocr_")
            .suffix(".png")
            .tempfile()?;
        image
            .save(scratch.path())
            .map_err(|e| Error::ImageError(format!("Failed to write scratch PNG: {}", e)))?;

        let output = Command::new("tesseract")
            .args(self.cli_args(scratch.path()))
            .output()
            .map_err(|e| Error::OcrError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::OcrError(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // Tesseract reports resolution guesses and similar on stderr even
        // on success.
        if !output.stderr.is_empty() {
            log::debug!(
                "tesseract stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Argument list for one invocation, minus the program name.
    fn cli_args(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![
            image_path.to_string_lossy().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.lang.clone(),
            "--oem".to_string(),
            self.oem.to_string(),
            "--psm".to_string(),
            self.psm.to_string(),
        ];
        if let Some(dir) = &self.tessdata_dir {
            args.push("--tessdata-dir".to_string());
            args.push(dir.to_string_lossy().to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cli_args() {
        let engine = OcrEngine::new();
        let args = engine.cli_args(Path::new("/tmp/slide.png"));

        assert_eq!(
            args,
            vec!["/tmp/slide.png", "stdout", "-l", "rus+eng", "--oem", "3", "--psm", "6"]
        );
    }

    #[test]
    fn test_custom_lang_and_tessdata_dir() {
        let engine = OcrEngine::new()
            .with_lang("eng")
            .with_tessdata_dir("/opt/tessdata");
        let args = engine.cli_args(Path::new("slide.png"));

        assert_eq!(args[3], "eng");
        assert_eq!(
            &args[args.len() - 2..],
            &["--tessdata-dir".to_string(), "/opt/tessdata".to_string()]
        );
    }
}
