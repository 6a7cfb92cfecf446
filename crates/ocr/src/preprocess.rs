//! Fixed preprocessing recipe applied to raw screenshots before OCR.
//!
//! Grayscale, contrast boost, 2× Lanczos upscale, then a hard binary
//! threshold. The output contains only black and white pixels.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};

use slidecap_core::{Error, Result};

/// Pixels at or above this luma value become white, the rest black.
pub const BINARY_THRESHOLD: u8 = 140;

/// Contrast adjustment applied before thresholding.
const CONTRAST_BOOST: f32 = 50.0;

/// Upscale factor; doubles the effective DPI for Tesseract.
const UPSCALE_FACTOR: u32 = 2;

/// Decode raw screenshot bytes and run the preprocessing recipe.
///
/// Undecodable input propagates as an image error; there is no fallback.
pub fn preprocess_image(bytes: &[u8]) -> Result<GrayImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::ImageError(format!("Failed to decode screenshot: {}", e)))?;
    Ok(preprocess(&decoded))
}

/// Run the fixed recipe on an already-decoded image.
pub fn preprocess(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let contrasted = imageops::contrast(&gray, CONTRAST_BOOST);

    let (width, height) = contrasted.dimensions();
    let upscaled = imageops::resize(
        &contrasted,
        width * UPSCALE_FACTOR,
        height * UPSCALE_FACTOR,
        FilterType::Lanczos3,
    );

    let mut binary = upscaled;
    for pixel in binary.pixels_mut() {
        *pixel = if pixel.0[0] < BINARY_THRESHOLD {
            Luma([0u8])
        } else {
            Luma([255u8])
        };
    }

    binary
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x % 2 == 0 {
                image::Rgb([30, 30, 30])
            } else {
                image::Rgb([220, 220, 220])
            }
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_output_is_doubled_in_size() {
        let processed = preprocess_image(&sample_png(8, 6)).unwrap();

        assert_eq!(processed.dimensions(), (16, 12));
    }

    #[test]
    fn test_output_is_binary() {
        let processed = preprocess_image(&sample_png(8, 8)).unwrap();

        assert!(processed
            .pixels()
            .all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn test_undecodable_input_is_an_error() {
        let result = preprocess_image(b"not a png");

        assert!(matches!(result, Err(Error::ImageError(_))));
    }

    #[test]
    fn test_dark_and_light_regions_separate() {
        let img = RgbImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                image::Rgb([0, 0, 0])
            } else {
                image::Rgb([255, 255, 255])
            }
        });
        let processed = preprocess(&DynamicImage::ImageRgb8(img));

        assert_eq!(processed.get_pixel(0, 0).0[0], 0);
        let (w, _) = processed.dimensions();
        assert_eq!(processed.get_pixel(w - 1, 0).0[0], 255);
    }
}
