//! Unified image loading and encoding
//!
//! Every raster entering the crate (uploads, backend masks, logos) passes
//! through here and comes out as an 8-bit RGB buffer; the overlay leaves as
//! PNG bytes.
//!
//! ## Supported Formats
//!
//! Decoding goes through the `image` crate with the PNG, JPEG, BMP, GIF,
//! TIFF and WebP codecs enabled. The format is always detected from the
//! content's magic bytes, so a file's extension does not matter.

use crate::error::{ReportError, Result};
use image::{DynamicImage, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Load an image file and normalize it to RGB
///
/// # Errors
///
/// Returns `ReportError::ImageLoadError` if the file cannot be opened or
/// decoded.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path).map_err(|e| {
        ReportError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img = reader.with_guessed_format().map_err(|e| {
        ReportError::image_load(format!("Failed to read image file: {}", path.display()), e)
    })?;

    let img: DynamicImage = img.decode().map_err(|e| {
        ReportError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Decode an in-memory image, keeping its native channel layout
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ReportError::image_load("Failed to read image buffer", e))?;

    reader
        .decode()
        .map_err(|e| ReportError::image_load("Failed to decode image buffer", e))
}

/// Decode an in-memory image and normalize it to RGB
///
/// Alpha is dropped and grayscale is expanded, matching what the upload
/// path expects of an original seismic line.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    Ok(decode_image(bytes)?.to_rgb8())
}

/// Encode an RGB image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| ReportError::image_encode("Failed to encode PNG", e))?;
    Ok(out)
}
