//! Alpha-blended overlay of a colorized mask on the original image

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::config::OverlayOptions;
use crate::constants::overlay::BACKGROUND_THRESHOLD;

/// Blend a colorized mask over the original with the default threshold
///
/// See [`overlay_with`].
pub fn overlay(original: &RgbImage, colorized: &RgbImage, alpha: f32) -> RgbImage {
    overlay_with(
        original,
        colorized,
        &OverlayOptions {
            alpha,
            threshold: BACKGROUND_THRESHOLD,
        },
    )
}

/// Blend a colorized mask over the original image
///
/// A mask whose dimensions differ from the original is first resampled
/// (nearest neighbour, so palette colors survive) to the original's size.
/// Mask pixels whose mean channel value is at or below `threshold` leave
/// the original pixel untouched; all others become
/// `(1 - alpha) * original + alpha * mask`, clamped and rounded.
///
/// `alpha` is clamped to `[0, 1]`. The output always has the original's
/// dimensions.
pub fn overlay_with(original: &RgbImage, colorized: &RgbImage, options: &OverlayOptions) -> RgbImage {
    let (width, height) = original.dimensions();
    let alpha = if options.alpha.is_nan() {
        0.0
    } else {
        options.alpha.clamp(0.0, 1.0)
    };

    if colorized.width() == 0 || colorized.height() == 0 {
        debug!("empty mask, returning original");
        return original.clone();
    }

    let mask: Cow<'_, RgbImage> = if colorized.dimensions() == (width, height) {
        Cow::Borrowed(colorized)
    } else {
        debug!(
            mask_width = colorized.width(),
            mask_height = colorized.height(),
            width,
            height,
            "resampling mask to original dimensions"
        );
        Cow::Owned(imageops::resize(colorized, width, height, FilterType::Nearest))
    };

    let mut out = original.clone();
    for (dst, m) in out.pixels_mut().zip(mask.pixels()) {
        if mean_channel(m) > options.threshold {
            *dst = blend(dst, m, alpha);
        }
    }
    out
}

fn mean_channel(pixel: &Rgb<u8>) -> f32 {
    pixel.0.iter().map(|&c| c as f32).sum::<f32>() / 3.0
}

fn blend(original: &Rgb<u8>, mask: &Rgb<u8>, alpha: f32) -> Rgb<u8> {
    let mut out = [0u8; 3];
    for (c, value) in out.iter_mut().enumerate() {
        let mixed = (1.0 - alpha) * original[c] as f32 + alpha * mask[c] as f32;
        *value = mixed.clamp(0.0, 255.0).round() as u8;
    }
    Rgb(out)
}
