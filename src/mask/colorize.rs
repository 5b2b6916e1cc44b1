//! Facies class mask and palette lookup
//!
//! A class mask holds one small integer per pixel. Masks arrive from the
//! backend as encoded rasters whose channels are all copies of the label,
//! so only the first channel is read.

use image::{DynamicImage, Rgb, RgbImage};
use ndarray::{Array2, ArrayView3, Axis};
use palette::Srgb;
use tracing::debug;

use crate::constants::facies;
use crate::error::{ReportError, Result};
use crate::image_loader;

/// Per-pixel facies class IDs, indexed `[row, column]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMask {
    ids: Array2<i64>,
}

impl ClassMask {
    /// Wrap a 2-D grid of class IDs
    pub fn from_array2(ids: Array2<i64>) -> Self {
        Self { ids }
    }

    /// Build from a `[row, column, channel]` grid, reading channel 0
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidParameter` if the grid has no channels.
    pub fn from_array3(grid: ArrayView3<'_, i64>) -> Result<Self> {
        if grid.len_of(Axis(2)) == 0 {
            return Err(ReportError::InvalidParameter {
                parameter: "mask.channels".into(),
                value: "0".into(),
            });
        }
        Ok(Self {
            ids: grid.index_axis(Axis(2), 0).to_owned(),
        })
    }

    /// Build from a decoded raster, reading its first channel
    ///
    /// 16-bit rasters keep their full sample value; every other layout is
    /// read as 8-bit.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let ids = match image {
            DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_) => {
                let rgb = image.to_rgb16();
                Array2::from_shape_fn((height, width), |(y, x)| {
                    rgb.get_pixel(x as u32, y as u32)[0] as i64
                })
            }
            _ => {
                let rgb = image.to_rgb8();
                Array2::from_shape_fn((height, width), |(y, x)| {
                    rgb.get_pixel(x as u32, y as u32)[0] as i64
                })
            }
        };
        Self { ids }
    }

    /// Decode an encoded raster (PNG, JPEG, ...) into a class mask
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image_loader::decode_image(bytes)?;
        Ok(Self::from_image(&image))
    }

    pub fn width(&self) -> u32 {
        self.ids.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.ids.nrows() as u32
    }

    /// Class ID at pixel (x, y)
    pub fn get(&self, x: u32, y: u32) -> Option<i64> {
        self.ids.get((y as usize, x as usize)).copied()
    }

    /// Number of pixels whose ID has no palette entry
    pub fn unmapped_count(&self) -> usize {
        self.ids.iter().filter(|&&id| class_color(id).is_none()).count()
    }
}

/// Palette color for a class ID, `None` if the ID has no entry
pub fn class_color(id: i64) -> Option<Srgb<u8>> {
    let index = usize::try_from(id).ok()?;
    facies::PALETTE
        .get(index)
        .map(|&[r, g, b]| Srgb::new(r, g, b))
}

/// Map every class ID to its palette color
///
/// IDs without a palette entry are left black.
pub fn colorize(mask: &ClassMask) -> RgbImage {
    let mut out = RgbImage::new(mask.width(), mask.height());
    for ((y, x), &id) in mask.ids.indexed_iter() {
        let rgb = match class_color(id) {
            Some(color) => {
                let (r, g, b) = color.into_components();
                [r, g, b]
            }
            None => facies::UNMAPPED,
        };
        out.put_pixel(x as u32, y as u32, Rgb(rgb));
    }

    let unmapped = mask.unmapped_count();
    if unmapped > 0 {
        debug!(unmapped, "class mask contains IDs outside the palette");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};
    use ndarray::{array, Array3};

    #[test]
    fn test_every_palette_entry_exact() {
        let ids = Array2::from_shape_fn((1, facies::CLASS_COUNT), |(_, x)| x as i64);
        let colored = colorize(&ClassMask::from_array2(ids));
        for (x, expected) in facies::PALETTE.iter().enumerate() {
            assert_eq!(colored.get_pixel(x as u32, 0).0, *expected);
        }
    }

    #[test]
    fn test_unknown_ids_are_black() {
        let mask = ClassMask::from_array2(array![[15, -1], [255, 1000]]);
        let colored = colorize(&mask);
        assert!(colored.pixels().all(|p| p.0 == [0, 0, 0]));
        assert_eq!(mask.unmapped_count(), 4);
    }

    #[test]
    fn test_two_by_two_scenario() {
        let mask = ClassMask::from_array2(array![[0, 1], [2, 0]]);
        let colored = colorize(&mask);
        assert_eq!(colored.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(colored.get_pixel(1, 0).0, [165, 42, 42]);
        assert_eq!(colored.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(colored.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_three_channel_grid_reads_first_channel() {
        let mut grid = Array3::<i64>::zeros((2, 3, 3));
        grid[[1, 2, 0]] = 4;
        grid[[1, 2, 1]] = 9;
        grid[[0, 0, 2]] = 7;

        let mask = ClassMask::from_array3(grid.view()).unwrap();
        assert_eq!((mask.width(), mask.height()), (3, 2));
        assert_eq!(mask.get(2, 1), Some(4));
        assert_eq!(mask.get(0, 0), Some(0));
        assert_eq!(mask.get(3, 0), None);
    }

    #[test]
    fn test_zero_channel_grid_rejected() {
        let grid = Array3::<i64>::zeros((2, 2, 0));
        assert!(ClassMask::from_array3(grid.view()).is_err());
    }

    #[test]
    fn test_from_sixteen_bit_image() {
        let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(2, 1, |x, _| Luma([if x == 0 { 3 } else { 300 }]));
        let mask = ClassMask::from_image(&DynamicImage::ImageLuma16(buf));
        assert_eq!(mask.get(0, 0), Some(3));
        assert_eq!(mask.get(1, 0), Some(300));
    }

    #[test]
    fn test_decode_png_mask() {
        let mut rgb = RgbImage::new(2, 2);
        rgb.put_pixel(1, 0, Rgb([2, 2, 2]));
        let bytes = image_loader::encode_png(&rgb).unwrap();

        let mask = ClassMask::decode(&bytes).unwrap();
        assert_eq!(mask.get(1, 0), Some(2));
        assert_eq!(mask.get(0, 1), Some(0));
    }
}
