//! Raster preparation: decode, grayscale, resample, normalize.
//!
//! Turns raw image bytes into the [`PixelGrid`] the geometry calculator
//! consumes. The standard luminance formula is applied by the `image`
//! crate's grayscale conversion; resampling to the configured pixel
//! grid uses bilinear (Triangle) filtering, which is plenty for the
//! coarse target grids this tool works at.

use image::imageops::FilterType;

use crate::grid::PixelGrid;
use crate::types::{Dimensions, PipelineError};

/// Decode raw image bytes and reduce them to a normalized pixel grid.
///
/// Supports PNG, JPEG, BMP, and WebP (whatever the `image` crate can
/// decode). The image is converted to 8-bit grayscale, resized to
/// exactly `target.width x target.height`, and normalized so each
/// sample lies in `[0, 1]` with `0` black and `1` white.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn prepare(bytes: &[u8], target: Dimensions) -> Result<PixelGrid, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(target.width, target.height, FilterType::Triangle);
    let gray = resized.to_luma8();

    let data = gray
        .as_raw()
        .iter()
        .map(|&luma| f64::from(luma) / 255.0)
        .collect();

    PixelGrid::new(target, data)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Encode an RGBA image as PNG bytes.
    fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = prepare(&[], dims(4, 4));
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = prepare(&[0xFF, 0xFE, 0x00, 0x01], dims(4, 4));
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn output_matches_target_dimensions() {
        let img = image::RgbaImage::from_pixel(16, 9, image::Rgba([128, 128, 128, 255]));
        let grid = prepare(&png_bytes(&img), dims(8, 4)).unwrap();
        assert_eq!(grid.dimensions(), dims(8, 4));
        assert_eq!(grid.samples().len(), 32);
    }

    #[test]
    fn white_maps_to_one_and_black_to_zero() {
        let white = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]));
        let grid = prepare(&png_bytes(&white), dims(2, 2)).unwrap();
        for &sample in grid.samples() {
            assert!((sample - 1.0).abs() < f64::EPSILON);
        }

        let black = image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
        let grid = prepare(&png_bytes(&black), dims(2, 2)).unwrap();
        for &sample in grid.samples() {
            assert!(sample.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn all_samples_are_normalized() {
        let img = image::RgbaImage::from_fn(10, 10, |x, y| {
            let v = u8::try_from((x * 25 + y * 2) % 256).unwrap();
            image::Rgba([v, v, v, 255])
        });
        let grid = prepare(&png_bytes(&img), dims(5, 5)).unwrap();
        for &sample in grid.samples() {
            assert!((0.0..=1.0).contains(&sample), "sample {sample} out of range");
        }
    }
}
