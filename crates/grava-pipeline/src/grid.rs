//! Normalized grayscale pixel grid.
//!
//! The grid is the hand-off point from raster preparation to geometry
//! generation: a row-major `height x width` array of `f64` intensities
//! in `[0, 1]`, where `0` is black, `1` is white, and row 0 is the top
//! of the source image.
//!
//! The grid itself only polices its shape. Intensity range is the
//! geometry calculator's contract so that a broken upstream collaborator
//! fails loudly at the point of use rather than being clamped away.

use crate::types::{Dimensions, PipelineError};

/// Row-major grid of normalized grayscale intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    dimensions: Dimensions,
    /// Row-major samples, `dimensions.pixel_count()` long.
    data: Vec<f64>,
}

impl PixelGrid {
    /// Create a grid from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `data` does not hold
    /// exactly `width * height` samples.
    pub fn new(dimensions: Dimensions, data: Vec<f64>) -> Result<Self, PipelineError> {
        let expected = dimensions.pixel_count();
        if data.len() != expected {
            return Err(PipelineError::InvalidConfig(format!(
                "pixel data holds {} samples but {}x{} needs {expected}",
                data.len(),
                dimensions.width,
                dimensions.height,
            )));
        }
        Ok(Self { dimensions, data })
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Intensity at the given pixel, or `None` when `col` or `row` is
    /// outside [`Self::dimensions`].
    #[must_use]
    pub fn get(&self, col: u32, row: u32) -> Option<f64> {
        if col >= self.dimensions.width || row >= self.dimensions.height {
            return None;
        }
        let index = row as usize * self.dimensions.width as usize + col as usize;
        self.data.get(index).copied()
    }

    /// Row-major samples.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    /// The samples one image row at a time, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // A zero-width grid holds no samples, so any chunk size yields
        // nothing.
        self.data.chunks_exact((self.dimensions.width as usize).max(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn new_accepts_matching_length() {
        let grid = PixelGrid::new(dims(2, 3), vec![0.0; 6]).unwrap();
        assert_eq!(grid.dimensions(), dims(2, 3));
        assert_eq!(grid.samples().len(), 6);
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = PixelGrid::new(dims(2, 3), vec![0.0; 5]).unwrap_err();
        assert!(err.to_string().contains("5 samples"), "got: {err}");
    }

    #[test]
    fn get_is_row_major() {
        // 2x2: [top-left, top-right, bottom-left, bottom-right]
        let grid = PixelGrid::new(dims(2, 2), vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(grid.get(0, 0), Some(0.1));
        assert_eq!(grid.get(1, 0), Some(0.2));
        assert_eq!(grid.get(0, 1), Some(0.3));
        assert_eq!(grid.get(1, 1), Some(0.4));
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let grid = PixelGrid::new(dims(2, 2), vec![0.0; 4]).unwrap();
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn rows_yields_one_slice_per_image_row() {
        let grid = PixelGrid::new(dims(2, 3), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let rows: Vec<&[f64]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0.0, 0.1][..], &[0.2, 0.3], &[0.4, 0.5]]);
    }
}
