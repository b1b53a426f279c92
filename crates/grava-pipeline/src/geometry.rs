//! Geometry calculator: intensity to primitive, one per pixel.
//!
//! Walks the grid in row-major order (row 0 first, column 0 first
//! within a row) and produces exactly `width * height` primitives.
//! That ordering is a contract: the band tracer groups the output into
//! `width`-sized row chunks and the stick manifest writer emits one
//! line per primitive in the same order.

use crate::config::Configuration;
use crate::grid::PixelGrid;
use crate::layout;
use crate::types::{PipelineError, Point};

/// A circle primitive.
///
/// Drawn verbatim by the circle variant; consumed as a per-pixel
/// contour sample by the band variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// Cell center in world-space mm.
    pub center: Point,
    /// Radius in mm; `0` for a fully white pixel.
    pub radius: f64,
}

/// A stick primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stick {
    /// Cell center in world-space mm.
    pub center: Point,
    /// Stick radius in mm (carve offset not included; that is applied
    /// at emission time only).
    pub radius: f64,
    /// Post-jig-offset cut length in mm.
    pub length: f64,
}

/// Stick primitives plus the material-estimation aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct StickSet {
    /// One stick per pixel, row-major.
    pub sticks: Vec<Stick>,
    /// Sum of raw (pre-jig-offset) lengths in mm across all pixels.
    pub total_raw_length: f64,
}

/// Check that the sample at `(col, row)` is in range, returning it.
fn checked(col: u32, row: u32, intensity: f64) -> Result<f64, PipelineError> {
    if (0.0..=1.0).contains(&intensity) {
        Ok(intensity)
    } else {
        Err(PipelineError::IntensityOutOfRange {
            col,
            row,
            value: intensity,
        })
    }
}

fn check_shape(grid: &PixelGrid, config: &Configuration) -> Result<(), PipelineError> {
    let expected = config.dimensions();
    let actual = grid.dimensions();
    if actual == expected {
        Ok(())
    } else {
        Err(PipelineError::ShapeMismatch { expected, actual })
    }
}

/// Compute one disc per pixel for the circle and band variants.
///
/// `radius = (1 - intensity) * mm_per_pixel / 2`: a fully black pixel
/// fills its cell, a fully white pixel leaves no mark. Intensities are
/// not re-clamped; the upstream collaborator guarantees `[0, 1]`.
///
/// # Errors
///
/// Returns [`PipelineError::ShapeMismatch`] if the grid does not match
/// the configured dimensions, or
/// [`PipelineError::IntensityOutOfRange`] for a sample outside `[0, 1]`.
pub fn discs(grid: &PixelGrid, config: &Configuration) -> Result<Vec<Disc>, PipelineError> {
    check_shape(grid, config)?;

    let mut out = Vec::with_capacity(config.dimensions().pixel_count());
    for (row, row_samples) in (0..config.height).zip(grid.rows()) {
        for (col, &intensity) in (0..config.width).zip(row_samples) {
            let intensity = checked(col, row, intensity)?;
            out.push(Disc {
                center: layout::place(col, row, config),
                radius: (1.0 - intensity) * config.mm_per_pixel / 2.0,
            });
        }
    }
    Ok(out)
}

/// Compute one stick per pixel and the total raw length.
///
/// The radius comes from the stick sub-configuration (`0` derives it
/// from the pixel pitch). The raw length is
/// `min_length + (1 - intensity) * usage_length`; the stored length is
/// the raw length reduced by the jig offset, which is what gets cut.
/// Raw lengths are summed into
/// [`total_raw_length`](StickSet::total_raw_length) for material
/// estimation.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if the configuration lacks
/// a stick sub-record, [`PipelineError::ShapeMismatch`] for dimension
/// disagreement, or [`PipelineError::IntensityOutOfRange`] for a
/// sample outside `[0, 1]`.
pub fn sticks(grid: &PixelGrid, config: &Configuration) -> Result<StickSet, PipelineError> {
    let Some(stick) = config.stick else {
        return Err(PipelineError::InvalidConfig(
            "stick variant requires a stick sub-configuration".to_owned(),
        ));
    };
    check_shape(grid, config)?;

    let radius = stick.effective_radius(config.mm_per_pixel);
    let mut out = Vec::with_capacity(config.dimensions().pixel_count());
    let mut total_raw_length = 0.0;

    for (row, row_samples) in (0..config.height).zip(grid.rows()) {
        for (col, &intensity) in (0..config.width).zip(row_samples) {
            let intensity = checked(col, row, intensity)?;
            let raw = (1.0 - intensity).mul_add(stick.usage_length, stick.min_length);
            total_raw_length += raw;
            out.push(Stick {
                center: layout::place(col, row, config),
                radius,
                length: raw - stick.length_jig_offset,
            });
        }
    }

    Ok(StickSet {
        sticks: out,
        total_raw_length,
    })
}
