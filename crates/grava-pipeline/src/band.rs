//! Band contour tracer.
//!
//! The band variant depicts each image row as a continuous modulated
//! band instead of discrete circles: every per-pixel disc contributes
//! an upper and a lower offset point, and a natural cubic spline is
//! traced through each set to form the row's two envelope curves.
//!
//! The tracer consumes the geometry calculator's row-major disc
//! sequence and relies on its ordering contract: consecutive chunks of
//! `width` samples form one image row, rows arriving top to bottom.

use crate::geometry::Disc;
use crate::spline;
use crate::types::{PipelineError, Point, Polyline};

/// Fraction of the disc radius the envelope points are offset by.
///
/// Slightly inside the disc edge so neighbouring rows keep a visible
/// gap even at full black.
pub const ENVELOPE_FACTOR: f64 = 0.8;

/// Number of polyline vertices sampled per envelope curve.
pub const SAMPLES_PER_ROW: usize = 101;

/// Minimum samples per row for cubic interpolation.
///
/// Rows below this are rejected with
/// [`PipelineError::DegenerateRow`] rather than silently traced with a
/// lower-order curve.
pub const MIN_ROW_POINTS: usize = 4;

/// Upper and lower envelope polylines for one image row.
#[derive(Debug, Clone, PartialEq)]
pub struct BandRow {
    /// Envelope through the `y + radius * 0.8` offset points.
    pub upper: Polyline,
    /// Envelope through the `y - radius * 0.8` offset points.
    pub lower: Polyline,
}

/// Trace envelope curves through a row-major disc sequence.
///
/// For each disc the upper offset point is
/// `(x, y + radius * ENVELOPE_FACTOR)` and the lower is its mirror.
/// Each `width`-sized chunk becomes one [`BandRow`], upper envelope
/// fitted first, rows emitted top to bottom in input order. Every
/// envelope is sampled at [`SAMPLES_PER_ROW`] vertices.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] if `width` is zero or the
/// sample count is not a multiple of `width`, and
/// [`PipelineError::DegenerateRow`] if a row has fewer than
/// [`MIN_ROW_POINTS`] samples.
pub fn trace(samples: &[Disc], width: u32) -> Result<Vec<BandRow>, PipelineError> {
    if width == 0 {
        return Err(PipelineError::InvalidConfig(
            "band row width must be positive".to_owned(),
        ));
    }
    let width = width as usize;
    if !samples.len().is_multiple_of(width) {
        return Err(PipelineError::InvalidConfig(format!(
            "sample count {} is not a multiple of row width {width}",
            samples.len(),
        )));
    }

    let mut rows = Vec::with_capacity(samples.len() / width);
    for (row, chunk) in samples.chunks_exact(width).enumerate() {
        if chunk.len() < MIN_ROW_POINTS {
            return Err(PipelineError::DegenerateRow {
                row,
                points: chunk.len(),
            });
        }

        let offset = |sign: f64| -> Vec<Point> {
            chunk
                .iter()
                .map(|disc| {
                    Point::new(
                        disc.center.x,
                        disc.radius.mul_add(sign * ENVELOPE_FACTOR, disc.center.y),
                    )
                })
                .collect()
        };

        let upper = spline::fit(&offset(1.0), SAMPLES_PER_ROW);
        let lower = spline::fit(&offset(-1.0), SAMPLES_PER_ROW);
        rows.push(BandRow { upper, lower });
    }

    Ok(rows)
}
