//! Shared types for the grava fabrication-geometry pipeline.

use serde::{Deserialize, Serialize};

/// A 2D point in world coordinates.
///
/// Coordinates are millimetres with the origin at the bottom-left of
/// the drawable area; y increases upward. Pixel row 0 (the top of the
/// source image) therefore maps to the highest y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in mm from the left edge of the drawable area.
    pub x: f64,
    /// Vertical position in mm from the bottom edge of the drawable area.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An open chain of vertices, drawn as consecutive straight segments.
///
/// Band envelopes are polylines; the DXF writer emits one `LINE`
/// entity per vertex pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// `true` when the polyline has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// First vertex, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Last vertex, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// All vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

/// Pixel-grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Total number of pixels in the grid.
    #[must_use]
    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors that can occur while turning a pixel grid into geometry.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configuration record is malformed or internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The pixel grid does not match the configured dimensions.
    #[error("pixel grid is {actual} but configuration expects {expected}")]
    ShapeMismatch {
        /// Dimensions declared by the configuration.
        expected: Dimensions,
        /// Dimensions of the supplied grid.
        actual: Dimensions,
    },

    /// An intensity sample fell outside the normalized `[0, 1]` range.
    ///
    /// The geometry calculator never clamps; upstream raster
    /// preparation guarantees the range, so a violation indicates a
    /// broken collaborator rather than a recoverable condition.
    #[error("intensity {value} at column {col}, row {row} is outside [0, 1]")]
    IntensityOutOfRange {
        /// Pixel column of the offending sample.
        col: u32,
        /// Pixel row of the offending sample.
        row: u32,
        /// The out-of-range value.
        value: f64,
    },

    /// A band row has too few sample points for cubic interpolation.
    #[error("band row {row} has {points} sample points; at least {min} required", min = crate::band::MIN_ROW_POINTS)]
    DegenerateRow {
        /// Zero-based image row index.
        row: usize,
        /// Number of sample points in the row.
        points: usize,
    },

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}
