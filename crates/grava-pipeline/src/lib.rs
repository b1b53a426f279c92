//! grava-pipeline: pure fabrication-geometry pipeline (sans-IO).
//!
//! Converts a normalized grayscale pixel grid into physical geometry
//! for CNC/laser pixel-art through:
//! raster preparation -> layout transform -> per-variant geometry
//! calculation -> (band variant only) contour tracing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! data and returns structured geometry. File writing and the DXF /
//! manifest serializers live in `grava-export`; orchestration lives in
//! the `grava` CLI.

pub mod band;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod layout;
pub mod raster;
pub mod spline;
pub mod types;

pub use band::BandRow;
pub use config::{Configuration, Margin, StickConfig, Variant};
pub use geometry::{Disc, Stick, StickSet};
pub use grid::PixelGrid;
pub use types::{Dimensions, PipelineError, Point, Polyline};

/// Geometry produced for one (configuration, image) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Circle variant: one disc per pixel.
    Circles(Vec<Disc>),
    /// Band variant: traced envelope pair per image row.
    Bands(Vec<BandRow>),
    /// Stick variant: one stick per pixel plus the raw-length total.
    Sticks(StickSet),
}

/// Run the geometry pipeline for one configuration against one grid.
///
/// Validates the configuration, then dispatches on its variant:
///
/// 1. Circle -- per-pixel discs, drawn verbatim downstream.
/// 2. Band -- per-pixel discs fed through the contour tracer.
/// 3. Stick -- per-pixel sticks with the raw-length aggregate.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for configuration
/// violations, [`PipelineError::ShapeMismatch`] when the grid does not
/// match the configured dimensions,
/// [`PipelineError::IntensityOutOfRange`] for samples outside `[0, 1]`,
/// and [`PipelineError::DegenerateRow`] when a band row is too narrow
/// to interpolate.
pub fn build(grid: &PixelGrid, config: &Configuration) -> Result<Geometry, PipelineError> {
    config.validate()?;

    match config.variant {
        Variant::Circle => Ok(Geometry::Circles(geometry::discs(grid, config)?)),
        Variant::Band => {
            let samples = geometry::discs(grid, config)?;
            Ok(Geometry::Bands(band::trace(&samples, config.width)?))
        }
        Variant::Stick => Ok(Geometry::Sticks(geometry::sticks(grid, config)?)),
    }
}
