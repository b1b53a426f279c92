//! DXF export serializer.
//!
//! Builds a minimal ASCII DXF document containing only LINE and CIRCLE
//! entities inside an ENTITIES section. The entity semantics -- not the
//! byte layout -- are the compatibility contract, and this minimal form
//! is accepted by standard CAD tooling.
//!
//! One serializer per variant, each a pure function returning a
//! `String`. Every document starts with the shared bounding frame: a
//! closed rectangle inflated by the configured margin on all four
//! sides.

use std::fmt::Write;

use grava_pipeline::{BandRow, Configuration, Disc, Point, Stick};

/// Incremental DXF document builder.
///
/// Group codes and values are emitted line by line; coordinates are
/// formatted to 4 decimal places.
struct Dxf {
    out: String,
}

impl Dxf {
    fn new() -> Self {
        let mut out = String::new();
        let _ = writeln!(out, "0\nSECTION\n2\nENTITIES");
        Self { out }
    }

    /// Append a LINE entity on layer 0.
    fn line(&mut self, start: Point, end: Point) {
        let _ = writeln!(
            self.out,
            "0\nLINE\n8\n0\n10\n{:.4}\n20\n{:.4}\n11\n{:.4}\n21\n{:.4}",
            start.x, start.y, end.x, end.y,
        );
    }

    /// Append a CIRCLE entity on layer 0.
    fn circle(&mut self, center: Point, radius: f64) {
        let _ = writeln!(
            self.out,
            "0\nCIRCLE\n8\n0\n10\n{:.4}\n20\n{:.4}\n40\n{:.4}",
            center.x, center.y, radius,
        );
    }

    /// Append the closed bounding frame for the configured drawing.
    fn frame(&mut self, config: &Configuration) {
        let w = config.frame_width();
        let h = config.frame_height();
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        for i in 0..corners.len() {
            self.line(corners[i], corners[(i + 1) % corners.len()]);
        }
    }

    /// Append all segments of a polyline as consecutive LINE entities.
    fn polyline(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1]);
        }
    }

    fn finish(mut self) -> String {
        let _ = writeln!(self.out, "0\nENDSEC\n0\nEOF");
        self.out
    }
}

/// Serialize the circle variant: bounding frame plus one circle per
/// disc, `(center, radius)` verbatim.
#[must_use]
pub fn to_dxf_circles(discs: &[Disc], config: &Configuration) -> String {
    let mut dxf = Dxf::new();
    dxf.frame(config);
    for disc in discs {
        dxf.circle(disc.center, disc.radius);
    }
    dxf.finish()
}

/// Serialize the stick variant: bounding frame plus one circle per
/// stick at `radius + carve_offset`.
///
/// The carve offset compensates for tool/material kerf. It is applied
/// here, at emission time, and never stored back into the primitive.
#[must_use]
pub fn to_dxf_sticks(sticks: &[Stick], carve_offset: f64, config: &Configuration) -> String {
    let mut dxf = Dxf::new();
    dxf.frame(config);
    for stick in sticks {
        dxf.circle(stick.center, stick.radius + carve_offset);
    }
    dxf.finish()
}

/// Serialize the band variant: bounding frame plus, per row, the upper
/// and lower envelope polylines and six connector segments closing the
/// silhouette to the drawing edges.
///
/// On the left edge (`x = 0`): a stub from the first upper vertex, a
/// stub from the first lower vertex, and a vertical segment joining
/// the two stub ends. Mirrored on the right edge at
/// `x = width * mm_per_pixel`. Each row thus becomes a closed outline
/// suitable for cutting.
#[must_use]
pub fn to_dxf_bands(rows: &[BandRow], config: &Configuration) -> String {
    let mut dxf = Dxf::new();
    dxf.frame(config);

    let right = config.pixel_span();
    for row in rows {
        dxf.polyline(row.upper.points());
        dxf.polyline(row.lower.points());

        if let (Some(u_first), Some(l_first), Some(u_last), Some(l_last)) = (
            row.upper.first().copied(),
            row.lower.first().copied(),
            row.upper.last().copied(),
            row.lower.last().copied(),
        ) {
            // Left-edge closure.
            dxf.line(u_first, Point::new(0.0, u_first.y));
            dxf.line(l_first, Point::new(0.0, l_first.y));
            dxf.line(Point::new(0.0, u_first.y), Point::new(0.0, l_first.y));
            // Right-edge closure.
            dxf.line(u_last, Point::new(right, u_last.y));
            dxf.line(l_last, Point::new(right, l_last.y));
            dxf.line(Point::new(right, u_last.y), Point::new(right, l_last.y));
        }
    }

    dxf.finish()
}
