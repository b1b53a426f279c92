//! Layout transform: pixel-grid coordinates to world-space mm.
//!
//! [`place`] is the single source of truth for the pixel-to-world
//! mapping. Every variant calls it identically so that circle, band,
//! and stick outputs are spatially aligned cell for cell.

use crate::config::Configuration;
use crate::types::Point;

/// Map a pixel cell to its center point in world-space mm.
///
/// The x coordinate is the cell center offset by the left margin; the
/// y coordinate flips the image's top-down row order into the world's
/// bottom-up axis, so row 0 (top of the source image) lands at the
/// highest y:
///
/// ```text
/// x = col * pitch + pitch/2 + margin.width
/// y = (height * pitch + margin.height) - row * pitch - pitch/2
/// ```
///
/// Pure and deterministic; injective for `0 <= col < width`,
/// `0 <= row < height`.
#[must_use]
pub fn place(col: u32, row: u32, config: &Configuration) -> Point {
    let pitch = config.mm_per_pixel;
    let x = f64::from(col).mul_add(pitch, pitch / 2.0) + config.margin.width;
    let total_height = f64::from(config.height).mul_add(pitch, config.margin.height);
    let y = total_height - f64::from(row).mul_add(pitch, pitch / 2.0);
    Point::new(x, y)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{Margin, Variant};

    fn config(width: u32, height: u32, mm_per_pixel: f64, margin: Margin) -> Configuration {
        Configuration {
            variant: Variant::Circle,
            width,
            height,
            mm_per_pixel,
            margin,
            stick: None,
        }
    }

    const NO_MARGIN: Margin = Margin {
        width: 0.0,
        height: 0.0,
    };

    #[test]
    fn first_cell_of_single_row_grid() {
        // 2x1 at 10 mm, no margin: cell centers at x = 5 and 15, y = 5.
        let config = config(2, 1, 10.0, NO_MARGIN);
        assert_eq!(place(0, 0, &config), Point::new(5.0, 5.0));
        assert_eq!(place(1, 0, &config), Point::new(15.0, 5.0));
    }

    #[test]
    fn row_zero_maps_to_highest_y() {
        let config = config(1, 3, 10.0, NO_MARGIN);
        let top = place(0, 0, &config);
        let middle = place(0, 1, &config);
        let bottom = place(0, 2, &config);
        assert!((top.y - 25.0).abs() < f64::EPSILON);
        assert!((middle.y - 15.0).abs() < f64::EPSILON);
        assert!((bottom.y - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn margin_offsets_x_and_y() {
        let config = config(
            2,
            2,
            6.0,
            Margin {
                width: 2.0,
                height: 3.0,
            },
        );
        let p = place(0, 0, &config);
        // x = 0*6 + 3 + 2 = 5; y = (12 + 3) - 0 - 3 = 12.
        assert!((p.x - 5.0).abs() < f64::EPSILON);
        assert!((p.y - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn place_is_deterministic() {
        let config = config(4, 4, 3.5, NO_MARGIN);
        assert_eq!(place(2, 3, &config), place(2, 3, &config));
    }

    #[test]
    fn place_is_injective_across_the_grid() {
        let config = config(8, 6, 2.5, NO_MARGIN);
        let mut seen = Vec::new();
        for row in 0..config.height {
            for col in 0..config.width {
                let p = place(col, row, &config);
                assert!(
                    !seen.iter().any(|q: &Point| *q == p),
                    "duplicate placement for ({col}, {row})",
                );
                seen.push(p);
            }
        }
        assert_eq!(seen.len(), 48);
    }

    #[test]
    fn adjacent_cells_are_one_pitch_apart() {
        let config = config(3, 3, 7.0, NO_MARGIN);
        let a = place(0, 0, &config);
        let b = place(1, 0, &config);
        let c = place(0, 1, &config);
        assert!((b.x - a.x - 7.0).abs() < 1e-12);
        assert!((b.y - a.y).abs() < 1e-12);
        assert!((a.y - c.y - 7.0).abs() < 1e-12);
        assert!((a.x - c.x).abs() < 1e-12);
    }
}
