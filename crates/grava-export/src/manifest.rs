//! Stick-length manifest serializer.
//!
//! Renders stick primitives into the fixed-width text report used at
//! the cutting jig: one line per stick, in primitive order, so the
//! operator can work through the sheet pixel by pixel.
//!
//! Line format: `{x:>3}x{y:>3} - {length:>2}` where x/y are the stick's
//! center in mm and length is the post-jig-offset cut length, all
//! rounded to the nearest integer.

use std::fmt::Write;

use grava_pipeline::Stick;

/// Round a coordinate or length to the nearest whole millimetre.
#[allow(clippy::cast_possible_truncation)]
fn whole_mm(value: f64) -> i64 {
    value.round() as i64
}

/// Serialize sticks into the manifest text, one line per stick in
/// input order.
#[must_use]
pub fn to_stick_manifest(sticks: &[Stick]) -> String {
    let mut out = String::new();
    for stick in sticks {
        let _ = writeln!(
            out,
            "{:>3}x{:>3} - {:>2}",
            whole_mm(stick.center.x),
            whole_mm(stick.center.y),
            whole_mm(stick.length),
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grava_pipeline::Point;

    use super::*;

    fn stick(x: f64, y: f64, length: f64) -> Stick {
        Stick {
            center: Point::new(x, y),
            radius: 6.0,
            length,
        }
    }

    #[test]
    fn empty_input_produces_empty_manifest() {
        assert_eq!(to_stick_manifest(&[]), "");
    }

    #[test]
    fn line_format_is_fixed_width() {
        let manifest = to_stick_manifest(&[stick(5.0, 10.0, 35.0)]);
        assert_eq!(manifest, "  5x 10 - 35\n");
    }

    #[test]
    fn values_are_rounded_to_nearest_integer() {
        let manifest = to_stick_manifest(&[stick(104.6, 9.4, 34.5)]);
        assert_eq!(manifest, "105x  9 - 35\n");
    }

    #[test]
    fn wide_values_extend_the_field() {
        // Values wider than the field are not truncated.
        let manifest = to_stick_manifest(&[stick(1234.0, 5.0, 120.0)]);
        assert_eq!(manifest, "1234x  5 - 120\n");
    }

    #[test]
    fn line_order_matches_primitive_order() {
        let manifest = to_stick_manifest(&[
            stick(5.0, 15.0, 50.0),
            stick(15.0, 15.0, 20.0),
            stick(5.0, 5.0, 35.0),
        ]);
        let lines: Vec<&str> = manifest.lines().collect();
        assert_eq!(lines, vec!["  5x 15 - 50", " 15x 15 - 20", "  5x  5 - 35"]);
    }

    #[test]
    fn manifest_round_trips_through_a_line_parser() {
        let sticks = vec![stick(5.2, 14.9, 49.6), stick(15.0, 5.1, 20.4)];
        let manifest = to_stick_manifest(&sticks);

        for (line, original) in manifest.lines().zip(&sticks) {
            let (coords, length) = line.split_once(" - ").unwrap();
            let (x, y) = coords.split_once('x').unwrap();
            let x: f64 = x.trim().parse().unwrap();
            let y: f64 = y.trim().parse().unwrap();
            let length: f64 = length.trim().parse().unwrap();
            assert!((x - original.center.x).abs() <= 0.5);
            assert!((y - original.center.y).abs() <= 0.5);
            assert!((length - original.length).abs() <= 0.5);
        }
    }
}
