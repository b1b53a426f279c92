//! Parametric natural cubic spline interpolation.
//!
//! The band tracer needs a smooth curve passing through every sample
//! point exactly, so this is interpolation with no smoothing tolerance:
//! x and y are each fit as a natural cubic spline over a uniform knot
//! parameter, then the pair is sampled at evenly spaced parameter
//! values. The tridiagonal second-derivative system is solved directly
//! (Thomas algorithm); no numerical-library curve fitting is involved,
//! keeping the routine a pure, independently testable function.

use crate::types::{Point, Polyline};

/// Solve the natural cubic spline second-derivative system for values
/// at uniform knots `t = 0, 1, ..., n-1`.
///
/// Natural boundary conditions: the second derivative is zero at both
/// ends. For fewer than three values every second derivative is zero
/// and the interpolant is piecewise linear.
fn second_derivatives(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    // Interior equations (uniform spacing h = 1):
    //   m[i-1] + 4 m[i] + m[i+1] = 6 (y[i+1] - 2 y[i] + y[i-1])
    // Forward elimination over the n-2 interior unknowns.
    let interior = n - 2;
    let mut diag = vec![4.0; interior];
    let mut rhs: Vec<f64> = (1..=interior)
        .map(|i| 6.0 * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
        .collect();

    for i in 1..interior {
        let factor = 1.0 / diag[i - 1];
        diag[i] -= factor;
        rhs[i] -= factor * rhs[i - 1];
    }

    // Back substitution; m[0] and m[n-1] stay zero (natural ends).
    m[interior] = rhs[interior - 1] / diag[interior - 1];
    for i in (1..interior).rev() {
        m[i] = (rhs[i - 1] - m[i + 1]) / diag[i - 1];
    }

    m
}

/// Evaluate the spline for `values` with second derivatives `m` at
/// parameter `t` in `[0, n-1]`.
#[allow(clippy::cast_precision_loss)]
fn eval(values: &[f64], m: &[f64], t: f64) -> f64 {
    let n = values.len();
    let clamped = t.clamp(0.0, (n - 1) as f64);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let i = (clamped.floor() as usize).min(n - 2);
    let s = clamped - i as f64;
    let a = 1.0 - s;

    // Hermite form of the cubic segment with h = 1.
    a * values[i]
        + s * values[i + 1]
        + ((a * a).mul_add(a, -a) * m[i] + (s * s).mul_add(s, -s) * m[i + 1]) / 6.0
}

/// Fit a parametric natural cubic spline through `points` and sample it
/// at `samples` evenly spaced parameter values from 0 to 1 inclusive.
///
/// The curve passes through every control point exactly. Knots are
/// placed at uniform parameter intervals, so with `n` control points
/// and `samples = k*(n-1) + 1` the control points themselves appear in
/// the output.
///
/// Degenerate inputs are returned unchanged: fewer than two points, or
/// fewer than two requested samples, yield a polyline of the input
/// points.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fit(points: &[Point], samples: usize) -> Polyline {
    let n = points.len();
    if n < 2 || samples < 2 {
        return Polyline::new(points.to_vec());
    }

    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mx = second_derivatives(&xs);
    let my = second_derivatives(&ys);

    let span = (n - 1) as f64;
    let mut out = Vec::with_capacity(samples);
    for k in 0..samples {
        let t = k as f64 / (samples - 1) as f64 * span;
        out.push(Point::new(eval(&xs, &mx, t), eval(&ys, &my, t)));
    }
    Polyline::new(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "expected {b}, got {a}");
    }

    #[test]
    fn passes_through_every_control_point() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, -1.0),
            Point::new(3.0, 0.5),
            Point::new(4.0, 3.0),
        ];
        // 4 segments, 25 samples each: knots land exactly on samples.
        let curve = fit(&points, 101);
        assert_eq!(curve.len(), 101);
        for (i, control) in points.iter().enumerate() {
            let sampled = curve.points()[i * 25];
            assert_close(sampled.x, control.x, 1e-9);
            assert_close(sampled.y, control.y, 1e-9);
        }
    }

    #[test]
    fn endpoints_are_exact() {
        let points = vec![
            Point::new(0.0, 1.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 2.0),
            Point::new(9.0, 7.0),
        ];
        let curve = fit(&points, 33);
        assert_eq!(curve.first(), Some(&points[0]));
        let last = curve.last().unwrap();
        assert_close(last.x, 9.0, 1e-9);
        assert_close(last.y, 7.0, 1e-9);
    }

    #[test]
    fn collinear_input_stays_on_the_line() {
        // A natural spline through collinear points is that line.
        let points: Vec<Point> = (0..5)
            .map(|i| Point::new(f64::from(i) * 2.0, f64::from(i) * 3.0 + 1.0))
            .collect();
        let curve = fit(&points, 41);
        for p in curve.points() {
            // y = 1.5 x + 1
            assert_close(p.y, 1.5f64.mul_add(p.x, 1.0), 1e-9);
        }
    }

    #[test]
    fn identical_points_degenerate_to_repeated_point() {
        let points = vec![Point::new(2.0, 3.0); 6];
        let curve = fit(&points, 11);
        assert_eq!(curve.len(), 11);
        for p in curve.points() {
            assert_close(p.x, 2.0, 1e-12);
            assert_close(p.y, 3.0, 1e-12);
        }
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let curve = fit(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)], 5);
        assert_eq!(curve.len(), 5);
        assert_eq!(curve.points()[2], Point::new(5.0, 5.0));
    }

    #[test]
    fn fewer_than_two_points_returned_unchanged() {
        assert!(fit(&[], 101).is_empty());
        let single = fit(&[Point::new(1.0, 1.0)], 101);
        assert_eq!(single.points(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn sample_count_matches_request() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 1.0),
        ];
        assert_eq!(fit(&points, 101).len(), 101);
        assert_eq!(fit(&points, 7).len(), 7);
    }

    #[test]
    fn symmetric_input_produces_symmetric_curve() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ];
        let curve = fit(&points, 21);
        let pts = curve.points();
        for k in 0..pts.len() / 2 {
            let mirror = pts.len() - 1 - k;
            assert_close(pts[k].y, pts[mirror].y, 1e-9);
            assert_close(pts[k].x, 2.0 - pts[mirror].x, 1e-9);
        }
    }
}
