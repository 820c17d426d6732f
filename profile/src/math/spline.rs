//! Catmull-Rom sampling used by the smoothed stroke mode.
//!
//! The curve passes through every control point but is free to
//! overshoot between them, which is very visible when neighbouring
//! points are far apart or unevenly spaced.

use super::linspace;
use itertools::Itertools;
use std::iter::once;

type Xy = (f64, f64);

/// Returns `(points.len() - 1) * steps + 1` points on the Catmull-Rom
/// spline through `points`.
///
/// The first and last points are mirrored to form the phantom control
/// points the end segments need. Fewer than three points (or zero
/// `steps`) are returned unchanged.
pub fn catmull_rom(points: &[Xy], steps: usize) -> Vec<Xy> {
    let n = points.len();
    if n < 3 || steps == 0 {
        return points.to_vec();
    }

    let head = mirror(points[0], points[1]);
    let tail = mirror(points[n - 1], points[n - 2]);

    let mut curve = Vec::with_capacity((n - 1) * steps + 1);
    for (p0, p1, p2, p3) in once(head)
        .chain(points.iter().copied())
        .chain(once(tail))
        .tuple_windows()
    {
        curve.extend(
            linspace(0.0, 1.0, steps + 1)
                .take(steps)
                .map(|t| interpolate(p0, p1, p2, p3, t)),
        );
    }
    curve.push(points[n - 1]);
    curve
}

/// Reflects `neighbour` through `end`.
fn mirror(end: Xy, neighbour: Xy) -> Xy {
    (2.0 * end.0 - neighbour.0, 2.0 * end.1 - neighbour.1)
}

fn interpolate(p0: Xy, p1: Xy, p2: Xy, p3: Xy, t: f64) -> Xy {
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * (2.0 * b
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    (axis(p0.0, p1.0, p2.0, p3.0), axis(p0.1, p1.1, p2.1, p3.1))
}

#[cfg(test)]
mod tests {
    use super::catmull_rom;

    #[test]
    fn test_passes_through_control_points() {
        let points = [(0.0, 10.0), (4.0, 2.0), (9.0, 7.0), (12.0, 0.0)];
        let curve = catmull_rom(&points, 8);
        assert_eq!(curve.len(), 3 * 8 + 1);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(curve[i * 8], *point);
        }
    }

    #[test]
    fn test_short_input_is_unchanged() {
        let points = [(0.0, 0.0), (5.0, 5.0)];
        assert_eq!(catmull_rom(&points, 8), points);
    }

    #[test]
    fn test_overshoots_between_distant_points() {
        let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 100.0), (3.0, 100.0)];
        let curve = catmull_rom(&points, 10);
        let min_y = curve.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        assert!(min_y < 0.0);
    }
}
