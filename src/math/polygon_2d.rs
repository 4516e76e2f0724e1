use super::TOLERANCE;
use crate::error::{OperationError, Result};
use crate::geometry::Point2D;

/// Area enclosed by a closed polygon, by Green's theorem.
///
/// `0.5 * Σ (x[i+1] + x[i]) * (y[i+1] - y[i])`, wrapping from the last vertex
/// to the first. Positive for counter-clockwise vertex order (y axis up),
/// negative for clockwise. Fewer than three vertices enclose nothing.
#[must_use]
pub fn polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let sum: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            (b.x + a.x) * (b.y - a.y)
        })
        .sum();
    0.5 * sum
}

/// Removes consecutive points closer than the kernel tolerance.
pub fn dedup_points(points: &mut Vec<Point2D>) {
    points.dedup_by(|a, b| a.approx_eq(*b, TOLERANCE));
}

/// Joins the two sides of a closed region into one counter-clockwise polygon.
///
/// Both sides run from the same start point to the same end point and must
/// not otherwise touch. The orientation is decided by the sign of the joined
/// area, so regions that wrap around their start point come out right too.
/// The returned polygon is closed implicitly (the start point is not repeated
/// at the end).
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` if either side has fewer than two
/// points, neither side has three, or the sides disagree on their first or
/// last point.
pub fn to_ccw_polygon(first: &[Point2D], second: &[Point2D]) -> Result<Vec<Point2D>> {
    if first.len() < 2 || second.len() < 2 {
        return Err(invalid("each side needs at least two points"));
    }
    if first.len() < 3 && second.len() < 3 {
        return Err(invalid("at least one side needs three points"));
    }
    if !first[0].approx_eq(second[0], TOLERANCE) {
        return Err(invalid("sides must start at the same point"));
    }
    if !first[first.len() - 1].approx_eq(second[second.len() - 1], TOLERANCE) {
        return Err(invalid("sides must end at the same point"));
    }

    let forward = join(first, second);
    Ok(if polygon_area(&forward) >= 0.0 {
        forward
    } else {
        join(second, first)
    })
}

/// `outgoing` followed by `returning` reversed, without repeating shared ends.
fn join(outgoing: &[Point2D], returning: &[Point2D]) -> Vec<Point2D> {
    let mut polygon = Vec::with_capacity(outgoing.len() + returning.len() - 2);
    polygon.extend_from_slice(outgoing);
    polygon.extend(returning[1..returning.len() - 1].iter().rev());
    polygon
}

fn invalid(message: &str) -> crate::error::FoilgeoError {
    OperationError::InvalidInput(message.to_owned()).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn hexagon_area() {
        let hexagon = [
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(-1.0, 0.0),
            p(-1.0, -1.0),
            p(0.0, -1.0),
            p(1.0, 0.0),
        ];
        assert_eq!(polygon_area(&hexagon), 3.0);
    }

    #[test]
    fn clockwise_area_is_negative() {
        let square = [p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        assert_abs_diff_eq!(polygon_area(&square), -1.0);
    }

    #[test]
    fn degenerate_area() {
        assert_abs_diff_eq!(polygon_area(&[p(0.0, 0.0), p(1.0, 1.0)]), 0.0);
        assert_abs_diff_eq!(polygon_area(&[]), 0.0);
    }

    #[test]
    fn dedup_consecutive_only() {
        let mut pts = vec![p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)];
        dedup_points(&mut pts);
        assert_eq!(pts, vec![p(0.0, 0.0), p(1.0, 0.0), p(0.0, 0.0)]);
    }

    #[test]
    fn ccw_keeps_forward_order() {
        let lower = [p(0.0, 0.0), p(1.0, -1.0), p(2.0, 0.0)];
        let upper = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)];
        let poly = to_ccw_polygon(&lower, &upper).unwrap();
        assert_eq!(poly, vec![p(0.0, 0.0), p(1.0, -1.0), p(2.0, 0.0), p(1.0, 1.0)]);
        assert_abs_diff_eq!(polygon_area(&poly), 2.0);
    }

    #[test]
    fn ccw_reverses_when_needed() {
        let lower = [p(0.0, 0.0), p(1.0, -1.0), p(2.0, 0.0)];
        let upper = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)];
        let poly = to_ccw_polygon(&upper, &lower).unwrap();
        assert_eq!(poly, vec![p(0.0, 0.0), p(1.0, -1.0), p(2.0, 0.0), p(1.0, 1.0)]);
    }

    #[test]
    fn ccw_with_straight_side() {
        let chord = [p(0.0, 0.0), p(2.0, 0.0)];
        let arc = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)];
        let poly = to_ccw_polygon(&arc, &chord).unwrap();
        assert_eq!(poly, vec![p(0.0, 0.0), p(2.0, 0.0), p(1.0, 1.0)]);
        assert_abs_diff_eq!(polygon_area(&poly), 1.0);
    }

    #[test]
    fn ccw_region_wrapping_its_start() {
        // The interior angle at the shared start point is reflex.
        let around = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 2.0), p(-2.0, 2.0), p(-2.0, 0.0)];
        let below = [p(0.0, 0.0), p(-1.0, -0.5), p(-2.0, 0.0)];
        for poly in [
            to_ccw_polygon(&around, &below).unwrap(),
            to_ccw_polygon(&below, &around).unwrap(),
        ] {
            assert_eq!(poly.len(), 6);
            assert_eq!(poly[1], p(1.0, 0.0));
            assert_abs_diff_eq!(polygon_area(&poly), 6.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn ccw_preconditions() {
        let a = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 0.0)];
        assert!(to_ccw_polygon(&a, &a[..1]).is_err());
        assert!(to_ccw_polygon(&[p(0.0, 0.0), p(2.0, 0.0)], &[p(0.0, 0.0), p(2.0, 0.0)]).is_err());
        assert!(to_ccw_polygon(&a, &[p(0.5, 0.0), p(1.0, -1.0), p(2.0, 0.0)]).is_err());
        assert!(to_ccw_polygon(&a, &[p(0.0, 0.0), p(1.0, -1.0), p(2.5, 0.0)]).is_err());
    }
}
