use std::cmp::Ordering;

use crate::geometry::Point2D;

/// Turn direction of three ordered points.
///
/// The sign follows the cross product `(b - a) × (c - a)`: positive is
/// [`Spin::Clockwise`] in the screen convention used by the kernel (y axis
/// pointing down), which is a left turn when y points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    CounterClockwise,
    Collinear,
    Clockwise,
}

impl Spin {
    /// `-1`, `0` or `+1`.
    #[must_use]
    pub fn signum(self) -> i32 {
        match self {
            Self::CounterClockwise => -1,
            Self::Collinear => 0,
            Self::Clockwise => 1,
        }
    }
}

/// Classifies the turn `a → b → c`.
#[must_use]
pub fn spin(a: Point2D, b: Point2D, c: Point2D) -> Spin {
    let cross = (b - a).cross(c - a);
    match cross.partial_cmp(&0.0) {
        Some(Ordering::Greater) => Spin::Clockwise,
        Some(Ordering::Less) => Spin::CounterClockwise,
        _ => Spin::Collinear,
    }
}

/// Convenience form of [`spin`] returning `-1`, `0` or `+1`.
#[must_use]
pub fn get_spin(a: Point2D, b: Point2D, c: Point2D) -> i32 {
    spin(a, b, c).signum()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// `NaN` when `a == b`.
#[must_use]
pub fn distance_to_line(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    signed_offset(p, a, b).abs()
}

/// Signed distance from `p` to the line through `a` towards `b`.
///
/// Positive when `p` is left of the direction of travel. `NaN` when `a == b`.
#[must_use]
pub fn signed_offset(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let dir = b - a;
    let len = dir.magnitude();
    if len == 0.0 {
        return f64::NAN;
    }
    dir.cross(p - a) / len
}

/// Signed offset of `p` from segment `a`–`b`, defined only inside the slab
/// bounded by the perpendiculars through `a` and `b`.
///
/// `NaN` outside the slab or when `a == b`.
#[must_use]
pub fn bounded_offset(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let dir = b - a;
    let len_sq = dir.magnitude_squared();
    if len_sq == 0.0 {
        return f64::NAN;
    }
    let t = (p - a).dot(dir) / len_sq;
    if !(0.0..=1.0).contains(&t) {
        return f64::NAN;
    }
    signed_offset(p, a, b)
}

/// Minimum distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: Point2D, a: Point2D, b: Point2D) -> f64 {
    let dir = b - a;
    let len_sq = dir.magnitude_squared();
    if len_sq < 1e-20 {
        return p.distance(a);
    }
    let t = ((p - a).dot(dir) / len_sq).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

/// Sum of the distances between consecutive points.
#[must_use]
pub fn path_length(points: &[Point2D]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Index and distance of the point closest to `p`, or `None` if empty.
#[must_use]
pub fn nearest_point(points: &[Point2D], p: Point2D) -> Option<(usize, f64)> {
    points
        .iter()
        .map(|q| q.distance_squared(p))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, d)| (i, d.sqrt()))
}

/// Index of the segment `points[i]`–`points[i + 1]` closest to `p`, and the
/// distance to it. `None` with fewer than two points.
#[must_use]
pub fn nearest_segment(points: &[Point2D], p: Point2D) -> Option<(usize, f64)> {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(p, w[0], w[1]))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
