use crate::math::basis::{cubic_derivative_weights, cubic_weights};
use crate::math::distance_2d::distance_to_line;
use crate::math::intersect_2d::{intersect_cubic_cubic, intersect_line_cubic, Intersection2D};
use crate::math::{Polynomial, Vector4};

use super::{Bounds2D, Line2D, Point2D, Shape2D};

/// Recursion limit for length-bounded flattening.
const MAX_FLATTEN_DEPTH: u32 = 24;

/// An immutable cubic Bézier curve with control points `a`, `b`, `c`, `d`.
///
/// `P(t) = (1-t)³a + 3(1-t)²t b + 3(1-t)t² c + t³d` for `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic2D {
    a: Point2D,
    b: Point2D,
    c: Point2D,
    d: Point2D,
}

impl Cubic2D {
    /// Creates a new cubic from its four control points.
    #[must_use]
    pub fn new(a: Point2D, b: Point2D, c: Point2D, d: Point2D) -> Self {
        Self { a, b, c, d }
    }

    /// Start point.
    #[must_use]
    pub fn a(&self) -> Point2D {
        self.a
    }

    /// First interior control point.
    #[must_use]
    pub fn b(&self) -> Point2D {
        self.b
    }

    /// Second interior control point.
    #[must_use]
    pub fn c(&self) -> Point2D {
        self.c
    }

    /// End point.
    #[must_use]
    pub fn d(&self) -> Point2D {
        self.d
    }

    #[must_use]
    pub fn control_points(&self) -> [Point2D; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns the same curve traversed from `d` to `a`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.d, self.c, self.b, self.a)
    }

    /// Returns `true` if both curves have the same control points, in either order.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        self == other || *self == other.reversed()
    }

    /// Evaluates the curve at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2D {
        let w = cubic_weights(t);
        let xs = Vector4::new(self.a.x, self.b.x, self.c.x, self.d.x);
        let ys = Vector4::new(self.a.y, self.b.y, self.c.y, self.d.y);
        Point2D::new(w.dot(&xs), w.dot(&ys))
    }

    /// First derivative `dP/dt` at parameter `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Point2D {
        let [w0, w1, w2] = cubic_derivative_weights(t);
        (self.b - self.a) * w0 + (self.c - self.b) * w1 + (self.d - self.c) * w2
    }

    /// Maximum distance of `b` or `c` from the chord `a`–`d`.
    ///
    /// When `a == d` the distances are measured to `a` itself.
    #[must_use]
    pub fn flatness(&self) -> f64 {
        let to_chord = |p: Point2D| {
            if self.a == self.d {
                p.distance(self.a)
            } else {
                distance_to_line(p, self.a, self.d)
            }
        };
        to_chord(self.b).max(to_chord(self.c))
    }

    /// Length of the control polygon, an upper bound of the arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        self.a.distance(self.b) + self.b.distance(self.c) + self.c.distance(self.d)
    }

    /// Splits the curve at `t` with De Casteljau's algorithm.
    ///
    /// The first half covers `[0, t]` and the second `[t, 1]` of the original.
    #[must_use]
    pub fn subdivide(&self, t: f64) -> (Self, Self) {
        let ab = self.a.lerp(self.b, t);
        let bc = self.b.lerp(self.c, t);
        let cd = self.c.lerp(self.d, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let mid = abc.lerp(bcd, t);
        (
            Self::new(self.a, ab, abc, mid),
            Self::new(mid, bcd, cd, self.d),
        )
    }

    /// Samples the curve at `samples` equally spaced parameters.
    ///
    /// At least the two endpoints are always returned.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_polyline(&self, samples: usize) -> Vec<Point2D> {
        let samples = samples.max(2);
        let last = (samples - 1) as f64;
        (0..samples)
            .map(|i| self.point_at(i as f64 / last))
            .collect()
    }

    /// Adaptive polyline whose segments are no longer than `max_len`.
    #[must_use]
    pub fn to_polyline_max_len(&self, max_len: f64) -> Vec<Point2D> {
        let mut points = vec![self.a];
        if max_len > 0.0 && max_len.is_finite() {
            self.flatten_into(max_len, 0, &mut points);
        } else {
            points.push(self.d);
        }
        points
    }

    fn flatten_into(&self, max_len: f64, depth: u32, out: &mut Vec<Point2D>) {
        if depth >= MAX_FLATTEN_DEPTH || self.control_polygon_length() <= max_len {
            out.push(self.d);
            return;
        }
        let (first, second) = self.subdivide(0.5);
        first.flatten_into(max_len, depth + 1, out);
        second.flatten_into(max_len, depth + 1, out);
    }

    /// Power-basis coefficients, lowest degree first:
    /// `P(t) = k0 + k1 t + k2 t² + k3 t³`.
    #[must_use]
    pub fn power_coefficients(&self) -> [Point2D; 4] {
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        [
            a,
            (b - a) * 3.0,
            (a - b * 2.0 + c) * 3.0,
            d - a + (b - c) * 3.0,
        ]
    }

    /// Intersections with another cubic.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Intersection2D {
        intersect_cubic_cubic(self, other)
    }

    /// Intersections with a line segment.
    #[must_use]
    pub fn intersect_line(&self, line: &Line2D) -> Intersection2D {
        intersect_line_cubic(line, self)
    }
}

impl Shape2D for Cubic2D {
    /// Endpoints plus the interior extrema of each axis.
    fn bounds(&self) -> Bounds2D {
        let k = self.power_coefficients();
        let mut points = vec![self.a, self.d];
        let axes: [fn(Point2D) -> f64; 2] = [|p| p.x, |p| p.y];
        for axis in axes {
            let slope = Polynomial::from_ascending(vec![
                axis(k[1]),
                2.0 * axis(k[2]),
                3.0 * axis(k[3]),
            ]);
            points.extend(
                slope
                    .roots()
                    .into_iter()
                    .filter(|t| *t > 0.0 && *t < 1.0)
                    .map(|t| self.point_at(t)),
            );
        }
        Bounds2D::from_points(&points).unwrap_or_else(|| Bounds2D::new(0.0, 0.0, 0.0, 0.0))
    }

    fn flatten(&self, max_segment_length: f64) -> Vec<Point2D> {
        self.to_polyline_max_len(max_segment_length)
    }
}
