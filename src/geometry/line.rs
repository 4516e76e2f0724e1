use crate::math::intersect_2d::{intersect_line_line, Intersection2D, IntersectionType};

use super::{piece_count, Bounds2D, Point2D, Shape2D};

/// A bounded line segment between two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2D {
    a: Point2D,
    b: Point2D,
}

impl Line2D {
    /// Creates a segment from `a` to `b`.
    #[must_use]
    pub fn new(a: Point2D, b: Point2D) -> Self {
        Self { a, b }
    }

    /// Returns the start point.
    #[must_use]
    pub fn a(&self) -> Point2D {
        self.a
    }

    /// Returns the end point.
    #[must_use]
    pub fn b(&self) -> Point2D {
        self.b
    }

    /// Returns the vector from `a` to `b`.
    #[must_use]
    pub fn direction(&self) -> Point2D {
        self.b - self.a
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2D {
        self.a.lerp(self.b, 0.5)
    }

    /// Point at parameter `t`, `a` at 0 and `b` at 1.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2D {
        self.a.lerp(self.b, t)
    }

    /// Returns the segment traversed from `b` to `a`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    /// Parameter of the point on the segment closest to `p`, clamped to `[0, 1]`.
    ///
    /// A zero-length segment reports `0`.
    #[must_use]
    pub fn project(&self, p: Point2D) -> f64 {
        let d = self.direction();
        let len_sq = d.magnitude_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        ((p - self.a).dot(d) / len_sq).clamp(0.0, 1.0)
    }

    /// Squared distance from `p` to the closest point of the segment.
    ///
    /// When the projection of `p` falls between the endpoints this is the
    /// squared perpendicular distance, otherwise the squared distance to the
    /// nearer endpoint. It is a true distance, not an inside-the-slab flag:
    /// only points on the segment itself give `0.0`.
    #[must_use]
    pub fn distance_squared_to(&self, p: Point2D) -> f64 {
        p.distance_squared(self.point_at(self.project(p)))
    }

    /// Distance from `p` to the closest point of the segment.
    #[must_use]
    pub fn distance_to(&self, p: Point2D) -> f64 {
        self.distance_squared_to(p).sqrt()
    }

    /// Classifies the intersection with another segment.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Intersection2D {
        intersect_line_line(self, other)
    }

    /// Returns `true` if the segments cross or are the same segment.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        matches!(
            self.intersect(other).kind,
            IntersectionType::Intersection | IntersectionType::Same
        )
    }

    /// Returns `true` if both segments have the same endpoints, in either order.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Shape2D for Line2D {
    fn bounds(&self) -> Bounds2D {
        Bounds2D::new(self.a.x, self.a.y, self.b.x, self.b.y)
    }

    #[allow(clippy::cast_precision_loss)]
    fn flatten(&self, max_segment_length: f64) -> Vec<Point2D> {
        let pieces = piece_count(self.length(), max_segment_length);
        (0..=pieces)
            .map(|i| self.point_at(i as f64 / pieces as f64))
            .collect()
    }
}
