use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{intersect_ellipse_ellipse, intersect_line_ellipse, Intersection2D};

use super::{piece_count, Bounds2D, Line2D, Point2D, Shape2D};

/// An axis-aligned ellipse.
///
/// `P(θ) = center + (rx cos θ, ry sin θ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse2D {
    center: Point2D,
    rx: f64,
    ry: f64,
}

impl Ellipse2D {
    /// Creates a new ellipse.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if either radius is not a positive
    /// finite number.
    pub fn new(center: Point2D, rx: f64, ry: f64) -> Result<Self> {
        if !(rx > 0.0 && rx.is_finite()) {
            return Err(GeometryError::Degenerate("x radius must be positive".into()).into());
        }
        if !(ry > 0.0 && ry.is_finite()) {
            return Err(GeometryError::Degenerate("y radius must be positive".into()).into());
        }
        Ok(Self { center, rx, ry })
    }

    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is not positive.
    pub fn circle(center: Point2D, radius: f64) -> Result<Self> {
        Self::new(center, radius, radius)
    }

    #[must_use]
    pub fn center(&self) -> Point2D {
        self.center
    }

    #[must_use]
    pub fn rx(&self) -> f64 {
        self.rx
    }

    #[must_use]
    pub fn ry(&self) -> f64 {
        self.ry
    }

    /// Point at angle `theta` (radians).
    #[must_use]
    pub fn point_at(&self, theta: f64) -> Point2D {
        let (sin, cos) = theta.sin_cos();
        Point2D::new(self.center.x + self.rx * cos, self.center.y + self.ry * sin)
    }

    /// Implicit conic coefficients `[a, b, c, d, e, f]` of
    /// `a x² + b xy + c y² + d x + e y + f = 0`.
    #[must_use]
    pub fn conic_coefficients(&self) -> [f64; 6] {
        let (cx, cy) = (self.center.x, self.center.y);
        let rx2 = self.rx * self.rx;
        let ry2 = self.ry * self.ry;
        [
            ry2,
            0.0,
            rx2,
            -2.0 * ry2 * cx,
            -2.0 * rx2 * cy,
            ry2 * cx * cx + rx2 * cy * cy - rx2 * ry2,
        ]
    }

    /// Ramanujan's approximation of the perimeter.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let (a, b) = (self.rx, self.ry);
        std::f64::consts::PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt())
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Point2D) -> Self {
        Self {
            center: self.center + offset,
            ..*self
        }
    }

    /// Returns a copy with center and radii multiplied by `factor`.
    ///
    /// A non-positive factor yields a degenerate ellipse; callers use this only
    /// for normalization with positive factors.
    #[must_use]
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        Self {
            center: self.center * factor,
            rx: self.rx * factor,
            ry: self.ry * factor,
        }
    }

    /// Intersections with another ellipse.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Intersection2D {
        intersect_ellipse_ellipse(self, other)
    }

    /// Intersections with a line segment.
    #[must_use]
    pub fn intersect_line(&self, line: &Line2D) -> Intersection2D {
        intersect_line_ellipse(line, self)
    }
}

impl Shape2D for Ellipse2D {
    fn bounds(&self) -> Bounds2D {
        Bounds2D::new(
            self.center.x - self.rx,
            self.center.y - self.ry,
            self.center.x + self.rx,
            self.center.y + self.ry,
        )
    }

    /// Closed polyline; the first point is repeated at the end.
    #[allow(clippy::cast_precision_loss)]
    fn flatten(&self, max_segment_length: f64) -> Vec<Point2D> {
        let pieces = piece_count(self.perimeter(), max_segment_length).max(8);
        (0..=pieces)
            .map(|i| self.point_at(TAU * i as f64 / pieces as f64))
            .collect()
    }
}
