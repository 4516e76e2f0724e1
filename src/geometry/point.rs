use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{GeometryError, Result};
use crate::math::{is_small_enough, Vector2};

/// An immutable 2D point, also used as a free vector.
///
/// Every operation returns a new value. Equality and hashing are structural
/// on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// The origin, `(0, 0)`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point scaled by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Squared length of the vector.
    #[must_use]
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Returns the unit vector in the same direction.
    ///
    /// The zero vector normalizes to `(NaN, NaN)`.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        if len == 0.0 {
            return Self::new(f64::NAN, f64::NAN);
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Returns the unit vector in the same direction.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the vector is (nearly) zero.
    pub fn try_normalize(self) -> Result<Self> {
        if is_small_enough(self.magnitude()) {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(self.normalize())
    }

    /// Angle of the vector from the positive x axis, in `(-π, π]`.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).magnitude()
    }

    /// Squared distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        (other - self).magnitude_squared()
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// The vector rotated a quarter turn counter-clockwise.
    #[must_use]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Returns `true` if both coordinates are within `eps` of `other`'s.
    #[must_use]
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts to an nalgebra vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

impl Eq for Point2D {}

impl Hash for Point2D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `0.0 == -0.0`, so both must hash alike.
        let canonical = |v: f64| if v == 0.0 { 0f64.to_bits() } else { v.to_bits() };
        canonical(self.x).hash(state);
        canonical(self.y).hash(state);
    }
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Point2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for Point2D {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<nalgebra::Point2<f64>> for Point2D {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point2D> for nalgebra::Point2<f64> {
    fn from(p: Point2D) -> Self {
        Self::new(p.x, p.y)
    }
}
