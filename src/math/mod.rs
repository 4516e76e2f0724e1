pub mod basis;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod polynomial;

pub use intersect_2d::{Intersection2D, IntersectionType};
pub use polynomial::Polynomial;

/// 2D vector type used for linear-algebra helpers.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 4-component vector type, used for cubic Bernstein weights.
pub type Vector4 = nalgebra::Vector4<f64>;

/// Magnitude below which a value is treated as zero.
pub const TOLERANCE: f64 = 1e-12;

/// Returns `true` when `value` is closer to zero than [`TOLERANCE`].
#[must_use]
pub fn is_small_enough(value: f64) -> bool {
    value.abs() < TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_enough_boundary() {
        assert!(is_small_enough(0.0));
        assert!(is_small_enough(-5e-13));
        assert!(!is_small_enough(1e-11));
        assert!(!is_small_enough(f64::NAN));
    }
}
