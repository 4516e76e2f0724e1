//! Bernstein basis weights for quadratic and cubic Bézier parametrizations.

use super::Vector4;

/// Weight of control point `index` (0..=2) of a quadratic Bézier at `t`.
///
/// Indices outside `0..=2` carry no weight.
#[must_use]
pub fn quadratic_basis(index: usize, t: f64) -> f64 {
    let u = 1.0 - t;
    match index {
        0 => u * u,
        1 => 2.0 * u * t,
        2 => t * t,
        _ => 0.0,
    }
}

/// Weight of control point `index` (0..=3) of a cubic Bézier at `t`.
///
/// Indices outside `0..=3` carry no weight.
#[must_use]
pub fn cubic_basis(index: usize, t: f64) -> f64 {
    let u = 1.0 - t;
    match index {
        0 => u * u * u,
        1 => 3.0 * u * u * t,
        2 => 3.0 * u * t * t,
        3 => t * t * t,
        _ => 0.0,
    }
}

/// All four cubic weights at `t`, in control-point order.
#[must_use]
pub fn cubic_weights(t: f64) -> Vector4 {
    Vector4::new(
        cubic_basis(0, t),
        cubic_basis(1, t),
        cubic_basis(2, t),
        cubic_basis(3, t),
    )
}

/// All three quadratic derivative weights at `t`, scaled for a cubic.
///
/// The derivative of a cubic Bézier is `3 Σ B2_i(t) (P_{i+1} - P_i)`.
#[must_use]
pub fn cubic_derivative_weights(t: f64) -> [f64; 3] {
    [
        3.0 * quadratic_basis(0, t),
        3.0 * quadratic_basis(1, t),
        3.0 * quadratic_basis(2, t),
    ]
}
