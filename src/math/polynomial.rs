use std::f64::consts::{LN_10, LN_2};
use std::ops::{Add, Mul, Sub};

use super::is_small_enough;
use crate::error::{OperationError, Result};

/// Decimal digits of accuracy targeted by [`Polynomial::bisection`].
pub const ACCURACY: i32 = 9;

/// A real polynomial of arbitrary degree.
///
/// Coefficients are stored index-by-degree (`coefs[i]` multiplies `x^i`), with
/// near-zero high-degree coefficients trimmed so that
/// `degree() == coefs.len() - 1` always reflects the effective degree.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefs: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from coefficients listed highest degree first.
    ///
    /// `Polynomial::new(&[1.0, -3.0, 2.0])` is `x² - 3x + 2`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if no coefficients are given.
    pub fn new(coefficients: &[f64]) -> Result<Self> {
        if coefficients.is_empty() {
            return Err(OperationError::InvalidInput(
                "a polynomial needs at least one coefficient".to_owned(),
            )
            .into());
        }
        Ok(Self::from_ascending(
            coefficients.iter().rev().copied().collect(),
        ))
    }

    /// Creates a polynomial from coefficients listed lowest degree first.
    ///
    /// An empty list yields the zero polynomial.
    #[must_use]
    pub fn from_ascending(mut coefs: Vec<f64>) -> Self {
        while coefs.len() > 1 && coefs.last().is_some_and(|c| is_small_enough(*c)) {
            coefs.pop();
        }
        if coefs.is_empty() {
            coefs.push(0.0);
        }
        Self { coefs }
    }

    /// Returns the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { coefs: vec![0.0] }
    }

    /// Returns the constant polynomial `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self { coefs: vec![value] }
    }

    /// Returns the coefficients, lowest degree first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefs
    }

    /// Returns the effective degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    /// Returns `true` for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefs.len() == 1 && is_small_enough(self.coefs[0])
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    /// Returns the polynomial with every coefficient multiplied by `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Self {
        Self::from_ascending(self.coefs.iter().map(|c| c * scalar).collect())
    }

    /// Returns the polynomial with every coefficient divided by `scalar`.
    ///
    /// Dividing by zero produces non-finite coefficients.
    #[must_use]
    pub fn divide_scalar(&self, scalar: f64) -> Self {
        Self::from_ascending(self.coefs.iter().map(|c| c / scalar).collect())
    }

    /// Returns the first derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::from_ascending(
            self.coefs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| degree_factor(i) * c)
                .collect(),
        )
    }

    /// Returns every real root, sorted ascending.
    ///
    /// Degrees up to 4 are solved in closed form. Higher degrees fall back to
    /// [`Polynomial::roots_in_interval`] over the Cauchy root bound. Constant
    /// polynomials (including zero) report no roots.
    #[must_use]
    pub fn roots(&self) -> Vec<f64> {
        let roots = match self.degree() {
            0 => Vec::new(),
            1 => self.linear_roots(),
            2 => self.quadratic_roots(),
            3 => self.cubic_roots(),
            4 => self.quartic_roots(),
            _ => {
                let bound = self.cauchy_bound();
                self.roots_in_interval(-bound, bound)
            }
        };
        collapse_roots(roots, super::TOLERANCE)
    }

    /// Returns the real roots within `[min, max]`, sorted ascending.
    ///
    /// The interval is split at the roots of the derivative so that each
    /// piece is monotone, then each piece is searched by bisection.
    #[must_use]
    pub fn roots_in_interval(&self, min: f64, max: f64) -> Vec<f64> {
        let mut roots = Vec::new();
        match self.degree() {
            0 => {}
            1 => roots.extend(self.bisection(min, max)),
            _ => {
                let turning = self.derivative().roots_in_interval(min, max);
                if turning.is_empty() {
                    roots.extend(self.bisection(min, max));
                } else {
                    let mut lower = min;
                    for &upper in &turning {
                        roots.extend(self.bisection(lower, upper));
                        lower = upper;
                    }
                    roots.extend(self.bisection(lower, max));
                }
            }
        }
        collapse_roots(roots, 10f64.powi(-ACCURACY))
    }

    /// Searches `[min, max]` for a sign change and narrows it by bisection.
    ///
    /// Returns `None` when the end values have the same sign. The iteration
    /// count is `ceil((ln(max - min) + ln(10) * ACCURACY) / ln(2))`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bisection(&self, min: f64, max: f64) -> Option<f64> {
        let (mut min, mut max) = (min, max);
        let mut min_value = self.evaluate(min);
        let max_value = self.evaluate(max);

        if is_small_enough(min_value) {
            return Some(min);
        }
        if is_small_enough(max_value) {
            return Some(max);
        }
        if !(min_value * max_value <= 0.0) || !(max > min) {
            return None;
        }

        let iterations = (((max - min).ln() + LN_10 * f64::from(ACCURACY)) / LN_2)
            .ceil()
            .max(0.0) as u32;

        let mut result = 0.5 * (min + max);
        for _ in 0..iterations {
            result = 0.5 * (min + max);
            let value = self.evaluate(result);
            if is_small_enough(value) {
                break;
            }
            if value * min_value < 0.0 {
                max = result;
            } else {
                min = result;
                min_value = value;
            }
        }
        Some(result)
    }

    fn linear_roots(&self) -> Vec<f64> {
        vec![-self.coefs[0] / self.coefs[1]]
    }

    /// `x² + px + q` form.
    fn quadratic_roots(&self) -> Vec<f64> {
        let p = self.coefs[1] / self.coefs[2];
        let q = self.coefs[0] / self.coefs[2];
        let half_p = -0.5 * p;
        let discriminant = half_p * half_p - q;

        if is_small_enough(discriminant) {
            vec![half_p]
        } else if discriminant > 0.0 {
            let e = discriminant.sqrt();
            vec![half_p + e, half_p - e]
        } else {
            Vec::new()
        }
    }

    /// Cardano's method on the depressed cubic `y³ + ay + b`.
    fn cubic_roots(&self) -> Vec<f64> {
        let c3 = self.coefs[3];
        let c2 = self.coefs[2] / c3;
        let c1 = self.coefs[1] / c3;
        let c0 = self.coefs[0] / c3;

        let a = (3.0 * c1 - c2 * c2) / 3.0;
        let b = (2.0 * c2 * c2 * c2 - 9.0 * c1 * c2 + 27.0 * c0) / 27.0;
        let offset = c2 / 3.0;
        let half_b = b / 2.0;
        let mut discriminant = b * b / 4.0 + a * a * a / 27.0;
        if is_small_enough(discriminant) {
            discriminant = 0.0;
        }

        if is_small_enough(a) && is_small_enough(b) {
            // Triple root.
            vec![-offset]
        } else if discriminant > 0.0 {
            let e = discriminant.sqrt();
            let root = (-half_b + e).cbrt() + (-half_b - e).cbrt();
            vec![root - offset]
        } else if discriminant < 0.0 {
            let distance = (-a / 3.0).sqrt();
            let angle = (-discriminant).sqrt().atan2(-half_b) / 3.0;
            let (sin, cos) = angle.sin_cos();
            let sqrt3 = 3f64.sqrt();
            vec![
                2.0 * distance * cos - offset,
                -distance * (cos + sqrt3 * sin) - offset,
                -distance * (cos - sqrt3 * sin) - offset,
            ]
        } else {
            // Double root plus a single root.
            let tmp = half_b.cbrt();
            vec![-2.0 * tmp - offset, tmp - offset]
        }
    }

    /// Ferrari's method through the resolvent cubic.
    fn quartic_roots(&self) -> Vec<f64> {
        let c4 = self.coefs[4];
        let c3 = self.coefs[3] / c4;
        let c2 = self.coefs[2] / c4;
        let c1 = self.coefs[1] / c4;
        let c0 = self.coefs[0] / c4;

        let resolvent = Self::from_ascending(vec![
            -c3 * c3 * c0 + 4.0 * c2 * c0 - c1 * c1,
            c3 * c1 - 4.0 * c0,
            -c2,
            1.0,
        ]);
        // The largest resolvent root keeps the discriminant non-negative
        // whenever the quartic has real roots.
        let Some(y) = resolvent.roots().into_iter().reduce(f64::max) else {
            return Vec::new();
        };

        let shift = -c3 / 4.0;
        let mut discriminant = c3 * c3 / 4.0 - c2 + y;
        if is_small_enough(discriminant) {
            discriminant = 0.0;
        }

        let mut roots = Vec::with_capacity(4);
        if discriminant > 0.0 {
            let e = discriminant.sqrt();
            let t1 = 3.0 * c3 * c3 / 4.0 - e * e - 2.0 * c2;
            let t2 = (4.0 * c3 * c2 - 8.0 * c1 - c3 * c3 * c3) / (4.0 * e);
            let mut plus = t1 + t2;
            let mut minus = t1 - t2;
            if is_small_enough(plus) {
                plus = 0.0;
            }
            if is_small_enough(minus) {
                minus = 0.0;
            }
            if plus >= 0.0 {
                let f = plus.sqrt();
                roots.push(shift + (e + f) / 2.0);
                roots.push(shift + (e - f) / 2.0);
            }
            if minus >= 0.0 {
                let f = minus.sqrt();
                roots.push(shift + (f - e) / 2.0);
                roots.push(shift - (f + e) / 2.0);
            }
        } else if discriminant == 0.0 {
            let t2 = y * y - 4.0 * c0;
            if t2 >= -super::TOLERANCE {
                let t2 = 2.0 * t2.max(0.0).sqrt();
                let t1 = 3.0 * c3 * c3 / 4.0 - 2.0 * c2;
                for span in [t1 + t2, t1 - t2] {
                    if is_small_enough(span) {
                        // Double root at the shift.
                        roots.push(shift);
                    } else if span > 0.0 {
                        let d = span.sqrt();
                        roots.push(shift + d / 2.0);
                        roots.push(shift - d / 2.0);
                    }
                }
            }
        }
        roots
    }

    /// `1 + max |a_i / a_n|`; every real root lies within `±bound`.
    fn cauchy_bound(&self) -> f64 {
        let lead = self.coefs[self.degree()];
        1.0 + self.coefs[..self.degree()]
            .iter()
            .map(|c| (c / lead).abs())
            .fold(0.0, f64::max)
    }
}

#[allow(clippy::cast_precision_loss)]
fn degree_factor(i: usize) -> f64 {
    i as f64
}

/// Sorts roots and merges neighbours closer than `eps`.
fn collapse_roots(mut roots: Vec<f64>, eps: f64) -> Vec<f64> {
    roots.retain(|r| r.is_finite());
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() < eps);
    roots
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Polynomial {
        let len = self.coefs.len().max(rhs.coefs.len());
        Polynomial::from_ascending(
            (0..len)
                .map(|i| {
                    self.coefs.get(i).copied().unwrap_or(0.0)
                        + rhs.coefs.get(i).copied().unwrap_or(0.0)
                })
                .collect(),
        )
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Polynomial {
        self + &rhs.scale(-1.0)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        let mut coefs = vec![0.0; self.coefs.len() + rhs.coefs.len() - 1];
        for (i, a) in self.coefs.iter().enumerate() {
            for (j, b) in rhs.coefs.iter().enumerate() {
                coefs[i + j] += a * b;
            }
        }
        Polynomial::from_ascending(coefs)
    }
}

impl Add for Polynomial {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Sub for Polynomial {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        &self - &rhs
    }
}

impl Mul for Polynomial {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn poly(coefs: &[f64]) -> Polynomial {
        Polynomial::new(coefs).unwrap()
    }

    fn assert_roots(actual: &[f64], expected: &[f64], eps: f64) {
        assert_eq!(actual.len(), expected.len(), "roots={actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = eps);
        }
    }

    #[test]
    fn new_rejects_empty() {
        assert!(Polynomial::new(&[]).is_err());
    }

    #[test]
    fn leading_near_zero_is_trimmed() {
        let p = poly(&[1e-13, 2.0, 1.0]);
        assert_eq!(p.degree(), 1);
        assert_eq!(p.coefficients(), &[1.0, 2.0]);
    }

    #[test]
    fn horner_evaluation() {
        let p = poly(&[2.0, -3.0, 0.0, 5.0]);
        assert_abs_diff_eq!(p.evaluate(2.0), 16.0 - 12.0 + 5.0);
        assert_abs_diff_eq!(p.evaluate(0.0), 5.0);
    }

    #[test]
    fn arithmetic() {
        let a = poly(&[1.0, 1.0]); // x + 1
        let b = poly(&[1.0, -1.0]); // x - 1
        assert_eq!((&a * &b).coefficients(), &[-1.0, 0.0, 1.0]);
        assert_eq!((&a + &b).coefficients(), &[0.0, 2.0]);
        assert_eq!((&a - &b).coefficients(), &[2.0]);
        assert_eq!(a.divide_scalar(2.0).coefficients(), &[0.5, 0.5]);
        assert!((&a - &a).is_zero());
    }

    #[test]
    fn derivative_of_cubic() {
        let p = poly(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(p.derivative().coefficients(), &[3.0, 4.0, 3.0]);
        assert!(Polynomial::constant(7.0).derivative().is_zero());
    }

    #[test]
    fn constant_has_no_roots() {
        assert!(Polynomial::constant(3.0).roots().is_empty());
        assert!(Polynomial::zero().roots().is_empty());
    }

    #[test]
    fn linear_root() {
        assert_roots(&poly(&[2.0, -3.0]).roots(), &[1.5], 1e-15);
    }

    #[test]
    fn quadratic_two_roots() {
        assert_roots(&poly(&[1.0, 0.0, -1.0]).roots(), &[-1.0, 1.0], 1e-15);
    }

    #[test]
    fn quadratic_repeated_root_is_single() {
        assert_roots(&poly(&[1.0, -2.0, 1.0]).roots(), &[1.0], 1e-15);
    }

    #[test]
    fn quadratic_no_real_roots() {
        assert!(poly(&[1.0, 0.0, 1.0]).roots().is_empty());
    }

    #[test]
    fn cubic_three_real_roots() {
        assert_roots(&poly(&[1.0, -6.0, 11.0, -6.0]).roots(), &[1.0, 2.0, 3.0], 1e-9);
    }

    #[test]
    fn cubic_triple_root() {
        assert_roots(&poly(&[1.0, -3.0, 3.0, -1.0]).roots(), &[1.0], 1e-12);
    }

    #[test]
    fn cubic_double_and_single_root() {
        assert_roots(&poly(&[1.0, -4.0, 5.0, -2.0]).roots(), &[1.0, 2.0], 1e-9);
    }

    #[test]
    fn cubic_one_real_root() {
        assert_roots(&poly(&[1.0, 0.0, 0.0, -8.0]).roots(), &[2.0], 1e-12);
    }

    #[test]
    fn quartic_four_real_roots() {
        // (x - 1)(x - 2)(x - 3)(x - 4)
        let p = poly(&[1.0, -10.0, 35.0, -50.0, 24.0]);
        assert_roots(&p.roots(), &[1.0, 2.0, 3.0, 4.0], 1e-9);
    }

    #[test]
    fn quartic_biquadratic() {
        // (x² - 1)(x² - 4)
        let p = poly(&[1.0, 0.0, -5.0, 0.0, 4.0]);
        assert_roots(&p.roots(), &[-2.0, -1.0, 1.0, 2.0], 1e-9);
    }

    #[test]
    fn quartic_two_real_roots() {
        // (x² - 1)(x² + 2)
        let p = poly(&[1.0, 0.0, 1.0, 0.0, -2.0]);
        assert_roots(&p.roots(), &[-1.0, 1.0], 1e-9);
    }

    #[test]
    fn quartic_quadruple_root() {
        // (x - 2)^4
        let p = poly(&[1.0, -8.0, 24.0, -32.0, 16.0]);
        assert_roots(&p.roots(), &[2.0], 1e-6);

        for a in [0.5, -1.0, 2.0] {
            let factor = Polynomial::from_ascending(vec![-a, 1.0]);
            let p = &(&factor * &factor) * &(&factor * &factor);
            assert_eq!(p.degree(), 4);
            assert_roots(&p.roots(), &[a], 1e-6);
        }
    }

    #[test]
    fn quartic_no_real_roots() {
        assert!(poly(&[1.0, 0.0, 0.0, 0.0, 1.0]).roots().is_empty());
    }

    #[test]
    fn quintic_falls_back_to_bracketing() {
        // x (x - 1)(x + 1)(x - 2)(x + 2) = x^5 - 5x^3 + 4x
        let p = poly(&[1.0, 0.0, -5.0, 0.0, 4.0, 0.0]);
        assert_roots(&p.roots(), &[-2.0, -1.0, 0.0, 1.0, 2.0], 1e-8);
    }

    #[test]
    fn roots_in_interval_finds_all() {
        let p = poly(&[1.0, -6.0, 11.0, -6.0]);
        assert_roots(&p.roots_in_interval(0.0, 10.0), &[1.0, 2.0, 3.0], 1e-8);
        assert_roots(&p.roots_in_interval(1.5, 2.5), &[2.0], 1e-8);
    }

    #[test]
    fn roots_in_interval_monotone() {
        let p = poly(&[2.0, -3.0]);
        assert_roots(&p.roots_in_interval(0.0, 5.0), &[1.5], 1e-8);
        assert!(p.roots_in_interval(2.0, 5.0).is_empty());
    }

    #[test]
    fn bisection_endpoint_root() {
        let p = poly(&[1.0, -1.0]);
        assert_eq!(p.bisection(1.0, 3.0), Some(1.0));
        assert_eq!(p.bisection(-1.0, 1.0), Some(1.0));
        assert_eq!(p.bisection(2.0, 3.0), None);
    }
}
