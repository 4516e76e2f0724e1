//! Pairwise intersection of lines, ellipses and cubic Béziers.
//!
//! Every intersector returns an [`Intersection2D`]; callers branch on its
//! [`IntersectionType`] before trusting the point list.
//!
//! The curve intersectors eliminate one variable with a Bezout resultant and
//! solve the remaining univariate polynomial with [`Polynomial`]. Inputs are
//! first mapped into a unit frame so that the polynomial coefficients stay
//! well above the kernel's near-zero trimming threshold. The cubic–cubic
//! resultant is a best-effort method: near-tangential crossings can be missed.

use super::{is_small_enough, Polynomial, TOLERANCE};
use crate::geometry::{Bounds2D, Cubic2D, Ellipse2D, Line2D, Point2D, Shape2D};

/// Maximum difference between the two parameter solutions of a cubic–cubic
/// intersection for them to be considered the same root.
pub const CURVE_ROOT_TOLERANCE: f64 = 1e-4;

/// Relative tolerance for a candidate point to satisfy both conics.
pub const CONIC_TOLERANCE: f64 = 1e-3;

/// Slack allowed on curve parameters at the ends of `[0, 1]`.
const PARAM_SLACK: f64 = 1e-9;

/// Classification of a pairwise intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionType {
    /// The primitives do not meet.
    None,
    /// Parallel lines that never meet.
    Parallel,
    /// Lines lying on the same infinite line.
    Coincident,
    /// The primitives are identical (possibly with reversed point order).
    Same,
    /// The primitives meet at the listed points.
    Intersection,
}

/// Typed result of intersecting two primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection2D {
    pub kind: IntersectionType,
    pub points: Vec<Point2D>,
}

impl Intersection2D {
    /// A result of the given kind without points.
    #[must_use]
    pub fn of_kind(kind: IntersectionType) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    /// No intersection.
    #[must_use]
    pub fn none() -> Self {
        Self::of_kind(IntersectionType::None)
    }

    /// `Intersection` when `points` is non-empty, `None` otherwise.
    #[must_use]
    pub fn from_points(points: Vec<Point2D>) -> Self {
        if points.is_empty() {
            Self::none()
        } else {
            Self {
                kind: IntersectionType::Intersection,
                points,
            }
        }
    }

    /// Returns `true` if the result carries intersection points.
    #[must_use]
    pub fn is_intersection(&self) -> bool {
        self.kind == IntersectionType::Intersection
    }
}

/// Similarity transform mapping a region of interest onto roughly the unit box.
#[derive(Debug, Clone, Copy)]
struct UnitFrame {
    origin: Point2D,
    scale: f64,
}

impl UnitFrame {
    fn enclosing(bounds: &Bounds2D) -> Self {
        let extent = bounds.width().max(bounds.height());
        let scale = if extent > 0.0 && extent.is_finite() {
            1.0 / extent
        } else {
            1.0
        };
        Self {
            origin: bounds.min(),
            scale,
        }
    }

    fn to_local(self, p: Point2D) -> Point2D {
        (p - self.origin) * self.scale
    }

    fn to_world(self, p: Point2D) -> Point2D {
        p * (1.0 / self.scale) + self.origin
    }

    fn cubic(self, c: &Cubic2D) -> Cubic2D {
        let [a, b, cc, d] = c.control_points().map(|p| self.to_local(p));
        Cubic2D::new(a, b, cc, d)
    }
}

/// Intersection of two bounded segments.
///
/// Solves `a1 + ua (a2 - a1) = b1 + ub (b2 - b1)`. A zero denominator means
/// the lines are parallel, or coincident when both numerators vanish too.
/// Otherwise the single point is reported only when both `ua` and `ub` lie in
/// `[0, 1]`.
#[must_use]
pub fn intersect_line_line(a: &Line2D, b: &Line2D) -> Intersection2D {
    if a.is_same(b) {
        return Intersection2D::of_kind(IntersectionType::Same);
    }

    let (a1, a2) = (a.a(), a.b());
    let (b1, b2) = (b.a(), b.b());
    let ua_t = (b2 - b1).cross(a1 - b1);
    let ub_t = (a2 - a1).cross(a1 - b1);
    let u_b = (a2 - a1).cross(b2 - b1);

    if is_small_enough(u_b) {
        return if is_small_enough(ua_t) && is_small_enough(ub_t) {
            Intersection2D::of_kind(IntersectionType::Coincident)
        } else {
            Intersection2D::of_kind(IntersectionType::Parallel)
        };
    }

    let ua = ua_t / u_b;
    let ub = ub_t / u_b;
    let eps = TOLERANCE;
    if (-eps..=1.0 + eps).contains(&ua) && (-eps..=1.0 + eps).contains(&ub) {
        Intersection2D::from_points(vec![a.point_at(ua.clamp(0.0, 1.0))])
    } else {
        Intersection2D::none()
    }
}

/// Intersection of a segment with an ellipse, ordered along the segment.
#[must_use]
pub fn intersect_line_ellipse(line: &Line2D, ellipse: &Ellipse2D) -> Intersection2D {
    let (rx, ry) = (ellipse.rx(), ellipse.ry());
    let p = line.a() - ellipse.center();
    let d = line.direction();

    let a = (d.x / rx).powi(2) + (d.y / ry).powi(2);
    let b = 2.0 * (p.x * d.x / (rx * rx) + p.y * d.y / (ry * ry));
    let c = (p.x / rx).powi(2) + (p.y / ry).powi(2) - 1.0;

    let points = Polynomial::from_ascending(vec![c, b, a])
        .roots()
        .into_iter()
        .filter(|t| (-PARAM_SLACK..=1.0 + PARAM_SLACK).contains(t))
        .map(|t| line.point_at(t.clamp(0.0, 1.0)))
        .collect();
    Intersection2D::from_points(points)
}

/// Intersection of two axis-aligned ellipses.
///
/// Both conics are expressed in a frame centred on the first ellipse, the
/// Bezout resultant eliminates `x`, and each real `y` root is completed by the
/// quadratic in `x`. A candidate is kept when it satisfies both conics within
/// [`CONIC_TOLERANCE`] times the squared norm of their quadratic coefficients.
#[must_use]
pub fn intersect_ellipse_ellipse(e1: &Ellipse2D, e2: &Ellipse2D) -> Intersection2D {
    if e1 == e2 {
        return Intersection2D::of_kind(IntersectionType::Same);
    }

    let frame = UnitFrame {
        origin: e1.center(),
        scale: 1.0 / e1.rx().max(e1.ry()).max(e2.rx()).max(e2.ry()),
    };
    let local = |e: &Ellipse2D| e.translated(-frame.origin).scaled(frame.scale);
    let a = local(e1).conic_coefficients();
    let b = local(e2).conic_coefficients();

    let norm_a = (a[0] * a[0] + 2.0 * a[1] * a[1] + a[2] * a[2]) * CONIC_TOLERANCE;
    let norm_b = (b[0] * b[0] + 2.0 * b[1] * b[1] + b[2] * b[2]) * CONIC_TOLERANCE;

    let mut points = Vec::new();
    for y in conic_bezout(&a, &b).roots() {
        let x_poly =
            Polynomial::from_ascending(vec![a[5] + y * (a[4] + y * a[2]), a[3] + y * a[1], a[0]]);
        for x in x_poly.roots() {
            if conic_value(&a, x, y).abs() < norm_a && conic_value(&b, x, y).abs() < norm_b {
                points.push(frame.to_world(Point2D::new(x, y)));
            }
        }
    }
    Intersection2D::from_points(points)
}

fn conic_value(e: &[f64; 6], x: f64, y: f64) -> f64 {
    (e[0] * x + e[1] * y + e[3]) * x + (e[2] * y + e[4]) * y + e[5]
}

/// Resultant in `y` of two conics `a x² + b xy + c y² + d x + e y + f`.
fn conic_bezout(e1: &[f64; 6], e2: &[f64; 6]) -> Polynomial {
    let det = |i: usize, j: usize| e1[i] * e2[j] - e2[i] * e1[j];
    let ab = det(0, 1);
    let ac = det(0, 2);
    let ad = det(0, 3);
    let ae = det(0, 4);
    let af = det(0, 5);
    let bc = det(1, 2);
    let be = det(1, 4);
    let bf = det(1, 5);
    let cd = det(2, 3);
    let de = det(3, 4);
    let df = det(3, 5);
    let bf_de = bf + de;
    let be_cd = be - cd;

    Polynomial::from_ascending(vec![
        ad * df - af * af,
        ab * df + ad * bf_de - 2.0 * ae * af,
        ab * bf_de + ad * be_cd - ae * ae - 2.0 * ac * af,
        ab * be_cd + ad * bc - 2.0 * ac * ae,
        ab * bc - ac * ac,
    ])
}

/// Intersection of a segment with a cubic Bézier, ordered along the curve.
///
/// The cubic is projected onto the segment's normal; the roots of that cubic
/// in `[0, 1]` are kept when the point also lies within the segment.
#[must_use]
pub fn intersect_line_cubic(line: &Line2D, curve: &Cubic2D) -> Intersection2D {
    if !(line.length() > 0.0) {
        return Intersection2D::none();
    }
    let frame = UnitFrame::enclosing(&line.bounds().union(&curve.bounds()));
    let (a1, a2) = (frame.to_local(line.a()), frame.to_local(line.b()));
    let local = frame.cubic(curve);

    let dir = a2 - a1;
    let normal = dir.perpendicular().normalize();
    let k = local.power_coefficients();
    let poly = Polynomial::from_ascending(vec![
        normal.dot(k[0] - a1),
        normal.dot(k[1]),
        normal.dot(k[2]),
        normal.dot(k[3]),
    ]);

    let len_sq = dir.magnitude_squared();
    let points = poly
        .roots()
        .into_iter()
        .filter(|t| (-PARAM_SLACK..=1.0 + PARAM_SLACK).contains(t))
        .map(|t| local.point_at(t.clamp(0.0, 1.0)))
        .filter(|p| {
            let along = (*p - a1).dot(dir) / len_sq;
            (-PARAM_SLACK..=1.0 + PARAM_SLACK).contains(&along)
        })
        .map(|p| frame.to_world(p))
        .collect();
    Intersection2D::from_points(points)
}

/// Intersection of two cubic Béziers.
///
/// With `P(t)` the first curve and `Q(s)` the second, the axis equations
/// `Px(t) - Qx(s) = 0` and `Py(t) - Qy(s) = 0` are cubics in `t` whose
/// constant terms are cubics in `s`. Their Bezout resultant is a polynomial in
/// `s` alone; each of its roots in `[0, 1]` is checked by solving both axis
/// equations for `t` and requiring a shared solution within
/// [`CURVE_ROOT_TOLERANCE`].
///
/// Overlapping curve pieces make the resultant vanish and are reported as
/// [`IntersectionType::None`]; identical curves are [`IntersectionType::Same`].
#[must_use]
pub fn intersect_cubic_cubic(c1: &Cubic2D, c2: &Cubic2D) -> Intersection2D {
    if c1.is_same(c2) {
        return Intersection2D::of_kind(IntersectionType::Same);
    }
    let (bounds1, bounds2) = (c1.bounds(), c2.bounds());
    if !bounds1.overlaps(&bounds2) {
        return Intersection2D::none();
    }

    let frame = UnitFrame::enclosing(&bounds1.union(&bounds2));
    let k1 = frame.cubic(c1).power_coefficients();
    let k2 = frame.cubic(c2).power_coefficients();

    // Effective degree of the first curve in t.
    let Some(degree) = (1..4)
        .rev()
        .find(|&i| !is_small_enough(k1[i].x) || !is_small_enough(k1[i].y))
    else {
        return Intersection2D::none();
    };

    let qx = Polynomial::from_ascending(k2.iter().map(|k| k.x).collect());
    let qy = Polynomial::from_ascending(k2.iter().map(|k| k.y).collect());
    let axis_equations = |q: &Polynomial, coef: fn(Point2D) -> f64| -> [Polynomial; 4] {
        [
            &Polynomial::constant(coef(k1[0])) - q,
            Polynomial::constant(coef(k1[1])),
            Polynomial::constant(coef(k1[2])),
            Polynomial::constant(coef(k1[3])),
        ]
    };
    let fx = axis_equations(&qx, |p| p.x);
    let fy = axis_equations(&qy, |p| p.y);

    let resultant = bezout_resultant(&fx, &fy, degree);
    let largest = resultant
        .coefficients()
        .iter()
        .fold(0.0_f64, |m, c| m.max(c.abs()));
    if !(largest > 0.0) || !largest.is_finite() {
        return Intersection2D::none();
    }
    let resultant = resultant.divide_scalar(largest);

    let mut points: Vec<Point2D> = Vec::new();
    for s in resultant.roots_in_interval(0.0, 1.0) {
        let target = Point2D::new(qx.evaluate(s), qy.evaluate(s));
        let x_params = axis_parameters(k1.map(|k| k.x), target.x);
        let y_params = axis_parameters(k1.map(|k| k.y), target.y);
        if parameters_agree(x_params.as_deref(), y_params.as_deref()) {
            let world = frame.to_world(target);
            if !points.iter().any(|p| p.approx_eq(world, TOLERANCE)) {
                points.push(world);
            }
        }
    }
    Intersection2D::from_points(points)
}

/// Parameters `t ∈ [0, 1]` at which the axis cubic reaches `target`.
///
/// `None` means the axis is constant at `target`, so every `t` qualifies.
fn axis_parameters(coefs: [f64; 4], target: f64) -> Option<Vec<f64>> {
    let poly = Polynomial::from_ascending(vec![coefs[0] - target, coefs[1], coefs[2], coefs[3]]);
    if poly.is_zero() {
        return None;
    }
    Some(
        poly.roots()
            .into_iter()
            .filter(|t| (-PARAM_SLACK..=1.0 + PARAM_SLACK).contains(t))
            .collect(),
    )
}

fn parameters_agree(xs: Option<&[f64]>, ys: Option<&[f64]>) -> bool {
    match (xs, ys) {
        (Some(xs), Some(ys)) => xs
            .iter()
            .any(|x| ys.iter().any(|y| (x - y).abs() < CURVE_ROOT_TOLERANCE)),
        (Some(only), None) | (None, Some(only)) => !only.is_empty(),
        (None, None) => true,
    }
}

/// Determinant of the Bezout matrix of `f` and `g`, polynomials in `t` of
/// degree at most `n` (1..=3) whose coefficients are polynomials in `s`.
///
/// `B[i][j] = Σ_{k=0}^{min(i, n-1-j)} (f[i-k] g[j+1+k] - f[j+1+k] g[i-k])`.
fn bezout_resultant(f: &[Polynomial; 4], g: &[Polynomial; 4], n: usize) -> Polynomial {
    let m = |p: usize, q: usize| &(&f[p] * &g[q]) - &(&f[q] * &g[p]);
    let entry = |i: usize, j: usize| {
        (0..=i.min(n - 1 - j)).fold(Polynomial::zero(), |acc, k| &acc + &m(i - k, j + 1 + k))
    };
    let b: Vec<Vec<Polynomial>> = (0..n).map(|i| (0..n).map(|j| entry(i, j)).collect()).collect();
    let minor = |r1: usize, r2: usize, c1: usize, c2: usize| {
        &(&b[r1][c1] * &b[r2][c2]) - &(&b[r1][c2] * &b[r2][c1])
    };

    match n {
        1 => b[0][0].clone(),
        2 => minor(0, 1, 0, 1),
        _ => {
            let t0 = &b[0][0] * &minor(1, 2, 1, 2);
            let t1 = &b[0][1] * &minor(1, 2, 0, 2);
            let t2 = &b[0][2] * &minor(1, 2, 0, 1);
            &(&t0 - &t1) + &t2
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Line2D {
        Line2D::new(p(ax, ay), p(bx, by))
    }

    fn sorted(mut points: Vec<Point2D>) -> Vec<Point2D> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    // ── line-line ──

    #[test]
    fn line_line_crossing() {
        let hit = intersect_line_line(&line(1.0, 2.0, 2.0, 1.0), &line(1.0, 1.0, 2.0, 2.0));
        assert_eq!(hit.kind, IntersectionType::Intersection);
        assert_eq!(hit.points, vec![p(1.5, 1.5)]);
    }

    #[test]
    fn line_line_outside_segments() {
        let hit = intersect_line_line(&line(0.0, 0.0, 1.0, 0.0), &line(2.0, -1.0, 2.0, 1.0));
        assert_eq!(hit.kind, IntersectionType::None);
        assert!(hit.points.is_empty());
    }

    #[test]
    fn line_line_parallel() {
        let hit = intersect_line_line(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 1.0, 1.0));
        assert_eq!(hit.kind, IntersectionType::Parallel);
    }

    #[test]
    fn line_line_coincident() {
        let hit = intersect_line_line(&line(0.0, 0.0, 1.0, 0.0), &line(2.0, 0.0, 3.0, 0.0));
        assert_eq!(hit.kind, IntersectionType::Coincident);
    }

    #[test]
    fn line_line_same_either_direction() {
        let a = line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(intersect_line_line(&a, &a).kind, IntersectionType::Same);
        assert_eq!(
            intersect_line_line(&a, &a.reversed()).kind,
            IntersectionType::Same
        );
    }

    #[test]
    fn line_line_shared_endpoint() {
        let hit = intersect_line_line(&line(0.0, 0.0, 1.0, 1.0), &line(1.0, 1.0, 2.0, 0.0));
        assert!(hit.is_intersection());
        assert!(hit.points[0].approx_eq(p(1.0, 1.0), 1e-12));
    }

    // ── ellipse ──

    #[test]
    fn ellipse_ellipse_four_points() {
        let e1 = Ellipse2D::new(Point2D::ZERO, 2.0, 1.0).unwrap();
        let e2 = Ellipse2D::new(Point2D::ZERO, 1.0, 2.0).unwrap();
        let hit = intersect_ellipse_ellipse(&e1, &e2);
        assert!(hit.is_intersection());
        assert_eq!(hit.points.len(), 4);
        let v = 2.0 / 5f64.sqrt();
        for q in &hit.points {
            assert_abs_diff_eq!(q.x.abs(), v, epsilon = 1e-8);
            assert_abs_diff_eq!(q.y.abs(), v, epsilon = 1e-8);
        }
    }

    #[test]
    fn circle_circle_two_points() {
        let c1 = Ellipse2D::circle(p(1.0, 1.0), 1.0).unwrap();
        let c2 = Ellipse2D::circle(p(2.0, 1.0), 1.0).unwrap();
        let hit = sorted(intersect_ellipse_ellipse(&c1, &c2).points);
        assert_eq!(hit.len(), 2);
        let h = 3f64.sqrt() / 2.0;
        assert!(hit[0].approx_eq(p(1.5, 1.0 - h), 1e-9));
        assert!(hit[1].approx_eq(p(1.5, 1.0 + h), 1e-9));
    }

    #[test]
    fn ellipse_ellipse_apart_and_same() {
        let c1 = Ellipse2D::circle(Point2D::ZERO, 1.0).unwrap();
        let c2 = Ellipse2D::circle(p(5.0, 0.0), 1.0).unwrap();
        assert_eq!(intersect_ellipse_ellipse(&c1, &c2).kind, IntersectionType::None);
        assert_eq!(intersect_ellipse_ellipse(&c1, &c1).kind, IntersectionType::Same);
    }

    #[test]
    fn line_ellipse_crossings() {
        let c = Ellipse2D::circle(Point2D::ZERO, 1.0).unwrap();
        let through = intersect_line_ellipse(&line(-2.0, 0.0, 2.0, 0.0), &c);
        assert_eq!(through.points.len(), 2);
        assert!(through.points[0].approx_eq(p(-1.0, 0.0), 1e-12));
        assert!(through.points[1].approx_eq(p(1.0, 0.0), 1e-12));

        let half = intersect_line_ellipse(&line(0.0, 0.0, 2.0, 0.0), &c);
        assert_eq!(half.points.len(), 1);
        assert!(half.points[0].approx_eq(p(1.0, 0.0), 1e-12));

        let miss = intersect_line_ellipse(&line(-2.0, 3.0, 2.0, 3.0), &c);
        assert_eq!(miss.kind, IntersectionType::None);
    }

    // ── cubic ──

    #[test]
    fn cubic_cubic_two_crossings() {
        let arch = Cubic2D::new(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 2.0), p(3.0, 0.0));
        let bowl = Cubic2D::new(p(0.0, 1.5), p(1.0, -0.5), p(2.0, -0.5), p(3.0, 1.5));
        let hit = sorted(intersect_cubic_cubic(&arch, &bowl).points);
        assert_eq!(hit.len(), 2, "hit={hit:?}");
        let offset = 3.0 * 72f64.sqrt() / 24.0;
        assert!(hit[0].approx_eq(p(1.5 - offset, 0.75), 1e-6), "{:?}", hit[0]);
        assert!(hit[1].approx_eq(p(1.5 + offset, 0.75), 1e-6), "{:?}", hit[1]);
    }

    #[test]
    fn cubic_cubic_single_crossing() {
        let s_curve = Cubic2D::new(p(0.0, 0.0), p(0.5, 0.5), p(0.5, -0.5), p(1.0, 0.0));
        let vertical = Cubic2D::new(p(0.5, -1.0), p(0.5, 0.0), p(0.5, 0.0), p(0.5, 1.0));
        let hit = intersect_cubic_cubic(&s_curve, &vertical);
        assert_eq!(hit.points.len(), 1, "hit={hit:?}");
        assert!(hit.points[0].approx_eq(p(0.5, 0.0), 1e-6));
    }

    #[test]
    fn cubic_cubic_same_and_disjoint() {
        let c = Cubic2D::new(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 2.0), p(3.0, 0.0));
        assert_eq!(intersect_cubic_cubic(&c, &c).kind, IntersectionType::Same);
        assert_eq!(
            intersect_cubic_cubic(&c, &c.reversed()).kind,
            IntersectionType::Same
        );
        let far = Cubic2D::new(p(10.0, 10.0), p(11.0, 12.0), p(12.0, 12.0), p(13.0, 10.0));
        assert_eq!(intersect_cubic_cubic(&c, &far).kind, IntersectionType::None);
    }

    #[test]
    fn cubic_cubic_small_scale() {
        // Same configuration as the two-crossing case, shrunk a thousandfold.
        let k = 1e-3;
        let arch = Cubic2D::new(p(0.0, 0.0), p(k, 2.0 * k), p(2.0 * k, 2.0 * k), p(3.0 * k, 0.0));
        let bowl = Cubic2D::new(
            p(0.0, 1.5 * k),
            p(k, -0.5 * k),
            p(2.0 * k, -0.5 * k),
            p(3.0 * k, 1.5 * k),
        );
        assert_eq!(intersect_cubic_cubic(&arch, &bowl).points.len(), 2);
    }

    #[test]
    fn line_cubic_three_crossings() {
        let s_curve = Cubic2D::new(p(0.0, 0.0), p(0.5, 0.5), p(0.5, -0.5), p(1.0, 0.0));
        let hit = intersect_line_cubic(&line(-1.0, 0.0, 2.0, 0.0), &s_curve);
        assert_eq!(hit.points.len(), 3, "hit={hit:?}");
        assert!(hit.points[0].approx_eq(p(0.0, 0.0), 1e-9));
        assert!(hit.points[1].approx_eq(p(0.5, 0.0), 1e-9));
        assert!(hit.points[2].approx_eq(p(1.0, 0.0), 1e-9));
    }

    #[test]
    fn line_cubic_respects_segment_extent() {
        let s_curve = Cubic2D::new(p(0.0, 0.0), p(0.5, 0.5), p(0.5, -0.5), p(1.0, 0.0));
        let hit = intersect_line_cubic(&line(0.25, 0.0, 0.75, 0.0), &s_curve);
        assert_eq!(hit.points.len(), 1);
        assert!(hit.points[0].approx_eq(p(0.5, 0.0), 1e-9));
    }
}
