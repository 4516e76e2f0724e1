use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Cubic2D, Point2D, SegmentedPath2D};

use super::{FitHint, FitParams};

/// A fitted curve together with its final error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub curve: Cubic2D,
    /// Metric value of `curve` against the stations, per unit path length.
    pub error: f64,
}

/// Fits one cubic Bézier to an ordered list of station points.
///
/// The curve runs from the first station to the last. Its interior control
/// points are confined to two segments derived from the path's end directions
/// (the *bounds* guess, see [`FitHint`]): `b` slides from the start towards
/// `bounds.b`, `c` from the end towards `bounds.c`. Both start halfway along.
///
/// # Algorithm
///
/// A nested grid search over the two slide parameters. At level `e` the step
/// is `1 / segments^(e+1)`; `segments + 1` candidates from the current anchor
/// are tried for `b` (with `c` held), then for `c` (with the new `b`). The
/// next anchor is placed half a step-span below the best value so that the
/// finer grid straddles it.
#[derive(Debug, Clone, Copy)]
pub struct FitCubic<'a> {
    path: &'a SegmentedPath2D,
    params: FitParams,
}

impl<'a> FitCubic<'a> {
    /// Creates a new fit with default parameters.
    #[must_use]
    pub fn new(path: &'a SegmentedPath2D) -> Self {
        Self {
            path,
            params: FitParams::default(),
        }
    }

    /// Sets custom fit parameters.
    #[must_use]
    pub fn with_params(mut self, params: FitParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the fit, returning the curve.
    ///
    /// # Errors
    ///
    /// See [`FitCubic::execute_with_error`].
    pub fn execute(&self) -> Result<Cubic2D> {
        self.execute_with_error().map(|fit| fit.curve)
    }

    /// Executes the fit, returning the curve and its error.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the path has fewer than two
    /// points, has zero length, or the parameters are out of range.
    pub fn execute_with_error(&self) -> Result<FitResult> {
        self.params.validate()?;
        let path = self.path;
        if path.point_count() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 station points are required for a fit".to_owned(),
            )
            .into());
        }
        if !(path.length() > 0.0) {
            return Err(
                OperationError::InvalidInput("station path has zero length".to_owned()).into(),
            );
        }

        let (start, end) = (path.first(), path.last());
        let bounds = self.guess(1.0);
        let curve_at = |tb: f64, tc: f64| {
            Cubic2D::new(
                start,
                start.lerp(bounds.b(), tb),
                end.lerp(bounds.c(), tc),
                end,
            )
        };
        let error_of = |curve: Cubic2D| {
            self.params
                .metric
                .evaluate(&curve, path, self.params.samples)
        };

        // Halfway along both slides is the t = 0.5 guess.
        let (mut tb, mut tc) = (0.5, 0.5);
        let (mut anchor_b, mut anchor_c) = (0.0, 0.0);
        let mut error = error_of(curve_at(tb, tc));
        let mut step = 1.0;

        for level in 0..self.params.levels {
            step /= f64::from(self.params.segments);
            let (best_b, _) = self.search(anchor_b, step, |t| error_of(curve_at(t, tc)));
            tb = best_b;
            let (best_c, best_error) = self.search(anchor_c, step, |t| error_of(curve_at(tb, t)));
            tc = best_c;
            error = best_error;

            anchor_b = tb - 0.5 * step;
            anchor_c = tc - 0.5 * step;
            debug!(level, tb, tc, error, "fit refinement level");
        }

        Ok(FitResult {
            curve: curve_at(tb, tc),
            error,
        })
    }

    /// Best of `segments + 1` parameters spaced `step` apart from `anchor`,
    /// clamped to `[0, 1]`.
    fn search(&self, anchor: f64, step: f64, mut error_at: impl FnMut(f64) -> f64) -> (f64, f64) {
        let mut best = (anchor.clamp(0.0, 1.0), f64::INFINITY);
        for k in 0..=self.params.segments {
            let t = (anchor + f64::from(k) * step).clamp(0.0, 1.0);
            let error = error_at(t);
            if error < best.1 {
                best = (t, error);
            }
        }
        best
    }

    /// Control points placed `t` chord lengths from each end, along the
    /// directions chosen by the hint.
    fn guess(&self, t: f64) -> Cubic2D {
        let points = self.path.points();
        let n = points.len();
        let (start, end) = (self.path.first(), self.path.last());
        let reach = start.distance(end) * t;

        let d0 = match self.params.hint {
            FitHint::Leading => {
                let normal = heading(start, end).perpendicular();
                if (points[n / 2] - start).dot(normal) < 0.0 {
                    -normal
                } else {
                    normal
                }
            }
            FitHint::Trailing | FitHint::Middle => heading(start, points[1]),
        };
        let d3 = match self.params.hint {
            FitHint::Trailing => heading(end, points[n.saturating_sub(3)]),
            FitHint::Leading | FitHint::Middle => heading(end, points[n - 2]),
        };

        Cubic2D::new(start, start + d0 * reach, end + d3 * reach, end)
    }
}

/// Unit direction from `from` to `to`, or zero if they coincide.
fn heading(from: Point2D, to: Point2D) -> Point2D {
    (to - from).try_normalize().unwrap_or(Point2D::ZERO)
}
