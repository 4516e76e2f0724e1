use crate::error::{GeometryError, OperationError, Result};

use super::{Bounds2D, Line2D, Point2D, Shape2D};

/// An ordered, non-empty polyline with precomputed cumulative length fractions.
///
/// `fractions()[i]` is the length of `points[0..=i]` divided by the total
/// length, so it starts at `0.0`, ends at `1.0` and never decreases. A path
/// of zero total length (a single point, or repeated points) has all
/// fractions equal to `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedPath2D {
    points: Vec<Point2D>,
    fractions: Vec<f64>,
    length: f64,
}

impl SegmentedPath2D {
    /// Builds the path and its length parametrization.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `points` is empty.
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        if points.is_empty() {
            return Err(OperationError::InvalidInput(
                "a segmented path needs at least one point".to_owned(),
            )
            .into());
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut running = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            running += pair[0].distance(pair[1]);
            cumulative.push(running);
        }
        let length = running;

        let fractions = if length > 0.0 {
            let mut fractions: Vec<f64> = cumulative.iter().map(|l| l / length).collect();
            if let Some(last) = fractions.last_mut() {
                *last = 1.0;
            }
            fractions
        } else {
            vec![0.0; points.len()]
        };

        Ok(Self {
            points,
            fractions,
            length,
        })
    }

    #[must_use]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Total Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    #[must_use]
    pub fn fraction(&self, index: usize) -> Option<f64> {
        self.fractions.get(index).copied()
    }

    #[must_use]
    pub fn first(&self) -> Point2D {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Segment `index`, from `points[index]` to `points[index + 1]`.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Line2D> {
        let a = self.points.get(index)?;
        let b = self.points.get(index + 1)?;
        Some(Line2D::new(*a, *b))
    }

    /// Iterates over all segments in path order.
    pub fn segments(&self) -> impl Iterator<Item = Line2D> + '_ {
        self.points.windows(2).map(|w| Line2D::new(w[0], w[1]))
    }

    /// Point reached after travelling `fraction` of the total length.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `fraction` is outside
    /// `[0, 1]`.
    pub fn point_at_fraction(&self, fraction: f64) -> Result<Point2D> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "fraction",
                value: fraction,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        // First index whose cumulative fraction reaches the target.
        let end = self.fractions.partition_point(|f| *f < fraction);
        if end == 0 {
            return Ok(self.first());
        }
        if end >= self.points.len() {
            return Ok(self.last());
        }
        let (f0, f1) = (self.fractions[end - 1], self.fractions[end]);
        let local = if f1 > f0 { (fraction - f0) / (f1 - f0) } else { 0.0 };
        Ok(self.points[end - 1].lerp(self.points[end], local))
    }
}

impl Shape2D for SegmentedPath2D {
    fn bounds(&self) -> Bounds2D {
        Bounds2D::from_points(&self.points)
            .unwrap_or_else(|| Bounds2D::new(0.0, 0.0, 0.0, 0.0))
    }

    fn flatten(&self, max_segment_length: f64) -> Vec<Point2D> {
        let mut out = vec![self.first()];
        for segment in self.segments() {
            out.extend(segment.flatten(max_segment_length).into_iter().skip(1));
        }
        out
    }
}
