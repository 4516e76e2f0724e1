use crate::geometry::{Cubic2D, SegmentedPath2D};
use crate::math::distance_2d::nearest_segment;

/// How the distance between a candidate curve and the stations is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorMetric {
    /// Each station's distance to the nearest segment of the sampled curve.
    #[default]
    NearestSegment,
    /// Each station's distance to the curve point at the station's
    /// cumulative length fraction.
    ParametricOffset,
}

impl ErrorMetric {
    /// Summed station distance to `curve`, divided by the path length.
    ///
    /// `samples` is the polyline resolution used by
    /// [`ErrorMetric::NearestSegment`]. The path must have a positive length.
    #[must_use]
    pub fn evaluate(self, curve: &Cubic2D, path: &SegmentedPath2D, samples: usize) -> f64 {
        let total: f64 = match self {
            Self::NearestSegment => {
                let polyline = curve.to_polyline(samples);
                path.points()
                    .iter()
                    .filter_map(|p| nearest_segment(&polyline, *p))
                    .map(|(_, distance)| distance)
                    .sum()
            }
            Self::ParametricOffset => path
                .points()
                .iter()
                .zip(path.fractions())
                .map(|(p, f)| p.distance(curve.point_at(*f)))
                .sum(),
        };
        total / path.length()
    }
}
