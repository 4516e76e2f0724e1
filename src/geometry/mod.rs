mod bounds;
mod cubic;
mod ellipse;
mod line;
mod path;
mod point;

pub use bounds::Bounds2D;
pub use cubic::Cubic2D;
pub use ellipse::Ellipse2D;
pub use line::Line2D;
pub use path::SegmentedPath2D;
pub use point::Point2D;

/// Capabilities shared by every 2D shape value.
pub trait Shape2D {
    /// Returns the tight axis-aligned bounding box.
    fn bounds(&self) -> Bounds2D;

    /// Discretizes the shape into a polyline whose segments are no longer
    /// than `max_segment_length`.
    ///
    /// A non-positive or non-finite length yields the coarsest polyline the
    /// shape supports.
    fn flatten(&self, max_segment_length: f64) -> Vec<Point2D>;
}

/// Number of equal pieces needed so that none exceeds `max_len`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn piece_count(length: f64, max_len: f64) -> usize {
    if !(max_len > 0.0) || !length.is_finite() || length <= max_len {
        return 1;
    }
    (length / max_len).ceil() as usize
}
