use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::Point2D;
use crate::math::polygon_2d::polygon_area;

use super::FindPolygons;

/// Total area enclosed between two paths.
///
/// Sums the areas of every region found by [`FindPolygons`].
#[derive(Debug, Clone, Copy)]
pub struct EnclosedArea<'a> {
    a: &'a [Point2D],
    b: &'a [Point2D],
}

impl<'a> EnclosedArea<'a> {
    #[must_use]
    pub fn new(a: &'a [Point2D], b: &'a [Point2D]) -> Self {
        Self { a, b }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::NoEnclosedRegion` if the paths enclose no
    /// region at all.
    pub fn execute(&self) -> Result<f64> {
        let polygons = FindPolygons::new(self.a, self.b).execute();
        if polygons.is_empty() {
            return Err(OperationError::NoEnclosedRegion.into());
        }
        let area = polygons.iter().map(|p| polygon_area(p)).sum();
        debug!(regions = polygons.len(), area, "enclosed area");
        Ok(area)
    }
}

/// Area between two paths, treating "no enclosed region" as zero.
#[must_use]
pub fn difference_area(a: &[Point2D], b: &[Point2D]) -> f64 {
    EnclosedArea::new(a, b).execute().unwrap_or(0.0)
}
