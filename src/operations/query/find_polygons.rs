use tracing::trace;

use crate::geometry::{Line2D, Point2D};
use crate::math::polygon_2d::{dedup_points, polygon_area, to_ccw_polygon};
use crate::math::{IntersectionType, TOLERANCE};

/// Extracts the closed regions enclosed between two polylines.
///
/// Both paths are expected to run in the same general direction and not to
/// intersect themselves. Path `a` is swept segment by segment; for each of its
/// segments, path `b` is swept from the segment of the last crossing onwards.
/// Every new crossing closes the region that started at the previous one:
/// its two sides are the points of `a` and of `b` between the crossings.
///
/// Regions without area (for example where the two paths run along the same
/// segments) are skipped. Each returned polygon is counter-clockwise and
/// closed implicitly.
#[derive(Debug, Clone, Copy)]
pub struct FindPolygons<'a> {
    a: &'a [Point2D],
    b: &'a [Point2D],
}

/// Crossing position: the point and the segment indices on each path.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    point: Point2D,
    a_segment: usize,
    b_segment: usize,
}

impl<'a> FindPolygons<'a> {
    /// Creates a new polygon extraction between paths `a` and `b`.
    #[must_use]
    pub fn new(a: &'a [Point2D], b: &'a [Point2D]) -> Self {
        Self { a, b }
    }

    /// Executes the sweep.
    ///
    /// Returns an empty list when the paths cross fewer than twice.
    #[must_use]
    pub fn execute(&self) -> Vec<Vec<Point2D>> {
        let mut polygons = Vec::new();
        if self.a.len() < 2 || self.b.len() < 2 {
            return polygons;
        }

        let mut previous: Option<Crossing> = None;
        let mut b_start = 0;
        for (i, pair_a) in self.a.windows(2).enumerate() {
            let seg_a = Line2D::new(pair_a[0], pair_a[1]);
            for j in b_start..self.b.len() - 1 {
                let seg_b = Line2D::new(self.b[j], self.b[j + 1]);
                let hit = seg_a.intersect(&seg_b);
                if hit.kind != IntersectionType::Intersection {
                    continue;
                }
                for &point in &hit.points {
                    let crossing = Crossing {
                        point,
                        a_segment: i,
                        b_segment: j,
                    };
                    match previous {
                        Some(prev) if prev.point.approx_eq(point, TOLERANCE) => continue,
                        Some(prev) => {
                            if let Some(polygon) = self.close_region(prev, crossing) {
                                polygons.push(polygon);
                            }
                        }
                        None => {}
                    }
                    previous = Some(crossing);
                    b_start = j;
                }
            }
        }
        polygons
    }

    /// Builds the region between two consecutive crossings, or `None` if it
    /// encloses no area.
    fn close_region(&self, from: Crossing, to: Crossing) -> Option<Vec<Point2D>> {
        let side_a = side(self.a, from.point, from.a_segment, to.a_segment, to.point);
        let side_b = side(self.b, from.point, from.b_segment, to.b_segment, to.point);
        if side_a.len() < 3 && side_b.len() < 3 {
            trace!(from = ?from.point, to = ?to.point, "crossings are adjacent, no region");
            return None;
        }

        match to_ccw_polygon(&side_a, &side_b) {
            Ok(polygon) if polygon_area(&polygon).abs() > TOLERANCE => {
                trace!(vertices = polygon.len(), "closed polygon");
                Some(polygon)
            }
            Ok(_) => {
                trace!(from = ?from.point, to = ?to.point, "region has no area");
                None
            }
            Err(err) => {
                trace!(%err, "could not orient region");
                None
            }
        }
    }
}

/// One side of a region: `from`, the path vertices between segment `first`
/// and segment `last`, then `to`, without consecutive duplicates.
fn side(path: &[Point2D], from: Point2D, first: usize, last: usize, to: Point2D) -> Vec<Point2D> {
    let mut points = Vec::with_capacity(last.saturating_sub(first) + 2);
    points.push(from);
    if last > first {
        points.extend_from_slice(&path[first + 1..=last]);
    }
    points.push(to);
    dedup_points(&mut points);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn crossing_paths_enclose_a_diamond() {
        let a = [p(1.0, 2.0), p(2.0, 1.0), p(3.0, 2.0)];
        let b = [p(1.0, 1.0), p(2.0, 2.0), p(3.0, 1.0)];
        let polygons = FindPolygons::new(&a, &b).execute();
        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0],
            vec![p(1.5, 1.5), p(2.0, 1.0), p(2.5, 1.5), p(2.0, 2.0)]
        );
        assert_abs_diff_eq!(polygon_area(&polygons[0]), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn identical_paths_enclose_nothing() {
        let a = [p(1.0, 2.0), p(2.0, 1.0), p(3.0, 2.0), p(4.0, 1.5), p(5.0, 3.0)];
        assert!(FindPolygons::new(&a, &a).execute().is_empty());
    }

    #[test]
    fn single_crossing_encloses_nothing() {
        let a = [p(0.0, 0.0), p(2.0, 2.0)];
        let b = [p(0.0, 2.0), p(2.0, 0.0)];
        assert!(FindPolygons::new(&a, &b).execute().is_empty());
    }

    #[test]
    fn disjoint_paths_enclose_nothing() {
        let a = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
        let b = [p(0.0, 1.0), p(1.0, 1.0), p(2.0, 1.0)];
        assert!(FindPolygons::new(&a, &b).execute().is_empty());
    }

    #[test]
    fn shared_endpoints_enclose_the_lens() {
        // Chord and arc meeting at both ends.
        let chord = [p(0.0, 0.0), p(4.0, 0.0)];
        let arc = [p(0.0, 0.0), p(1.0, 1.0), p(3.0, 1.0), p(4.0, 0.0)];
        let polygons = FindPolygons::new(&chord, &arc).execute();
        assert_eq!(polygons.len(), 1);
        assert_abs_diff_eq!(polygon_area(&polygons[0]), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn weaving_paths_give_every_region_ccw() {
        let straight = [p(0.0, 0.0), p(6.0, 0.0)];
        let wave = [
            p(0.0, -1.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(3.0, -1.0),
            p(4.0, -1.0),
            p(5.0, 1.0),
            p(6.0, 1.0),
        ];
        let polygons = FindPolygons::new(&straight, &wave).execute();
        assert_eq!(polygons.len(), 2);
        for polygon in &polygons {
            assert!(polygon_area(polygon) > 0.0);
        }
        // Hump above the axis between x = 0.5 and x = 2.5, then the dip below.
        assert_abs_diff_eq!(polygon_area(&polygons[0]), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(polygon_area(&polygons[1]), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn region_wrapping_its_start_vertex_is_ccw() {
        // The paths touch at (0, 0) and (-2, 0); path `a` leaves the start
        // heading away from the region and loops back around it.
        let a = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 2.0), p(-2.0, 2.0), p(-2.0, 0.0)];
        let b = [p(0.0, 0.0), p(-1.0, -0.5), p(-2.0, 0.0)];
        let polygons = FindPolygons::new(&a, &b).execute();
        assert_eq!(polygons.len(), 1);
        assert_abs_diff_eq!(polygon_area(&polygons[0]), 6.5, epsilon = 1e-12);

        let area = crate::operations::query::EnclosedArea::new(&a, &b)
            .execute()
            .unwrap_or(f64::NAN);
        assert_abs_diff_eq!(area, 6.5, epsilon = 1e-12);
    }
}
