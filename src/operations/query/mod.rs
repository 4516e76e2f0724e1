mod enclosed_area;
mod find_polygons;

pub use enclosed_area::{difference_area, EnclosedArea};
pub use find_polygons::FindPolygons;

pub use crate::math::distance_2d::{nearest_point, nearest_segment, path_length};
