//! Cubic Bézier fitting to station points.

mod fit_cubic;
mod metric;
mod params;

pub use fit_cubic::{FitCubic, FitResult};
pub use metric::ErrorMetric;
pub use params::{FitHint, FitParams};
