use crate::error::{OperationError, Result};

use super::ErrorMetric;

/// Where the fitted span sits on the outline. Selects the initial placement
/// of the two interior control points; the refinement is the same for all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FitHint {
    /// The curve departs steeply from its start, as at a leading edge.
    Leading,
    /// The curve settles into the direction of its last few stations.
    Trailing,
    /// Symmetric placement along the end tangents.
    #[default]
    Middle,
}

/// Parameters controlling the cubic fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub hint: FitHint,
    pub metric: ErrorMetric,
    /// Candidate intervals per refinement level.
    pub segments: u32,
    /// Number of refinement levels; each narrows the search by `segments`.
    pub levels: u32,
    /// Curve samples used by [`ErrorMetric::NearestSegment`].
    pub samples: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            hint: FitHint::default(),
            metric: ErrorMetric::default(),
            segments: 10,
            levels: 9,
            samples: 1000,
        }
    }
}

impl FitParams {
    #[must_use]
    pub fn with_hint(mut self, hint: FitHint) -> Self {
        self.hint = hint;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(
                OperationError::InvalidInput("segments must be at least 1".to_owned()).into(),
            );
        }
        if self.samples < 2 {
            return Err(
                OperationError::InvalidInput("samples must be at least 2".to_owned()).into(),
            );
        }
        Ok(())
    }
}
