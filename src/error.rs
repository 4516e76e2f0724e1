use thiserror::Error;

/// Top-level error type for the foilgeo kernel.
#[derive(Debug, Error)]
pub enum FoilgeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric value construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no enclosed region between the paths")]
    NoEnclosedRegion,
}

/// Convenience type alias for results using [`FoilgeoError`].
pub type Result<T> = std::result::Result<T, FoilgeoError>;
