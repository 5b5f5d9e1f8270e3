//! Geometry error type.

use thiserror::Error;

/// Malformed coordinates or geometries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("coordinate has {got} components; this network uses {expected}")]
    Dimension { expected: usize, got: usize },

    #[error("coordinate component {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("line geometry needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
