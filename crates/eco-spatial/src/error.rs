//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `eco-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("world bounds must have finite positive extent")]
    DegenerateBounds,

    #[error("obstacle {index} has no area")]
    DegenerateObstacle { index: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
