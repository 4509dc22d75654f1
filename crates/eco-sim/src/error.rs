use eco_core::EcoError;
use eco_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid ecosystem configuration: {0}")]
    Config(#[from] EcoError),

    #[error("invalid landscape: {0}")]
    Landscape(#[from] SpatialError),

    /// Births would push the arena past the agents it can address.
    #[error("population overflow: {live} agents live, {pending} births pending")]
    PopulationOverflow {
        live:    usize,
        pending: usize,
    },
}

pub type SimResult<T> = Result<T, SimError>;
