//! Error type shared by the simulation and imaging modules

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExoError {
    /// Cumulative density is zero (or not finite), the CDF cannot be normalized
    #[error("degenerate density profile: cumulative weight is {total}")]
    DegenerateProfile { total: f64 },

    /// Internal invariant violation: the particle arrays diverged in length
    #[error("particle state shape mismatch: {positions} positions vs {velocities} velocities")]
    ShapeMismatch { positions: usize, velocities: usize },

    #[error("invalid particle count {0}, need at least one particle")]
    InvalidParticleCount(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An imaging stage was run before the stage it depends on
    #[error("imaging pipeline out of order: {0}")]
    ImagingStage(String),

    /// An external LOS / intensity collaborator returned inconsistent output
    #[error("external model returned inconsistent output: {0}")]
    ExternalModel(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExoError>;
