//! Crate-wide error type

/// Errors raised while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A particle was constructed with a radius, mass, position or velocity
    /// that would poison the collision math.
    #[error("invalid particle {field}: {value}")]
    InvalidParticle { field: &'static str, value: f64 },

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The particle array does not carry one king per configured player.
    #[error("expected {expected} distinguished particles, found {found}")]
    PlayerMismatch { expected: usize, found: usize },

    /// Rejection sampling could not find a free spot for a particle.
    #[error("failed to place particle {index} after {attempts} attempts")]
    Placement { index: usize, attempts: usize },

    /// The queue ran dry while the tick chain should still be alive.
    #[error("event queue drained at t={time} before time limit {limit}")]
    QueueDrained { time: f64, limit: f64 },

    /// Writing a frame or reading a settings file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings or frame JSON could not be read or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
