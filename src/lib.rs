//! Infection Arena - event-driven particle collisions with a colour-takeover game
//!
//! Core modules:
//! - `sim`: Event-driven simulation (particles, events, queue, prediction, engine)
//! - `renderer`: Frame output at tick events (headless, ASCII, JSON lines)
//! - `settings`: Run configuration and presets
//! - `error`: Crate-wide error type

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{Preset, RendererKind, Settings};

/// Simulation constants
pub mod consts {
    /// Radius multiplier applied on a same-colour collision
    pub const GROWTH_FACTOR: f64 = 1.01;
    /// Radii above this snap back to `RADIUS_RESET` on the next same-colour hit
    pub const RADIUS_CAP: f64 = 0.02;
    pub const RADIUS_RESET: f64 = 0.019;

    /// Redraw events per unit of simulated time
    pub const REDRAW_HZ: f64 = 0.5;
    /// Default simulated time horizon
    pub const TIME_LIMIT: f64 = 10_000.0;
    /// Pacing delay handed to the renderer per frame
    pub const FRAME_MILLIS: u64 = 20;

    /// Regular particles
    pub const PARTICLE_RADIUS: f64 = 0.01;
    pub const PARTICLE_MASS: f64 = 0.5;
    /// Velocity components are drawn from ±PARTICLE_SPEED / 2
    pub const PARTICLE_SPEED: f64 = 0.01;

    /// Anchors ("black holes"), as a fraction of the regular particle count
    pub const ANCHOR_RATIO: f64 = 0.2;
    pub const ANCHOR_MASS: f64 = 50.0;

    /// Kings
    pub const KING_RADIUS: f64 = 0.02;
    pub const KING_MASS: f64 = 0.5;
    pub const KING_SPEED: f64 = 0.02;

    /// Largest supported player count
    pub const MAX_PLAYERS: usize = 8;
}
