//! Event-driven simulation module
//!
//! Time only advances to the instant of the next event. This module must stay
//! deterministic:
//! - Events with equal times pop in insertion order
//! - Seeded RNG only (see `setup`)
//! - Stable iteration order (particle index)
//! - No rendering or platform dependencies beyond the `Renderer` trait

pub mod census;
pub mod color;
pub mod engine;
pub mod event;
pub mod particle;
pub mod predict;
pub mod queue;
pub mod setup;
pub mod takeover;

pub use census::Census;
pub use color::Color;
pub use engine::{
    CancelToken, EngineConfig, EnginePhase, EngineStats, RunOutcome, SimulationEngine, StepOutcome,
};
pub use event::{Event, EventKind, Participant};
pub use particle::{GameRules, Particle};
pub use predict::CollisionPredictor;
pub use queue::EventQueue;
pub use setup::{DuelInitializer, Initializer, ScatterInitializer, initializer_for};
pub use takeover::{Propagation, TakeoverTracker};
