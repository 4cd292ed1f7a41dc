//! Event-driven simulation loop
//!
//! The engine owns the clock, the particles and the queue. Each step pops the
//! earliest event, throws it away if a participant has collided since it was
//! predicted, otherwise drifts every particle to the event time, applies the
//! collision (or draws a frame) and re-predicts for the participants.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::census::Census;
use super::event::{Event, EventKind};
use super::particle::{GameRules, Particle};
use super::predict::CollisionPredictor;
use super::queue::EventQueue;
use super::takeover::TakeoverTracker;
use crate::error::{Result, SimError};
use crate::renderer::Renderer;
use crate::settings::Settings;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Queue not yet filled
    Seeding,
    Running,
    /// Queue empty; terminal
    Drained,
}

/// What a single `step` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Processed(EventKind),
    /// Popped event was out of date and dropped
    Stale,
    Drained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Drained,
    /// Stopped by a `CancelToken`; the engine can be run again to resume
    Cancelled,
}

/// Shared flag checked once per loop iteration
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Valid events handled, ticks included
    pub processed: u64,
    pub stale: u64,
    pub pair_collisions: u64,
    pub wall_bounces: u64,
    pub frames: u64,
    pub propagations: u64,
}

/// Clock and game parameters for one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// 0 turns off growth, anchors, takeover and propagation
    pub players: usize,
    pub rules: GameRules,
    pub tick_period: f64,
    pub time_limit: f64,
    pub frame_millis: u64,
}

impl EngineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            players: settings.players,
            rules: settings.game_rules().unwrap_or_default(),
            tick_period: settings.tick_period(),
            time_limit: settings.time_limit,
            frame_millis: settings.frame_millis,
        }
    }
}

pub struct SimulationEngine {
    time: f64,
    particles: Vec<Particle>,
    queue: EventQueue,
    predictor: CollisionPredictor,
    tick_period: f64,
    frame_millis: u64,
    rules: Option<GameRules>,
    takeover: TakeoverTracker,
    phase: EnginePhase,
    stats: EngineStats,
}

impl SimulationEngine {
    /// Build an engine over `particles`. The array must hold exactly one king
    /// per player.
    pub fn new(particles: Vec<Particle>, config: EngineConfig) -> Result<Self> {
        if !config.tick_period.is_finite() || config.tick_period <= 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "tick period must be finite and > 0, got {}",
                config.tick_period
            )));
        }
        if !config.time_limit.is_finite() || config.time_limit < 0.0 {
            return Err(SimError::InvalidSettings(format!(
                "time limit must be finite and >= 0, got {}",
                config.time_limit
            )));
        }
        let takeover = TakeoverTracker::new(&particles, config.players)?;

        Ok(Self {
            time: 0.0,
            particles,
            queue: EventQueue::new(),
            predictor: CollisionPredictor::new(config.time_limit),
            tick_period: config.tick_period,
            frame_millis: config.frame_millis,
            rules: (config.players > 0).then_some(config.rules),
            takeover,
            phase: EnginePhase::Seeding,
            stats: EngineStats::default(),
        })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_limit(&self) -> f64 {
        self.predictor.time_limit()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn takeover(&self) -> &TakeoverTracker {
        &self.takeover
    }

    pub fn census(&self) -> Census {
        Census::take(&self.particles)
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Predict every particle and queue the first tick. No-op after seeding.
    pub fn seed(&mut self) {
        if self.phase != EnginePhase::Seeding {
            return;
        }
        for i in 0..self.particles.len() {
            self.predictor
                .predict(self.time, &self.particles, i, &mut self.queue);
        }
        self.queue.insert(Event::tick(self.time));
        self.phase = EnginePhase::Running;

        log::info!(
            "Seeded {} events for {} particles ({} players, limit {})",
            self.queue.len(),
            self.particles.len(),
            self.takeover.players(),
            self.time_limit()
        );
    }

    /// Process one queued event
    pub fn step(&mut self, renderer: &mut dyn Renderer) -> Result<StepOutcome> {
        match self.phase {
            EnginePhase::Seeding => self.seed(),
            EnginePhase::Running => {}
            EnginePhase::Drained => return Ok(StepOutcome::Drained),
        }

        if self.queue.is_empty() {
            return self.drain();
        }

        let fired = self.takeover.check(&mut self.particles);
        self.stats.propagations += fired.len() as u64;

        let Some(event) = self.queue.pop_min() else {
            return self.drain();
        };
        if !event.is_valid(&self.particles) {
            self.stats.stale += 1;
            log::trace!("Stale {} event at t={}", event.kind.label(), event.time);
            return Ok(StepOutcome::Stale);
        }

        let dt = event.time - self.time;
        for p in &mut self.particles {
            p.advance(dt);
        }
        self.time = event.time;

        match event.kind {
            EventKind::Pairwise(a, b) => {
                if let Some((pa, pb)) = pair_mut(&mut self.particles, a.index, b.index) {
                    match &self.rules {
                        Some(rules) => pa.bounce_off(pb, rules),
                        None => pa.collide(pb),
                    }
                    self.stats.pair_collisions += 1;
                }
            }
            EventKind::VerticalWall(a) => {
                self.particles[a.index].bounce_off_vertical_wall();
                self.stats.wall_bounces += 1;
            }
            EventKind::HorizontalWall(b) => {
                self.particles[b.index].bounce_off_horizontal_wall();
                self.stats.wall_bounces += 1;
            }
            EventKind::Tick => self.redraw(renderer)?,
        }

        for index in event.kind.participants() {
            self.predictor
                .predict(self.time, &self.particles, index, &mut self.queue);
        }
        self.stats.processed += 1;

        Ok(StepOutcome::Processed(event.kind))
    }

    /// Step until the queue drains or `cancel` is raised
    pub fn run(&mut self, renderer: &mut dyn Renderer, cancel: &CancelToken) -> Result<RunOutcome> {
        loop {
            if cancel.is_cancelled() {
                log::warn!(
                    "Run cancelled at t={:.3} with {} events queued",
                    self.time,
                    self.queue.len()
                );
                return Ok(RunOutcome::Cancelled);
            }
            if self.step(renderer)? == StepOutcome::Drained {
                return Ok(RunOutcome::Drained);
            }
        }
    }

    fn redraw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        // Re-arm first so a failed frame never ends the tick chain
        if self.time < self.time_limit() {
            self.queue.insert(Event::tick(self.time + self.tick_period));
        }

        renderer.draw(&self.particles)?;
        renderer.present(self.frame_millis)?;
        self.stats.frames += 1;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Frame {} t={:.3} queue={} {}",
                self.stats.frames,
                self.time,
                self.queue.len(),
                self.census()
            );
        }
        Ok(())
    }

    fn drain(&mut self) -> Result<StepOutcome> {
        self.phase = EnginePhase::Drained;
        if self.time < self.time_limit() {
            return Err(SimError::QueueDrained {
                time: self.time,
                limit: self.time_limit(),
            });
        }

        let s = &self.stats;
        log::info!(
            "Drained at t={:.3}: {} events ({} stale), {} pair collisions, {} wall bounces, {} frames, {} takeovers",
            self.time,
            s.processed,
            s.stale,
            s.pair_collisions,
            s.wall_bounces,
            s.frames,
            s.propagations
        );
        log::info!("Final census: {}", self.census());
        Ok(StepOutcome::Drained)
    }
}

/// Two distinct mutable particles, in argument order
fn pair_mut(particles: &mut [Particle], a: usize, b: usize) -> Option<(&mut Particle, &mut Particle)> {
    if a == b || a >= particles.len() || b >= particles.len() {
        return None;
    }
    if a < b {
        let (left, right) = particles.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = particles.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
