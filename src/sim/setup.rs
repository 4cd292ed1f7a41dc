//! Initial particle layouts
//!
//! Array order is fixed: regular particles, then anchors, then one king per
//! player. The takeover tracker relies on kings appearing in player order.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::Color;
use super::particle::Particle;
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::settings::{Preset, Settings};

/// Give up placing a particle after this many overlapping draws
const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// King seats: arena corner (or edge midpoint) and heading into the arena
const KING_SEATS: [(DVec2, DVec2); MAX_PLAYERS] = [
    (DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)),
    (DVec2::new(1.0, 1.0), DVec2::new(-1.0, -1.0)),
    (DVec2::new(1.0, 0.0), DVec2::new(-1.0, 1.0)),
    (DVec2::new(0.0, 1.0), DVec2::new(1.0, -1.0)),
    (DVec2::new(0.5, 0.0), DVec2::new(0.0, 1.0)),
    (DVec2::new(0.5, 1.0), DVec2::new(0.0, -1.0)),
    (DVec2::new(0.0, 0.5), DVec2::new(1.0, 0.0)),
    (DVec2::new(1.0, 0.5), DVec2::new(-1.0, 0.0)),
];

/// Supplies the particle array a run starts from
pub trait Initializer {
    fn populate(&mut self, settings: &Settings) -> Result<Vec<Particle>>;
}

/// Pick the layout matching the settings' preset
pub fn initializer_for(settings: &Settings) -> Box<dyn Initializer> {
    match settings.preset {
        Preset::Duel => Box::new(DuelInitializer),
        Preset::Skirmish | Preset::Melee => Box::new(ScatterInitializer::from_settings(settings)),
    }
}

/// Random non-overlapping placement with kings seated at the corners
#[derive(Debug, Clone)]
pub struct ScatterInitializer {
    seed: u64,
    rng: Pcg32,
}

impl ScatterInitializer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Use the configured seed, or draw one from the OS
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("Scatter seed: {}", seed);
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn random_velocity(&mut self) -> DVec2 {
        DVec2::new(
            self.rng.random_range(-0.5..0.5) * PARTICLE_SPEED,
            self.rng.random_range(-0.5..0.5) * PARTICLE_SPEED,
        )
    }

    /// Draw a centre in [r, 1 - r]² that does not overlap `placed`
    fn free_spot(&mut self, index: usize, radius: f64, placed: &[Particle]) -> Result<DVec2> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = DVec2::new(
                self.rng.random_range(radius..1.0 - radius),
                self.rng.random_range(radius..1.0 - radius),
            );
            let overlaps = placed
                .iter()
                .any(|p| p.pos.distance(pos) < p.radius() + radius);
            if !overlaps {
                return Ok(pos);
            }
        }
        Err(SimError::Placement {
            index,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }
}

fn seat_kings(players: usize) -> Result<Vec<Particle>> {
    KING_SEATS
        .iter()
        .take(players)
        .enumerate()
        .map(|(player, &(corner, heading))| {
            let pos = DVec2::splat(KING_RADIUS) + corner * (1.0 - 2.0 * KING_RADIUS);
            Particle::king(pos, heading * KING_SPEED, KING_RADIUS, KING_MASS, Color::player(player))
        })
        .collect()
}

impl Initializer for ScatterInitializer {
    fn populate(&mut self, settings: &Settings) -> Result<Vec<Particle>> {
        let players = settings.players;
        if players > KING_SEATS.len() {
            return Err(SimError::InvalidSettings(format!(
                "no seat for {} players",
                players
            )));
        }

        let kings = seat_kings(players)?;
        let anchors = settings.anchor_count();
        let mut placed: Vec<Particle> = kings.clone();
        let mut particles = Vec::with_capacity(settings.particle_count + anchors + players);

        for i in 0..settings.particle_count + anchors {
            let pos = self.free_spot(i, PARTICLE_RADIUS, &placed)?;
            let particle = if i < settings.particle_count {
                let color = Color::player(i % players.max(1));
                let vel = self.random_velocity();
                Particle::new(pos, vel, PARTICLE_RADIUS, PARTICLE_MASS, color)?
            } else {
                Particle::new(pos, DVec2::ZERO, PARTICLE_RADIUS, ANCHOR_MASS, settings.neutral_color)?
            };
            placed.push(particle.clone());
            particles.push(particle);
        }

        particles.extend(kings);
        log::debug!(
            "Placed {} regular, {} anchors, {} kings",
            settings.particle_count,
            anchors,
            players
        );
        Ok(particles)
    }
}

/// Two equal particles on a head-on course
#[derive(Debug, Clone, Copy, Default)]
pub struct DuelInitializer;

impl Initializer for DuelInitializer {
    fn populate(&mut self, _settings: &Settings) -> Result<Vec<Particle>> {
        Ok(vec![
            Particle::new(DVec2::new(0.25, 0.5), DVec2::new(0.1, 0.0), 0.05, 0.5, Color::BLUE)?,
            Particle::new(DVec2::new(0.75, 0.5), DVec2::new(-0.1, 0.0), 0.05, 0.5, Color::RED)?,
        ])
    }
}
