//! Particles and the pure physics between them
//!
//! The arena is the unit square. Nothing here knows about scheduling: each
//! function answers "when" or applies "what happens" for one or two particles.

use glam::DVec2;

use super::color::Color;
use crate::consts::*;
use crate::error::{Result, SimError};

/// Constants of the colour game applied after every pairwise impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRules {
    pub growth_factor: f64,
    pub radius_cap: f64,
    pub radius_reset: f64,
    /// Colour reserved for anchors
    pub neutral: Color,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            growth_factor: GROWTH_FACTOR,
            radius_cap: RADIUS_CAP,
            radius_reset: RADIUS_RESET,
            neutral: Color::NEUTRAL,
        }
    }
}

impl GameRules {
    /// Apply the game rule to a pair that has just exchanged an impulse.
    ///
    /// Priority: same colour grows both, then an anchor freezes, then the
    /// strictly larger particle converts the smaller one.
    pub fn apply(&self, a: &mut Particle, b: &mut Particle) {
        if a.color == b.color {
            a.grow(self);
            b.grow(self);
        } else if a.color == self.neutral {
            a.vel = DVec2::ZERO;
        } else if b.color == self.neutral {
            b.vel = DVec2::ZERO;
        } else if a.radius > b.radius {
            b.convert(a.color);
        } else if b.radius > a.radius {
            a.convert(b.color);
        }
    }

    /// Saturating growth law
    #[inline]
    pub fn grown_radius(&self, radius: f64) -> f64 {
        if radius <= self.radius_cap {
            radius * self.growth_factor
        } else {
            self.radius_reset
        }
    }
}

/// A disc moving in the unit square
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    radius: f64,
    mass: f64,
    pub color: Color,
    /// Player's king; cleared for good once converted
    king: bool,
    /// Bumped once per wall bounce and once per pairwise collision
    count: u32,
}

impl Particle {
    /// Create a regular particle. Radius and mass must be finite and positive.
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, mass: f64, color: Color) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidParticle {
                field: "radius",
                value: radius,
            });
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidParticle {
                field: "mass",
                value: mass,
            });
        }
        for (field, value) in [("rx", pos.x), ("ry", pos.y), ("vx", vel.x), ("vy", vel.y)] {
            if !value.is_finite() {
                return Err(SimError::InvalidParticle { field, value });
            }
        }

        Ok(Self {
            pos,
            vel,
            radius,
            mass,
            color,
            king: false,
            count: 0,
        })
    }

    /// Create a player's distinguished particle
    pub fn king(pos: DVec2, vel: DVec2, radius: f64, mass: f64, color: Color) -> Result<Self> {
        let mut particle = Self::new(pos, vel, radius, mass, color)?;
        particle.king = true;
        Ok(particle)
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.king
    }

    /// Number of collisions this particle has taken part in
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Drift in a straight line for `dt`
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Time until the surfaces of `self` and `that` touch, or infinity.
    pub fn time_to_hit(&self, that: &Particle) -> f64 {
        if std::ptr::eq(self, that) {
            return f64::INFINITY;
        }
        let dr = that.pos - self.pos;
        let dv = that.vel - self.vel;
        let dvdr = dr.dot(dv);
        if dvdr >= 0.0 {
            return f64::INFINITY;
        }
        let dvdv = dv.dot(dv);
        let drdr = dr.dot(dr);
        let sigma = self.radius + that.radius;
        let d = dvdr * dvdr - dvdv * (drdr - sigma * sigma);
        if d < 0.0 {
            return f64::INFINITY;
        }
        -(dvdr + d.sqrt()) / dvdv
    }

    /// Time until the edge reaches x = 0 or x = 1
    pub fn time_to_hit_vertical_wall(&self) -> f64 {
        time_to_wall(self.pos.x, self.vel.x, self.radius)
    }

    /// Time until the edge reaches y = 0 or y = 1
    pub fn time_to_hit_horizontal_wall(&self) -> f64 {
        time_to_wall(self.pos.y, self.vel.y, self.radius)
    }

    pub fn bounce_off_vertical_wall(&mut self) {
        self.vel.x = -self.vel.x;
        self.count += 1;
    }

    pub fn bounce_off_horizontal_wall(&mut self) {
        self.vel.y = -self.vel.y;
        self.count += 1;
    }

    /// Elastic impulse along the line of centres, without any game rule.
    ///
    /// Both particles must be in contact (centre distance equals the sum of
    /// the radii), which the event schedule guarantees.
    pub fn collide(&mut self, that: &mut Particle) {
        let dr = that.pos - self.pos;
        let dv = that.vel - self.vel;
        let dvdr = dr.dot(dv);
        let dist = self.radius + that.radius;

        let f = 2.0 * self.mass * that.mass * dvdr / ((self.mass + that.mass) * dist);
        let impulse = dr * (f / dist);

        self.vel += impulse / self.mass;
        that.vel -= impulse / that.mass;

        self.count += 1;
        that.count += 1;
    }

    /// Elastic impulse followed by the colour game rule
    pub fn bounce_off(&mut self, that: &mut Particle, rules: &GameRules) {
        self.collide(that);
        rules.apply(self, that);
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    fn grow(&mut self, rules: &GameRules) {
        self.radius = rules.grown_radius(self.radius);
    }

    /// Take on a conqueror's colour, losing king status if held
    fn convert(&mut self, color: Color) {
        self.color = color;
        self.king = false;
    }
}

#[inline]
fn time_to_wall(r: f64, v: f64, radius: f64) -> f64 {
    if v > 0.0 {
        (1.0 - r - radius) / v
    } else if v < 0.0 {
        (radius - r) / v
    } else {
        f64::INFINITY
    }
}
