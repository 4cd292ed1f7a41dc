//! Team census
//!
//! Counts particles per colour for logs and frame footers.

use std::collections::BTreeMap;
use std::fmt;

use super::color::Color;
use super::particle::Particle;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    /// Particles per colour, ordered by colour tag
    pub teams: BTreeMap<Color, usize>,
    /// Kings still standing
    pub kings: usize,
}

impl Census {
    pub fn take(particles: &[Particle]) -> Self {
        let mut census = Self::default();
        for p in particles {
            *census.teams.entry(p.color).or_insert(0) += 1;
            if p.is_king() {
                census.kings += 1;
            }
        }
        census
    }

    pub fn count(&self, color: Color) -> usize {
        self.teams.get(&color).copied().unwrap_or(0)
    }

    /// Colour with the most particles, ignoring `neutral`
    pub fn leader(&self, neutral: Color) -> Option<(Color, usize)> {
        self.teams
            .iter()
            .filter(|(c, _)| **c != neutral)
            .max_by_key(|(_, n)| **n)
            .map(|(c, n)| (*c, *n))
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (color, n) in &self.teams {
            write!(f, "{}={} ", color, n)?;
        }
        write!(f, "kings={}", self.kings)
    }
}
