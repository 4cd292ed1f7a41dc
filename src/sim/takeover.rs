//! Player-wide takeover
//!
//! The first time a player's king is converted, every particle still carrying
//! that player's original colour switches to the king's new colour. This
//! fires at most once per player.

use super::color::Color;
use super::particle::Particle;
use crate::error::{Result, SimError};

/// Record of one player-wide recolouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    pub player: usize,
    pub from: Color,
    pub to: Color,
    /// Particles recoloured, not counting the king itself
    pub recolored: usize,
}

#[derive(Debug, Clone)]
struct Seat {
    king: usize,
    original: Color,
    propagated: bool,
}

/// One-shot propagation flag per player, indexed by player number
#[derive(Debug, Clone, Default)]
pub struct TakeoverTracker {
    seats: Vec<Seat>,
}

impl TakeoverTracker {
    /// Player `i` is the `i`-th king in index order.
    pub fn new(particles: &[Particle], players: usize) -> Result<Self> {
        let seats: Vec<Seat> = particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_king())
            .map(|(king, p)| Seat {
                king,
                original: p.color,
                propagated: false,
            })
            .collect();

        if seats.len() != players {
            return Err(SimError::PlayerMismatch {
                expected: players,
                found: seats.len(),
            });
        }
        Ok(Self { seats })
    }

    pub fn players(&self) -> usize {
        self.seats.len()
    }

    pub fn king_index(&self, player: usize) -> Option<usize> {
        self.seats.get(player).map(|s| s.king)
    }

    pub fn original_color(&self, player: usize) -> Option<Color> {
        self.seats.get(player).map(|s| s.original)
    }

    pub fn is_propagated(&self, player: usize) -> bool {
        self.seats.get(player).is_some_and(|s| s.propagated)
    }

    /// Propagate for every player whose king has fallen since the last check.
    pub fn check(&mut self, particles: &mut [Particle]) -> Vec<Propagation> {
        let mut fired = Vec::new();

        for (player, seat) in self.seats.iter_mut().enumerate() {
            if seat.propagated || particles[seat.king].is_king() {
                continue;
            }

            let to = particles[seat.king].color;
            let mut recolored = 0;
            for p in particles.iter_mut().filter(|p| p.color == seat.original) {
                p.color = to;
                recolored += 1;
            }
            seat.propagated = true;

            log::info!(
                "Player {} king converted: {} -> {} ({} particles recoloured)",
                player,
                seat.original,
                to,
                recolored
            );
            fired.push(Propagation {
                player,
                from: seat.original,
                to,
                recolored,
            });
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameRules;
    use glam::DVec2;

    fn regular(x: f64, color: Color) -> Particle {
        Particle::new(DVec2::new(x, 0.2), DVec2::ZERO, 0.01, 0.5, color).unwrap()
    }

    fn king(x: f64, y: f64, vx: f64, radius: f64, color: Color) -> Particle {
        Particle::king(DVec2::new(x, y), DVec2::new(vx, 0.0), radius, 0.5, color).unwrap()
    }

    #[test]
    fn test_requires_one_king_per_player() {
        let particles = vec![regular(0.1, Color::BLUE), king(0.5, 0.5, 0.0, 0.02, Color::BLUE)];
        assert!(TakeoverTracker::new(&particles, 1).is_ok());
        assert!(matches!(
            TakeoverTracker::new(&particles, 2),
            Err(SimError::PlayerMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_takeover_fires_once() {
        let mut particles = vec![
            regular(0.1, Color::BLUE),
            regular(0.2, Color::BLUE),
            regular(0.3, Color::RED),
            // red attacker, larger than the blue king it is touching
            Particle::new(DVec2::new(0.46, 0.5), DVec2::new(0.1, 0.0), 0.03, 0.5, Color::RED)
                .unwrap(),
            king(0.5, 0.5, -0.1, 0.01, Color::BLUE),
            king(0.9, 0.9, 0.0, 0.02, Color::RED),
        ];
        let mut tracker = TakeoverTracker::new(&particles, 2).unwrap();
        assert_eq!(tracker.king_index(0), Some(4));
        assert_eq!(tracker.king_index(1), Some(5));
        assert!(tracker.check(&mut particles).is_empty());

        let (left, right) = particles.split_at_mut(4);
        left[3].bounce_off(&mut right[0], &GameRules::default());
        assert_eq!(particles[4].color, Color::RED);
        assert!(!particles[4].is_king());

        let fired = tracker.check(&mut particles);
        assert_eq!(
            fired,
            vec![Propagation {
                player: 0,
                from: Color::BLUE,
                to: Color::RED,
                recolored: 2
            }]
        );
        assert!(particles.iter().all(|p| p.color == Color::RED));
        assert!(tracker.is_propagated(0));
        assert!(!tracker.is_propagated(1));

        // A later blue particle is left alone: the flag is one-shot
        particles[0].color = Color::BLUE;
        assert!(tracker.check(&mut particles).is_empty());
        assert_eq!(particles[0].color, Color::BLUE);
    }

    #[test]
    fn test_no_players() {
        let mut particles = vec![regular(0.1, Color::BLUE)];
        let mut tracker = TakeoverTracker::new(&particles, 0).unwrap();
        assert_eq!(tracker.players(), 0);
        assert!(tracker.check(&mut particles).is_empty());
    }
}
