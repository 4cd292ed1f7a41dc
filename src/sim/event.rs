//! Scheduled events
//!
//! An event records the collision counts of its participants at the moment it
//! was predicted. If either participant has collided since, the prediction no
//! longer holds and the event is stale.

use super::particle::Particle;

/// A particle index plus its collision count when the event was created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    pub index: usize,
    pub count: u32,
}

impl Participant {
    pub fn snapshot(particles: &[Particle], index: usize) -> Self {
        Self {
            index,
            count: particles[index].count(),
        }
    }

    #[inline]
    pub fn is_current(&self, particles: &[Particle]) -> bool {
        particles
            .get(self.index)
            .is_some_and(|p| p.count() == self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Redraw
    Tick,
    /// Particle reaches x = 0 or x = 1
    VerticalWall(Participant),
    /// Particle reaches y = 0 or y = 1
    HorizontalWall(Participant),
    /// Two particles touch
    Pairwise(Participant, Participant),
}

impl EventKind {
    /// Particle indices whose future changes once this event is processed
    pub fn participants(&self) -> impl Iterator<Item = usize> {
        let (a, b) = match *self {
            EventKind::Tick => (None, None),
            EventKind::VerticalWall(a) | EventKind::HorizontalWall(a) => (Some(a.index), None),
            EventKind::Pairwise(a, b) => (Some(a.index), Some(b.index)),
        };
        a.into_iter().chain(b)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Tick => "tick",
            EventKind::VerticalWall(_) => "vertical-wall",
            EventKind::HorizontalWall(_) => "horizontal-wall",
            EventKind::Pairwise(..) => "pairwise",
        }
    }
}

/// An immutable scheduled occurrence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
}

impl Event {
    pub fn tick(time: f64) -> Self {
        Self {
            time,
            kind: EventKind::Tick,
        }
    }

    pub fn vertical_wall(time: f64, particles: &[Particle], a: usize) -> Self {
        Self {
            time,
            kind: EventKind::VerticalWall(Participant::snapshot(particles, a)),
        }
    }

    pub fn horizontal_wall(time: f64, particles: &[Particle], b: usize) -> Self {
        Self {
            time,
            kind: EventKind::HorizontalWall(Participant::snapshot(particles, b)),
        }
    }

    pub fn pairwise(time: f64, particles: &[Particle], a: usize, b: usize) -> Self {
        Self {
            time,
            kind: EventKind::Pairwise(
                Participant::snapshot(particles, a),
                Participant::snapshot(particles, b),
            ),
        }
    }

    /// Has no participant collided since this event was created?
    pub fn is_valid(&self, particles: &[Particle]) -> bool {
        match self.kind {
            EventKind::Tick => true,
            EventKind::VerticalWall(a) | EventKind::HorizontalWall(a) => a.is_current(particles),
            EventKind::Pairwise(a, b) => a.is_current(particles) && b.is_current(particles),
        }
    }
}
