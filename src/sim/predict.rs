//! Collision prediction
//!
//! For one particle, schedule every collision it could be involved in next:
//! against each other particle and against both wall pairs. Predictions past
//! the time limit are dropped.

use super::event::Event;
use super::particle::Particle;
use super::queue::EventQueue;

#[derive(Debug, Clone, Copy)]
pub struct CollisionPredictor {
    time_limit: f64,
}

impl CollisionPredictor {
    pub fn new(time_limit: f64) -> Self {
        Self { time_limit }
    }

    #[inline]
    pub fn time_limit(&self) -> f64 {
        self.time_limit
    }

    /// Absolute event time for a relative `dt`, if it falls within the limit.
    ///
    /// A negative `dt` (already overlapping a wall or another particle) is
    /// scheduled at `now` so event times never run backwards.
    #[inline]
    fn schedule_time(&self, now: f64, dt: f64) -> Option<f64> {
        let t = now + dt.max(0.0);
        (t <= self.time_limit).then_some(t)
    }

    /// Queue the next possible collisions of particle `a`. Returns the number
    /// of events inserted.
    pub fn predict(&self, now: f64, particles: &[Particle], a: usize, queue: &mut EventQueue) -> usize {
        let Some(pa) = particles.get(a) else {
            return 0;
        };
        let mut scheduled = 0;

        for (b, pb) in particles.iter().enumerate() {
            if let Some(t) = self.schedule_time(now, pa.time_to_hit(pb)) {
                queue.insert(Event::pairwise(t, particles, a, b));
                scheduled += 1;
            }
        }

        if let Some(t) = self.schedule_time(now, pa.time_to_hit_vertical_wall()) {
            queue.insert(Event::vertical_wall(t, particles, a));
            scheduled += 1;
        }
        if let Some(t) = self.schedule_time(now, pa.time_to_hit_horizontal_wall()) {
            queue.insert(Event::horizontal_wall(t, particles, a));
            scheduled += 1;
        }

        scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Color, EventKind};
    use glam::DVec2;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), 0.05, 0.5, Color::BLUE).unwrap()
    }

    #[test]
    fn test_predicts_pair_and_walls() {
        let particles = vec![particle(0.25, 0.5, 0.1, 0.0), particle(0.75, 0.5, -0.1, 0.0)];
        let mut queue = EventQueue::new();
        let predictor = CollisionPredictor::new(100.0);

        let n = predictor.predict(0.0, &particles, 0, &mut queue);
        // one pairwise, one vertical wall; vy == 0 so no horizontal wall
        assert_eq!(n, 2);

        let first = queue.pop_min().unwrap();
        assert!((first.time - 2.0).abs() < 1e-12);
        assert!(matches!(first.kind, EventKind::Pairwise(a, b) if a.index == 0 && b.index == 1));

        let second = queue.pop_min().unwrap();
        assert!((second.time - 7.0).abs() < 1e-12);
        assert!(matches!(second.kind, EventKind::VerticalWall(a) if a.index == 0));
    }

    #[test]
    fn test_respects_time_limit() {
        let particles = vec![particle(0.25, 0.5, 0.1, 0.0), particle(0.75, 0.5, -0.1, 0.0)];
        let mut queue = EventQueue::new();

        let n = CollisionPredictor::new(1.0).predict(0.0, &particles, 0, &mut queue);
        assert_eq!(n, 0);
        assert!(queue.is_empty());

        // Relative to the current time
        let n = CollisionPredictor::new(12.5).predict(10.0, &particles, 0, &mut queue);
        assert_eq!(n, 1);
        assert!((queue.peek_time().unwrap() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_penetration_scheduled_now() {
        // Edge already past x = 0 and still heading into the wall
        let particles = vec![particle(0.04, 0.5, -0.1, 0.0)];
        let mut queue = EventQueue::new();
        CollisionPredictor::new(10.0).predict(3.0, &particles, 0, &mut queue);
        assert_eq!(queue.peek_time(), Some(3.0));
    }

    #[test]
    fn test_missing_particle_is_noop() {
        let mut queue = EventQueue::new();
        assert_eq!(CollisionPredictor::new(10.0).predict(0.0, &[], 3, &mut queue), 0);
    }
}
