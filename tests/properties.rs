//! Property-based tests for the collision physics and the event loop.
//!
//! Uses proptest to generate particle pairs and small seeded populations,
//! then checks invariants that must hold for every run.

use glam::DVec2;
use infection_arena::renderer::NullRenderer;
use infection_arena::sim::*;
use infection_arena::{Preset, Settings};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_velocity() -> impl Strategy<Value = DVec2> {
    (-0.5..0.5f64, -0.5..0.5f64).prop_map(|(x, y)| DVec2::new(x, y))
}

/// Two particles whose surfaces are at least 0.01 apart
fn arb_separated_pair() -> impl Strategy<Value = (Particle, Particle)> {
    (
        0.1..0.9f64,
        0.1..0.9f64,
        0.0..std::f64::consts::TAU,
        0.0..0.5f64,
        0.005..0.05f64,
        0.005..0.05f64,
        arb_velocity(),
        arb_velocity(),
    )
        .prop_map(|(x, y, angle, gap, ra, rb, va, vb)| {
            let a = Particle::new(DVec2::new(x, y), va, ra, 0.5, Color::BLUE).unwrap();
            let offset = DVec2::from_angle(angle) * (ra + rb + 0.01 + gap);
            let b = Particle::new(a.pos + offset, vb, rb, 0.5, Color::RED).unwrap();
            (a, b)
        })
}

/// Seeded pure-physics population (no players, no anchors)
fn physics_settings(seed: u64, count: usize) -> Settings {
    let mut s = Settings::from_preset(Preset::Skirmish);
    s.players = 0;
    s.particle_count = count;
    s.anchor_ratio = 0.0;
    s.seed = Some(seed);
    s.time_limit = 300.0;
    s
}

fn physics_engine(seed: u64, count: usize) -> SimulationEngine {
    let s = physics_settings(seed, count);
    let particles = ScatterInitializer::new(seed).populate(&s).unwrap();
    SimulationEngine::new(particles, EngineConfig::from_settings(&s)).unwrap()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn time_to_hit_is_symmetric(pair in arb_separated_pair()) {
        let (a, b) = pair;
        let ab = a.time_to_hit(&b);
        let ba = b.time_to_hit(&a);
        prop_assert!(ab == ba || (ab.is_infinite() && ba.is_infinite()));
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn predicted_contact_is_touching(pair in arb_separated_pair()) {
        let (mut a, mut b) = pair;
        let t = a.time_to_hit(&b);
        prop_assume!(t.is_finite());

        a.advance(t);
        b.advance(t);
        let gap = a.pos.distance(b.pos) - (a.radius() + b.radius());
        prop_assert!(gap.abs() < 1e-9, "gap {} at t={}", gap, t);
    }

    #[test]
    fn collision_conserves_momentum_and_energy(pair in arb_separated_pair()) {
        let (mut a, mut b) = pair;
        let t = a.time_to_hit(&b);
        prop_assume!(t.is_finite());

        a.advance(t);
        b.advance(t);
        let momentum = a.vel * a.mass() + b.vel * b.mass();
        let energy = a.kinetic_energy() + b.kinetic_energy();

        a.collide(&mut b);
        let after = a.vel * a.mass() + b.vel * b.mass();
        prop_assert!((after - momentum).length() < 1e-12);
        prop_assert!((a.kinetic_energy() + b.kinetic_energy() - energy).abs() < 1e-12);
        prop_assert_eq!(a.count(), 1);
        prop_assert_eq!(b.count(), 1);
        // Moving apart afterwards
        prop_assert!((b.vel - a.vel).dot(b.pos - a.pos) >= -1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn physics_runs_stay_in_bounds_and_conserve_energy(seed in 0..1000u64, count in 2..25usize) {
        let mut engine = physics_engine(seed, count);
        let energy = engine.total_kinetic_energy();
        let mut renderer = NullRenderer;
        let mut last_time = 0.0;

        loop {
            match engine.step(&mut renderer).unwrap() {
                StepOutcome::Drained => break,
                StepOutcome::Stale => {}
                StepOutcome::Processed(_) => {
                    prop_assert!(engine.time() >= last_time);
                    prop_assert!(engine.time() <= engine.time_limit());
                    last_time = engine.time();
                }
            }
        }

        for p in engine.particles() {
            let (lo, hi) = (p.radius() - 1e-9, 1.0 - p.radius() + 1e-9);
            prop_assert!(p.pos.x >= lo && p.pos.x <= hi, "x {} out of bounds", p.pos.x);
            prop_assert!(p.pos.y >= lo && p.pos.y <= hi, "y {} out of bounds", p.pos.y);
        }
        let drift = (engine.total_kinetic_energy() - energy).abs();
        prop_assert!(drift <= 1e-9 * energy.max(1e-12), "energy drift {}", drift);
    }

    #[test]
    fn seeded_runs_are_deterministic(seed in 0..1000u64) {
        let mut a = physics_engine(seed, 15);
        let mut b = physics_engine(seed, 15);
        a.run(&mut NullRenderer, &CancelToken::new()).unwrap();
        b.run(&mut NullRenderer, &CancelToken::new()).unwrap();

        prop_assert_eq!(a.stats(), b.stats());
        for (p, q) in a.particles().iter().zip(b.particles()) {
            prop_assert_eq!(p.pos, q.pos);
            prop_assert_eq!(p.vel, q.vel);
        }
    }
}
