//! Decorative particle bursts
//!
//! Particles fly in a straight line and shrink at a constant rate. They never
//! affect gameplay.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;

/// Push a burst of `count` particles at `origin`.
///
/// When the store would grow past `cap`, the oldest particles go first.
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    count: usize,
    cap: usize,
) {
    let count = count.min(cap);
    if count == 0 {
        return;
    }

    let overflow = (particles.len() + count).saturating_sub(cap);
    if overflow > 0 {
        particles.drain(..overflow);
    }

    for _ in 0..count {
        let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
        // Random sideways drift, always upward
        let vx = (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_VX;
        let vy = -rng.random::<f32>() * PARTICLE_MAX_RISE;
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(vx, vy),
            radius,
            color: PARTICLE_COLOR,
        });
    }
}

/// Advance and shrink every particle, dropping the ones that faded out
pub fn step_particles(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.radius -= PARTICLE_DECAY * dt;
    }
    particles.retain(|p| p.radius > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::new(30.0, 30.0), 5, 100);

        assert_eq!(particles.len(), 5);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(30.0, 30.0));
            assert!(p.radius >= PARTICLE_MIN_RADIUS && p.radius < PARTICLE_MAX_RADIUS);
            assert!(p.vel.x.abs() <= PARTICLE_MAX_VX);
            assert!(p.vel.y <= 0.0 && p.vel.y >= -PARTICLE_MAX_RISE);
        }
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 5, 8);
        let first_of_second = Vec2::new(1.0, 1.0);
        spawn_burst(&mut particles, &mut rng, first_of_second, 5, 8);

        assert_eq!(particles.len(), 8);
        // Oldest were evicted, the newest burst is intact
        assert_eq!(particles.iter().filter(|p| p.pos == first_of_second).count(), 5);
    }

    #[test]
    fn test_zero_cap_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, 5, 0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_step_moves_and_shrinks() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(60.0, -60.0),
            radius: 5.0,
            color: PARTICLE_COLOR,
        }];
        step_particles(&mut particles, 0.5);
        assert_eq!(particles[0].pos, Vec2::new(30.0, -30.0));
        assert!((particles[0].radius - (5.0 - PARTICLE_DECAY * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_faded_particles_removed() {
        let mut particles = vec![Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 0.05,
            color: PARTICLE_COLOR,
        }];
        step_particles(&mut particles, SIM_DT);
        assert!(particles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_particle_fades(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut particles = Vec::new();
            spawn_burst(&mut particles, &mut rng, Vec2::new(100.0, 100.0), BURST_PARTICLES, 64);

            // Largest radius fades in under PARTICLE_MAX_RADIUS / PARTICLE_DECAY seconds
            let max_steps = (PARTICLE_MAX_RADIUS / PARTICLE_DECAY / SIM_DT).ceil() as usize + 1;
            for _ in 0..max_steps {
                step_particles(&mut particles, SIM_DT);
            }
            prop_assert!(particles.is_empty());
        }
    }
}
