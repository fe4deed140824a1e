//! Short-lived visual particles for jumps, landings and impacts.

use glam::Vec2;
use rand::Rng;

use super::Rgb;
use crate::PARTICLE_DECAY;

/// Scatter speed used when no explicit speed is given.
pub const DEFAULT_BURST_SPEED: f32 = 5.0;

/// One particle. `life` starts at 1 and fades to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Centre position.
    pub pos: Vec2,
    /// Per-frame velocity.
    pub vel: Vec2,
    /// Remaining life in `[0, 1]`; doubles as opacity.
    pub life: f32,
    /// Colour.
    pub colour: Rgb,
    /// Side length in `[2, 8)`.
    pub size: f32,
}

impl Particle {
    /// Whether the particle has faded out.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// All live particles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Emits `count` particles at `origin` scattered with `speed`.
    pub fn burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        colour: Rgb,
        count: usize,
        speed: f32,
    ) {
        self.particles.extend((0..count).map(|_| Particle {
            pos: origin,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * speed,
                (rng.gen::<f32>() - 0.5) * speed,
            ),
            life: 1.0,
            colour,
            size: rng.gen::<f32>() * 6.0 + 2.0,
        }));
    }

    /// Moves, fades and culls particles.
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| !p.is_dead());
    }

    /// Live particles.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    /// Number of live particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether there are no live particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParticleField {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_scatters_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::default();
        field.burst(&mut rng, Vec2::new(10.0, 20.0), Rgb::NEON_CYAN, 32, 10.0);
        assert_eq!(field.len(), 32);
        for p in &field {
            assert!((2.0..8.0).contains(&p.size));
            assert!(p.vel.x.abs() <= 5.0 && p.vel.y.abs() <= 5.0);
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        }
    }

    #[test]
    fn particles_die_after_fifty_frames() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::default();
        field.burst(&mut rng, Vec2::ZERO, Rgb::WHITE, 4, DEFAULT_BURST_SPEED);
        for _ in 0..45 {
            field.update();
        }
        assert_eq!(field.len(), 4);
        for _ in 0..10 {
            field.update();
        }
        assert!(field.is_empty());
    }
}
