use rand::Rng;

use crate::config::CELL_PIXELS;
use crate::snake::Position;

const MAX_SPEED: f32 = 1.5;
const MIN_RADIUS: f32 = 1.0;
const MAX_RADIUS: f32 = 4.0;
const MIN_LIFE: f32 = 10.0;
const MAX_LIFE: f32 = 30.0;
const OPACITY_DECAY: f32 = 0.02;

/// What a particle burst celebrates; the renderer maps this to a theme color.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParticleKind {
    Food,
    Bonus,
    LevelUp,
    Crash,
}

/// One cosmetic particle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
    pub kind: ParticleKind,
    pub opacity: f32,
    pub life: f32,
}

impl Particle {
    /// Grid cell the particle currently sits over, if any.
    #[must_use]
    pub fn cell(&self) -> Option<Position> {
        if self.x < 0.0 || self.y < 0.0 {
            return None;
        }

        Some(Position::new(
            (self.x / CELL_PIXELS) as i32,
            (self.y / CELL_PIXELS) as i32,
        ))
    }

    fn is_alive(&self) -> bool {
        self.life > 0.0 && self.opacity > 0.0
    }
}

/// Owns all live particles. Particles never interact.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `count` particles at the pixel center of `origin`.
    pub fn emit<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Position,
        kind: ParticleKind,
        count: usize,
    ) {
        let center_x = origin.x as f32 * CELL_PIXELS + CELL_PIXELS / 2.0;
        let center_y = origin.y as f32 * CELL_PIXELS + CELL_PIXELS / 2.0;

        self.particles.extend((0..count).map(|_| Particle {
            x: center_x,
            y: center_y,
            vx: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            vy: rng.gen_range(-MAX_SPEED..MAX_SPEED),
            radius: rng.gen_range(MIN_RADIUS..MAX_RADIUS),
            kind,
            opacity: 1.0,
            life: rng.gen_range(MIN_LIFE..MAX_LIFE),
        }));
    }

    /// Integrates one step and drops particles that faded out or expired.
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.opacity -= OPACITY_DECAY;
            particle.life -= 1.0;
        }

        self.particles.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{MAX_LIFE, ParticleKind, ParticleSystem};
    use crate::snake::Position;

    #[test]
    fn emit_places_particles_at_cell_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut system = ParticleSystem::new();

        system.emit(&mut rng, Position::new(2, 3), ParticleKind::Food, 15);

        assert_eq!(system.len(), 15);
        for particle in system.as_slice() {
            assert_eq!((particle.x, particle.y), (50.0, 70.0));
            assert_eq!(particle.opacity, 1.0);
            assert!((1.0..4.0).contains(&particle.radius));
            assert!((-1.5..1.5).contains(&particle.vx));
            assert_eq!(particle.cell(), Some(Position::new(2, 3)));
        }
    }

    #[test]
    fn advance_moves_and_fades() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, Position::new(5, 5), ParticleKind::Crash, 1);
        let before = system.as_slice()[0];

        system.advance();

        let after = system.as_slice()[0];
        assert_eq!(after.x, before.x + before.vx);
        assert_eq!(after.y, before.y + before.vy);
        assert!((after.opacity - 0.98).abs() < 1e-6);
        assert_eq!(after.life, before.life - 1.0);
    }

    #[test]
    fn every_particle_expires_within_max_life() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.emit(&mut rng, Position::new(0, 0), ParticleKind::LevelUp, 30);

        for _ in 0..MAX_LIFE as usize {
            system.advance();
        }

        assert!(system.is_empty());
    }
}
