//! Cosmetic particles
//!
//! Particles never affect gameplay. They still draw from the simulation RNG so
//! a seeded run stays reproducible end to end.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use crate::consts::PARTICLE_DAMPING;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
}

impl Particle {
    /// Particle with a random velocity in [-4, 4) per axis and size in [2, 6)
    pub fn new(pos: Vec2, color: u32, life: u32, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 8.0,
            (rng.random::<f32>() - 0.5) * 8.0,
        );
        Self {
            pos,
            vel,
            color,
            life,
            max_life: life,
            size: rng.random::<f32>() * 4.0 + 2.0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DAMPING;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }

    /// Fade factor for rendering, 1.0 when fresh
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Burst presets emitted on combat events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBurst {
    /// Projectile struck an enemy
    Hit,
    /// Enemy destroyed
    Death,
}

impl ParticleBurst {
    pub fn count(self) -> usize {
        match self {
            ParticleBurst::Hit => 5,
            ParticleBurst::Death => 10,
        }
    }

    pub fn color(self) -> u32 {
        match self {
            ParticleBurst::Hit => 0xff0000,
            ParticleBurst::Death => 0xffaa00,
        }
    }

    pub fn life(self) -> u32 {
        match self {
            ParticleBurst::Hit => 20,
            ParticleBurst::Death => 40,
        }
    }
}

/// Push a burst of particles centered on `at`
pub fn emit_burst(particles: &mut Vec<Particle>, at: Vec2, burst: ParticleBurst, rng: &mut impl Rng) {
    particles.reserve(burst.count());
    for _ in 0..burst.count() {
        particles.push(Particle::new(at, burst.color(), burst.life(), rng));
    }
}
