//! Particle Bursts
//!
//! Short-lived square sparks. Velocities are in units per 60 Hz frame so a
//! burst looks the same at any frame rate; `update` scales by `dt * 60`.

use serde::{Serialize, Deserialize};

use crate::config::ParticleConfig;
use crate::core::rng::Rng;
use crate::host::Surface;

/// Side of the square drawn for each particle.
pub const PARTICLE_SIZE: f32 = 2.0;

/// One spark.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Position
    pub x: f32,
    /// Position
    pub y: f32,
    /// Velocity per 60 Hz frame
    pub vx: f32,
    /// Velocity per 60 Hz frame
    pub vy: f32,
    /// Remaining life in seconds; dead at or below zero
    pub life: f32,
}

impl Particle {
    /// True while life remains.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Unordered particle list.
#[derive(Clone, Debug, Default)]
pub struct Particles {
    list: Vec<Particle>,
    config: ParticleConfig,
}

impl Particles {
    /// Empty system with default burst parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty system with the given burst parameters.
    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            list: Vec::new(),
            config,
        }
    }

    /// Burst parameters.
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Add `count` particles at (x, y).
    ///
    /// Each particle draws vx, vy and then life from `rng`, in that order.
    pub fn spawn(&mut self, rng: &mut Rng, x: f32, y: f32, count: usize) {
        let speed = self.config.speed;
        self.list.reserve(count);
        for _ in 0..count {
            let vx = rng.range_f32(-speed, speed);
            let vy = rng.range_f32(-speed, speed);
            let life = rng.range_f32(self.config.life_min, self.config.life_max);
            self.list.push(Particle { x, y, vx, vy, life });
        }
    }

    /// Advance every particle by `dt` seconds. Dead particles stay until
    /// [`Particles::prune`].
    pub fn update(&mut self, dt: f32) {
        let frames = dt * 60.0;
        for p in &mut self.list {
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.life -= dt;
        }
    }

    /// Drop dead particles, keeping the order of the rest.
    pub fn prune(&mut self) {
        self.list.retain(Particle::is_alive);
    }

    /// Draw live particles with alpha = life, then restore alpha to 1.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in self.list.iter().filter(|p| p.is_alive()) {
            surface.set_alpha(p.life.max(0.0));
            surface.fill_rect(p.x, p.y, PARTICLE_SIZE, PARTICLE_SIZE);
        }
        surface.set_alpha(1.0);
    }

    /// Particles held, dead ones included.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// True if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Iterate held particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.list.iter()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
