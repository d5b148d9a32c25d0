//! Transient Effects
//!
//! Short-lived particle bursts played when a can is opened. Pure state;
//! presentation draws the particles and reads the fading opacity.

use glam::Vec3;

use crate::math::hash_scatter;

const BURST_COUNT: usize = 18;
const BURST_LIFE: f32 = 0.6;
const BURST_GRAVITY: f32 = 0.6;

/// One spray particle.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// An upward-biased spray of particles at the open point.
#[derive(Debug)]
pub struct OpenBurst {
    pub origin: Vec3,
    pub particles: Vec<Particle>,
    life: f32,
}

impl OpenBurst {
    /// Fades out linearly over the burst's lifetime.
    pub fn opacity(&self) -> f32 {
        (self.life / BURST_LIFE).max(0.0)
    }
}

/// Owns all live bursts.
#[derive(Debug, Default)]
pub struct EffectSystem {
    bursts: Vec<OpenBurst>,
    seed: f32,
}

impl EffectSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_open_burst(&mut self, origin: Vec3) {
        let mut particles = Vec::with_capacity(BURST_COUNT);
        for i in 0..BURST_COUNT {
            let base = self.seed + i as f32;
            particles.push(Particle {
                position: Vec3::ZERO,
                velocity: Vec3::new(
                    hash_scatter(base) * 0.25,
                    0.35 + (hash_scatter(base + 7.13) + 0.5) * 0.2,
                    hash_scatter(base + 13.57) * 0.25,
                ),
            });
        }
        self.seed += BURST_COUNT as f32;
        self.bursts.push(OpenBurst {
            origin,
            particles,
            life: BURST_LIFE,
        });
    }

    pub fn update(&mut self, dt: f32) {
        for burst in &mut self.bursts {
            burst.life -= dt;
            for p in &mut burst.particles {
                p.position += p.velocity * dt;
                p.velocity.y -= BURST_GRAVITY * dt;
            }
        }
        self.bursts.retain(|b| b.life > 0.0);
    }

    pub fn bursts(&self) -> &[OpenBurst] {
        &self.bursts
    }
}
