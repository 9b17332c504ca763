//! Fixed-pool particle emitter for exhaust and dust effects.
//!
//! The pool is allocated once; particles are never created or destroyed,
//! only respawned in place. A particle is dead when its lifetime is `<= 0`.

use crate::billboard::CameraBasis;
use bytemuck::{Pod, Zeroable};
use engine_core::{smoothstep, Mat44, Vec3, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// NDC depth assigned to dead particles so they sort behind every live one.
pub const DEAD_DEPTH: f32 = -1.0;

/// A single particle slot.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// RGB plus alpha; alpha fades with remaining lifetime.
    pub color: Vec4,
    /// Remaining life, `1.0` at spawn.
    pub lifetime: f32,
    pub initial_size: f32,
    pub size: f32,
    /// Sort key written by [`ParticleSystem::order_particles`].
    pub ndc_depth: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Vec4::ONE,
            lifetime: 0.0,
            initial_size: 0.0,
            size: 0.0,
            ndc_depth: DEAD_DEPTH,
        }
    }
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }
}

/// Tunables for one effect.
#[derive(Debug, Clone)]
pub struct ParticleConfig {
    /// Lifetime lost per second; lifespan is `1 / decay_rate` seconds.
    pub decay_rate: f32,
    /// Scales the random launch direction.
    pub spread_radius: f32,
    /// How much of the emitter's velocity a new particle inherits.
    pub velocity_bias: f32,
    /// Billboard size at spawn before jitter.
    pub base_size: f32,
    /// Relative size jitter at spawn, `0.25` gives `base_size * [0.75, 1.25)`.
    pub size_variance: f32,
    /// Shrink toward zero over the particle's life.
    pub shrink: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            decay_rate: 3.0,
            spread_radius: 5.0,
            velocity_bias: 1.0,
            base_size: 1.0,
            size_variance: 0.25,
            shrink: false,
        }
    }
}

impl ParticleConfig {
    /// Rocket exhaust: short-lived, shrinking puffs.
    pub fn exhaust() -> Self {
        Self {
            decay_rate: 3.0,
            spread_radius: 5.0,
            base_size: 0.15,
            shrink: true,
            ..Default::default()
        }
    }
}

/// Per-particle draw payload for an external billboard draw call.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleInstance {
    pub center: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    /// Camera right axis in world space.
    pub right: [f32; 3],
    /// Camera up axis in world space.
    pub up: [f32; 3],
}

/// Fixed-capacity pool of particles with slot reuse.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    /// Where the next search for a dead slot starts.
    last_used: usize,
    config: ParticleConfig,
    rng: StdRng,
}

impl ParticleSystem {
    /// Pool of `capacity` dead particles, randomness seeded from the OS.
    pub fn new(capacity: usize, config: ParticleConfig) -> Self {
        Self::with_rng(capacity, config, StdRng::from_entropy())
    }

    /// Same as [`ParticleSystem::new`] with a fixed seed.
    pub fn with_seed(capacity: usize, config: ParticleConfig, seed: u64) -> Self {
        Self::with_rng(capacity, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(capacity: usize, config: ParticleConfig, rng: StdRng) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            last_used: 0,
            config,
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// All slots, dead ones included, in current draw order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_alive()).count()
    }

    /// Advance the effect by `dt` seconds.
    ///
    /// Spawns `spawn_count` particles at the emitter first, then ages every
    /// live particle; those still alive move, fade and (optionally) shrink.
    pub fn update(&mut self, dt: f32, emitter_position: Vec3, emitter_velocity: Vec3, spawn_count: usize) {
        if self.particles.is_empty() {
            return;
        }

        let mut recycled = 0;
        for _ in 0..spawn_count {
            let slot = match self.find_dead() {
                Some(slot) => slot,
                None => {
                    recycled += 1;
                    self.last_used = 0;
                    0
                }
            };
            self.respawn(slot, emitter_position, emitter_velocity);
        }
        if recycled > 0 {
            log::warn!(
                "particle pool saturated: {} of {} spawns recycled slot 0 (capacity {})",
                recycled,
                spawn_count,
                self.particles.len()
            );
        }

        let decay = dt * self.config.decay_rate;
        let shrink = self.config.shrink;
        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.lifetime -= decay;
            if p.is_dead() {
                continue;
            }

            p.position += p.velocity * dt;
            p.color.w = smoothstep(0.0, 1.0, p.lifetime);
            if shrink {
                let elapsed = 1.0 - p.lifetime;
                p.size = p.initial_size * (1.0 - smoothstep(0.0, 1.0, elapsed));
            }
        }

        log::trace!("particles: {} alive of {}", self.alive_count(), self.particles.len());
    }

    /// Index of a dead slot to reuse, or 0 when every slot is alive.
    pub fn first_unused(&mut self) -> usize {
        self.find_dead().unwrap_or_else(|| {
            self.last_used = 0;
            0
        })
    }

    /// Scan `[cursor, N)` then `[0, cursor)` for a dead slot.
    fn find_dead(&mut self) -> Option<usize> {
        let cursor = self.last_used.min(self.particles.len());
        let found = (cursor..self.particles.len())
            .chain(0..cursor)
            .find(|&i| self.particles[i].is_dead());
        if let Some(i) = found {
            self.last_used = i;
        }
        found
    }

    /// Overwrite `slot` with a fresh particle launched from the emitter.
    pub fn respawn(&mut self, slot: usize, emitter_position: Vec3, emitter_velocity: Vec3) {
        let radius = self.config.spread_radius;
        let direction = Vec3::new(
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
        ) * radius;
        let strength = 0.1 + self.rng.gen::<f32>();
        let gray = 0.5 + self.rng.gen::<f32>();
        let variance = self.config.size_variance;
        let size = self.config.base_size * (1.0 + self.rng.gen_range(-variance..=variance));

        let p = &mut self.particles[slot];
        p.position = emitter_position;
        p.velocity = emitter_velocity * self.config.velocity_bias + direction * strength;
        p.color = Vec4::new(gray, gray, gray, 1.0);
        p.lifetime = 1.0;
        p.initial_size = size;
        p.size = size;
    }

    /// Snap every particle to `position` and stop it. Lifetimes are left
    /// alone, so live particles stay live.
    pub fn reset(&mut self, position: Vec3) {
        for p in &mut self.particles {
            p.position = position;
            p.velocity = Vec3::ZERO;
        }
    }

    /// Sort the pool farthest-first by NDC depth for blending, with every
    /// dead slot after every live one.
    ///
    /// Live particles get `z / w` of `proj_camera_world * (position, 1)`;
    /// dead ones get [`DEAD_DEPTH`]. A live particle inside the near plane
    /// can land below the sentinel, so liveness is compared first.
    pub fn order_particles(&mut self, proj_camera_world: &Mat44) {
        for p in &mut self.particles {
            p.ndc_depth = if p.is_alive() {
                let clip = *proj_camera_world * p.position.extend(1.0);
                clip.z / clip.w
            } else {
                DEAD_DEPTH
            };
        }
        self.particles.sort_unstable_by(|a, b| {
            a.is_dead()
                .cmp(&b.is_dead())
                .then(b.ndc_depth.total_cmp(&a.ndc_depth))
        });
    }

    /// Draw payload for every live particle, in pool order.
    pub fn instances(&self, basis: &CameraBasis) -> Vec<ParticleInstance> {
        let right = basis.right.into();
        let up = basis.up.into();
        self.particles
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| ParticleInstance {
                center: p.position.into(),
                size: p.size,
                color: p.color.into(),
                right,
                up,
            })
            .collect()
    }
}
