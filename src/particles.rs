#![warn(clippy::all, clippy::pedantic)]

use std::f32::consts::TAU;

use log::trace;

use crate::components::Theme;
use crate::game::{
    MAX_PARTICLES, PARTICLE_DRAG_X, PARTICLE_DRAG_Y, PARTICLE_GRAVITY, PARTICLE_LIFE_MAX,
    PARTICLE_LIFE_MIN, PARTICLE_SIZE_MAX, PARTICLE_SIZE_MIN, PARTICLE_SPEED_MAX,
    PARTICLE_SPEED_MIN,
};
use crate::rng::RandomSource;

const SPAWN_JITTER: f32 = 6.0;
const UPWARD_KICK_MIN: f32 = 10.0;
const UPWARD_KICK_MAX: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub initial_life: f32,
    pub size: f32,
    pub theme: Theme,
    pub alive: bool,
}

impl Particle {
    /// Remaining life as a fraction of the initial life.
    #[must_use]
    pub fn life_fraction(&self) -> f32 {
        if self.initial_life > 0.0 {
            (self.life / self.initial_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Size and launch speed ranges for one burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub size_min: f32,
    pub size_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for Spread {
    fn default() -> Self {
        Self {
            size_min: PARTICLE_SIZE_MIN,
            size_max: PARTICLE_SIZE_MAX,
            speed_min: PARTICLE_SPEED_MIN,
            speed_max: PARTICLE_SPEED_MAX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    free: Vec<usize>,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }
}

impl ParticlePool {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            // Reversed so the lowest index is handed out first.
            free: (0..capacity).rev().collect(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.alive)
    }

    /// Launches up to `count` particles around `(x, y)` with the default spread.
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        theme: Theme,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> usize {
        self.spawn_spread(x, y, theme, count, Spread::default(), rng)
    }

    /// Launches up to `count` particles in random directions. Returns how many fit.
    pub fn spawn_spread(
        &mut self,
        x: f32,
        y: f32,
        theme: Theme,
        count: usize,
        spread: Spread,
        rng: &mut dyn RandomSource,
    ) -> usize {
        let mut spawned = 0;

        while spawned < count {
            let Some(index) = self.free.pop() else {
                trace!("Particle pool full, dropped {} particles", count - spawned);
                break;
            };

            let angle = rng.range_f32(0.0, TAU);
            let speed = rng.range_f32(spread.speed_min, spread.speed_max);
            let px = x + rng.range_f32(-SPAWN_JITTER, SPAWN_JITTER);
            let py = y + rng.range_f32(-SPAWN_JITTER, SPAWN_JITTER);
            let vx = angle.cos() * speed;
            let vy = angle.sin() * speed - rng.range_f32(UPWARD_KICK_MIN, UPWARD_KICK_MAX);
            let life = rng.range_f32(PARTICLE_LIFE_MIN, PARTICLE_LIFE_MAX);
            let size = rng.range_f32(spread.size_min, spread.size_max);

            self.slots[index] = Particle {
                x: px,
                y: py,
                vx,
                vy,
                life,
                initial_life: life,
                size,
                theme,
                alive: true,
            };
            spawned += 1;
        }

        spawned
    }

    /// Ages every live particle and integrates gravity and drag.
    pub fn tick(&mut self, dt: f32) {
        for (index, p) in self.slots.iter_mut().enumerate() {
            if !p.alive {
                continue;
            }
            p.life -= dt;
            if p.life <= 0.0 {
                p.alive = false;
                self.free.push(index);
                continue;
            }
            p.vy += PARTICLE_GRAVITY * dt;
            p.vx *= 1.0 - PARTICLE_DRAG_X * dt;
            p.vy *= 1.0 - PARTICLE_DRAG_Y * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
        }
    }

    pub fn clear(&mut self) {
        let capacity = self.capacity();
        *self = Self::with_capacity(capacity);
    }
}
