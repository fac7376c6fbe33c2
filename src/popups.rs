#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation and sign loss when turning the clamped multiplier into a particle count
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    // Allow precision loss when converting grid sizes to canvas pixels
    clippy::cast_precision_loss
)]

use crate::components::Theme;
use crate::game::{
    BONUS_LIFE, BONUS_RISE_SPEED, COMBO_POP_LIFE, COMBO_POP_PARTICLES_BASE,
    COMBO_POP_PARTICLES_MAX, MAX_BONUS_POPUPS, MAX_MULTIPLIER,
};
use crate::layout::BoardLayout;
use crate::particles::Spread;

const COMBO_SCALE_START: f32 = 0.35;
const COMBO_SCALE_GROWTH: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BonusPopup {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub life: f32,
    pub initial_life: f32,
    pub points: u64,
    pub mult: f32,
    pub theme: Theme,
    pub alive: bool,
}

impl BonusPopup {
    /// Opacity, fading linearly with remaining life.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        if self.initial_life > 0.0 {
            (self.life / self.initial_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Fixed pool of bonus popups; a spawn with no free slot is dropped.
#[derive(Debug, Clone)]
pub struct BonusPopups {
    slots: [BonusPopup; MAX_BONUS_POPUPS],
}

impl Default for BonusPopups {
    fn default() -> Self {
        Self {
            slots: [BonusPopup::default(); MAX_BONUS_POPUPS],
        }
    }
}

impl BonusPopups {
    /// Returns false when the pool is full.
    pub fn spawn(&mut self, x: f32, y: f32, points: u64, mult: f32, theme: Theme) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|p| !p.alive) else {
            return false;
        };
        *slot = BonusPopup {
            x,
            y,
            vy: -BONUS_RISE_SPEED,
            life: BONUS_LIFE,
            initial_life: BONUS_LIFE,
            points,
            mult,
            theme,
            alive: true,
        };
        true
    }

    pub fn tick(&mut self, dt: f32) {
        for p in self.slots.iter_mut().filter(|p| p.alive) {
            p.life -= dt;
            if p.life <= 0.0 {
                p.alive = false;
                continue;
            }
            p.y += p.vy * dt;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &BonusPopup> {
        self.slots.iter().filter(|p| p.alive)
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.iter().count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The "COMBO xN" banner. It scales in while drifting across the grid diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboPopup {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub initial_life: f32,
    pub scale: f32,
    pub mult: f32,
    pub combo: u32,
    pub theme: Theme,
}

impl ComboPopup {
    #[must_use]
    pub fn new(layout: &BoardLayout, mult: f32, combo: u32, theme: Theme) -> Self {
        let grid = layout.grid_rect();
        Self {
            x: grid.x,
            y: grid.y,
            vx: grid.w / COMBO_POP_LIFE,
            vy: grid.h / COMBO_POP_LIFE,
            life: COMBO_POP_LIFE,
            initial_life: COMBO_POP_LIFE,
            scale: COMBO_SCALE_START,
            mult,
            combo,
            theme,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        format!("COMBO x{}", self.combo)
    }

    #[must_use]
    pub fn alpha(&self) -> f32 {
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }

    /// Advances the banner. Returns false once it has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.life -= dt;
        if self.life <= 0.0 {
            return false;
        }
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        let p = 1.0 - self.life / self.initial_life;
        let ease = 1.0 - (1.0 - p) * (1.0 - p);
        self.scale = COMBO_SCALE_START + COMBO_SCALE_GROWTH * ease;
        true
    }
}

/// Particle count and spread of the burst that accompanies a combo banner.
#[must_use]
pub fn combo_burst(mult: f32) -> (usize, Spread) {
    let m = mult.clamp(1.0, MAX_MULTIPLIER);
    let count = (COMBO_POP_PARTICLES_BASE + (m * 10.0) as usize).min(COMBO_POP_PARTICLES_MAX);
    let spread = Spread {
        size_min: 3.5 + 0.28 * m,
        size_max: 7.0 + 0.55 * m,
        speed_min: 80.0 + 14.0 * m,
        speed_max: 180.0 + 26.0 * m,
    };
    (count, spread)
}
