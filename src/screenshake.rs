#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting line counts to f32 since they are at most 2 * GRID_MAX
    clippy::cast_precision_loss
)]

use log::trace;

use crate::game::{SHAKE_MULTILINE_BOOST, SHAKE_STRENGTH, SHAKE_TIME};
use crate::rng::RandomSource;

/// Camera shake after a clear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenShake {
    pub remaining: f32,
    pub strength: f32,
    pub offset: (f32, f32),
}

impl ScreenShake {
    /// Starts a shake with the specified strength and duration
    pub fn trigger(&mut self, strength: f32, duration: f32) {
        self.strength = strength;
        self.remaining = duration;
        trace!("Screen shake triggered with strength {strength}");
    }

    /// Shake sized to a clear of `lines` lines. Nothing happens for zero lines.
    pub fn trigger_for_lines(&mut self, lines: usize) {
        match lines {
            0 => {}
            1 => self.trigger(SHAKE_STRENGTH * 0.6, SHAKE_TIME * 0.7),
            _ => {
                let extra = (lines - 2) as f32;
                self.trigger(
                    SHAKE_STRENGTH * (1.0 + extra * 0.35) * SHAKE_MULTILINE_BOOST,
                    SHAKE_TIME,
                );
            }
        }
    }

    /// Counts down and picks a fresh random offset that fades with the remaining time.
    pub fn tick(&mut self, dt: f32, rng: &mut dyn RandomSource) {
        self.offset = (0.0, 0.0);
        if self.remaining <= 0.0 {
            return;
        }

        self.remaining = (self.remaining - dt).max(0.0);
        let s = self.strength * (self.remaining / SHAKE_TIME);
        self.offset = (rng.range_f32(-s, s), rng.range_f32(-s, s));
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
