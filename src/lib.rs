pub mod animation;
pub mod app;
pub mod bag;
pub mod components;
pub mod config;
pub mod game;
pub mod grid;
pub mod layout;
pub mod particles;
pub mod persistence;
pub mod popups;
pub mod rng;
pub mod scoring;
pub mod screenshake;
pub mod session;
pub mod shapes;
pub mod tray;
pub mod ui;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

// Upper bound on catch-up ticks after a stall, so a long pause doesn't fast-forward the game
const MAX_STEPS_PER_UPDATE: u32 = 8;

/// Turns wall-clock time into a whole number of fixed simulation ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: Duration,
    accumulator: Duration,
    last_update: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn new(tick_dt: f32) -> Self {
        Self {
            step: Duration::from_secs_f32(tick_dt.max(0.001)),
            accumulator: Duration::ZERO,
            last_update: Instant::now(),
        }
    }

    /// Length of one tick in seconds.
    #[must_use]
    pub fn step_seconds(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Adds the time since the previous call and returns how many ticks are due.
    pub fn update(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(elapsed)
    }

    /// Adds `elapsed` and returns how many ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
            if steps == MAX_STEPS_PER_UPDATE {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        steps
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn until_next_step(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
