#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::game::BAG_SIZE;
use crate::rng::{self, RandomSource};
use crate::shapes::DifficultyWeights;

#[derive(Debug, Clone)]
pub struct Bag {
    slots: [usize; BAG_SIZE],
    len: usize,
    cursor: usize,
    refill_score: u64,
    refills: u64,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// An empty bag; the first draw triggers a refill.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [0; BAG_SIZE],
            len: 0,
            cursor: 0,
            refill_score: 0,
            refills: 0,
        }
    }

    /// Next shape index, refilling first when the bag is exhausted.
    pub fn draw(&mut self, score: u64, rng: &mut dyn RandomSource) -> usize {
        if self.cursor >= self.len {
            self.refill(score, rng);
        }
        let index = self.slots[self.cursor];
        self.cursor += 1;
        index
    }

    /// Fills every slot with a weighted pick for `score`, shuffles, rewinds.
    pub fn refill(&mut self, score: u64, rng: &mut dyn RandomSource) {
        let weights = DifficultyWeights::for_score(score);
        for slot in &mut self.slots {
            *slot = weights.pick(rng);
        }
        rng::shuffle(rng, &mut self.slots);

        self.len = BAG_SIZE;
        self.cursor = 0;
        self.refill_score = score;
        self.refills += 1;

        debug!(
            "Bag refilled at score {score} (difficulty {:.3})",
            weights.progress()
        );
    }

    /// Empties the bag so the next draw refills it.
    pub fn reset(&mut self) {
        self.len = 0;
        self.cursor = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }

    /// Score whose weights produced the current contents.
    #[must_use]
    pub fn refill_score(&self) -> u64 {
        self.refill_score
    }

    #[must_use]
    pub fn refill_count(&self) -> u64 {
        self.refills
    }

    #[must_use]
    pub fn contents(&self) -> &[usize] {
        &self.slots[..self.len]
    }
}
