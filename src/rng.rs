#![warn(clippy::all, clippy::pedantic)]

/// Uniform random numbers for the game core.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform integer in `[lo, hi]`. Returns `lo` when `hi <= lo`.
    fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize;

    /// Uniform float in `[lo, hi)`.
    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

impl RandomSource for fastrand::Rng {
    fn next_f32(&mut self) -> f32 {
        self.f32()
    }

    fn range_inclusive(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo { lo } else { self.usize(lo..=hi) }
    }
}

/// Creates the default random source, seeded when a seed is given.
#[must_use]
pub fn new_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(fastrand::Rng::with_seed(seed)),
        None => Box::new(fastrand::Rng::new()),
    }
}

/// In-place Fisher-Yates shuffle.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.range_inclusive(0, i);
        items.swap(i, j);
    }
}
