#![warn(clippy::all, clippy::pedantic)]

use crate::bag::Bag;
use crate::components::Theme;
use crate::game::{DEFAULT_TRAY_COUNT, TRAY_MAX};
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::shapes::{self, Shape};

/// One tray slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Piece {
    pub shape_index: usize,
    pub theme: Theme,
    pub used: bool,
}

impl Piece {
    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        shapes::shape(self.shape_index)
    }
}

#[derive(Debug, Clone)]
pub struct Tray {
    slots: [Piece; TRAY_MAX],
    count: usize,
}

impl Default for Tray {
    fn default() -> Self {
        Self::new(DEFAULT_TRAY_COUNT)
    }
}

impl Tray {
    /// A tray of `count` slots (clamped to `1..=TRAY_MAX`), all marked used until the first refill.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: [Piece {
                used: true,
                ..Piece::default()
            }; TRAY_MAX],
            count: count.clamp(1, TRAY_MAX),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces().get(index)
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.slots[..self.count]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.slots[..self.count].get_mut(index)
    }

    /// Refills every slot at once from the bag. The whole set shares one random theme.
    pub fn refill(&mut self, bag: &mut Bag, score: u64, rng: &mut dyn RandomSource) {
        let theme = Theme::random(rng);
        for slot in &mut self.slots[..self.count] {
            *slot = Piece {
                shape_index: bag.draw(score, rng),
                theme,
                used: false,
            };
        }
    }

    /// Marks slot `index` as placed.
    pub fn mark_used(&mut self, index: usize) {
        if let Some(piece) = self.get_mut(index) {
            piece.used = true;
        }
    }

    #[must_use]
    pub fn all_used(&self) -> bool {
        self.pieces().iter().all(|p| p.used)
    }

    /// True when no unused piece fits anywhere on `grid`.
    #[must_use]
    pub fn none_placeable(&self, grid: &Grid) -> bool {
        !self
            .pieces()
            .iter()
            .any(|p| !p.used && grid.any_valid_placement(p.shape()))
    }
}
