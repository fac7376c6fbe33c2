#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting point totals to f32 since per-move subtotals are small
    clippy::cast_precision_loss,
    // Allow truncation and sign loss when rounding the multiplied subtotal since it is always small and positive
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::game::{
    COMBO_MISS_LIMIT, LINE_BONUS, MAX_MULTIPLIER, MULTILINE_BONUS, POINTS_PER_CELL,
    POINTS_PER_CLEAR,
};

/// Outcome of scoring one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveScore {
    /// Everything gained this move.
    pub total: u64,
    /// The clear portion of `total`, after the multiplier.
    pub clear_gain: u64,
    /// Multiplier in effect after this move.
    pub multiplier: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub highest_combo: u32,
    pub combo_miss: u32,
    pub last_move_mult: f32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            high_score: 0,
            combo: 0,
            highest_combo: 0,
            combo_miss: 0,
            last_move_mult: 1.0,
        }
    }
}

/// Points for the cleared cells and lines of one move, before the multiplier.
#[must_use]
pub fn clear_subtotal(lines: usize, cleared_cells: usize) -> u64 {
    let lines = lines as u64;
    let multiline = if lines > 1 {
        (lines - 1) * MULTILINE_BONUS
    } else {
        0
    };
    cleared_cells as u64 * POINTS_PER_CLEAR + lines * LINE_BONUS + multiline
}

impl ScoreState {
    /// Fresh state for a new game that remembers the best score so far.
    #[must_use]
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// Applies one placement of `placed_cells` that completed `lines` lines
    /// and removes `cleared_cells` occupied cells.
    pub fn score_move(&mut self, placed_cells: usize, lines: usize, cleared_cells: usize) -> MoveScore {
        let mut total = placed_cells as u64 * POINTS_PER_CELL;
        let mut clear_gain = 0;
        let mult;

        if lines > 0 {
            self.combo = self
                .combo
                .saturating_add(u32::try_from(lines).unwrap_or(u32::MAX));
            self.highest_combo = self.highest_combo.max(self.combo);
            self.combo_miss = 0;

            mult = (1.0 + self.combo as f32).min(MAX_MULTIPLIER);
            clear_gain = (clear_subtotal(lines, cleared_cells) as f32 * mult).round() as u64;
            total += clear_gain;
        } else if self.combo > 0 {
            self.combo_miss += 1;
            if self.combo_miss > COMBO_MISS_LIMIT {
                self.combo = 0;
                self.combo_miss = 0;
                mult = 1.0;
            } else {
                mult = self.last_move_mult;
            }
        } else {
            mult = 1.0;
        }

        self.last_move_mult = mult;
        self.score += total;
        self.high_score = self.high_score.max(self.score);

        MoveScore {
            total,
            clear_gain,
            multiplier: mult,
        }
    }
}
