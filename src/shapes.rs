#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting indices to f32 since the table holds fewer than 2^24 shapes
    clippy::cast_precision_loss
)]

use once_cell::sync::Lazy;

use crate::game::{DIFFICULTY_MAX_SCORE, MIN_DIFFICULTY_WEIGHT};
use crate::rng::RandomSource;

/// Largest footprint side of any shape.
pub const SHAPE_MAX: usize = 5;

/// Immutable footprint of a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
    cells: [[bool; SHAPE_MAX]; SHAPE_MAX], // cells[row][col]
}

impl Shape {
    /// Parses rows of `X` (filled) and `.` (empty) separated by `/`.
    fn from_art(name: &'static str, art: &str) -> Self {
        let mut cells = [[false; SHAPE_MAX]; SHAPE_MAX];
        let mut width = 0;
        let mut height = 0;

        for (y, row) in art.split('/').take(SHAPE_MAX).enumerate() {
            for (x, ch) in row.chars().take(SHAPE_MAX).enumerate() {
                cells[y][x] = ch == 'X';
                width = width.max(x + 1);
            }
            height = y + 1;
        }

        Self {
            name,
            width,
            height,
            cells,
        }
    }

    /// Whether the footprint covers `(x, y)`. Out-of-footprint coordinates are empty.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x]
    }

    /// Filled cells as `(x, y)` offsets from the top-left corner, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.cells[y][x])
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.filled_cells().count()
    }
}

// Easiest first. The small shapes are repeated to keep them common early on.
const SHAPE_ART: &[(&str, &str)] = &[
    ("1", "X"),
    ("1", "X"),
    ("1", "X"),
    ("1", "X"),
    ("I2", "XX"),
    ("I2", "XX"),
    ("I2", "XX"),
    ("I2", "XX"),
    ("V2", "X/X"),
    ("V2", "X/X"),
    ("V2", "X/X"),
    ("V2", "X/X"),
    ("I3", "XXX"),
    ("I3", "XXX"),
    ("I3", "XXX"),
    ("I3", "XXX"),
    ("V3", "X/X/X"),
    ("V3", "X/X/X"),
    ("V3", "X/X/X"),
    ("V3", "X/X/X"),
    ("D\\2", "X./.X"),
    ("D\\2", "X./.X"),
    ("D/2", ".X/X."),
    ("D/2", ".X/X."),
    ("L2", "X./XX"),
    ("J2", ".X/XX"),
    ("O2", "XX/XX"),
    ("L3a", "X../XXX"),
    ("L3b", "XX/X./X."),
    ("J3a", "..X/XXX"),
    ("J3b", "XX/.X/.X"),
    ("T", "XXX/.X."),
    ("T_flip", ".X./XXX"),
    ("T_left", ".X/XX/.X"),
    ("T_right", "X./XX/X."),
    ("S", "XX./.XX"),
    ("SV", ".X/XX/X."),
    ("Z", ".XX/XX."),
    ("ZV", "X./XX/.X"),
    ("C3a", "XXX/X.."),
    ("C3c", "XXX/..X"),
    ("I4", "XXXX"),
    ("V4", "X/X/X/X"),
    ("L4", "X../X../XXX"),
    ("J4", "..X/..X/XXX"),
    ("T4", "XXX/.X./.X."),
    ("T4R", ".X./.X./XXX"),
    ("U3x2", "X.X/XXX"),
    ("U3x2_flip", "XXX/X.X"),
    ("U2x3_right", "XX/X./XX"),
    ("U2x3_left", "XX/.X/XX"),
    ("R3x2", "XXX/XXX"),
    ("R2x3", "XX/XX/XX"),
    ("Plus", ".X./XXX/.X."),
    ("O3", "XXX/XXX/XXX"),
    ("D\\3", "X../.X./..X"),
    ("D/3", "..X/.X./X.."),
    ("I5", "XXXXX"),
    ("V5", "X/X/X/X/X"),
    ("D\\4", "X.../.X../..X./...X"),
    ("D/4", "...X/..X./.X../X..."),
];

/// The shape catalog, ordered easiest to hardest.
pub static SHAPES: Lazy<Vec<Shape>> = Lazy::new(|| {
    SHAPE_ART
        .iter()
        .map(|&(name, art)| Shape::from_art(name, art))
        .collect()
});

#[must_use]
pub fn shape_count() -> usize {
    SHAPES.len()
}

/// Shape at `index`. Indices come from the bag, which only produces valid ones.
#[must_use]
pub fn shape(index: usize) -> &'static Shape {
    &SHAPES[index.min(SHAPES.len() - 1)]
}

/// First table index of the shape called `name`.
#[must_use]
pub fn index_of(name: &str) -> Option<usize> {
    SHAPES.iter().position(|s| s.name == name)
}

/// Difficulty progress `t` in `[0, 1]` for a score.
#[must_use]
pub fn difficulty_progress(score: u64) -> f32 {
    (score.min(DIFFICULTY_MAX_SCORE) as f32 / DIFFICULTY_MAX_SCORE as f32).clamp(0.0, 1.0)
}

/// Draw weight of the shape at `index` out of `count`, at progress `t`.
#[must_use]
pub fn difficulty_weight(index: usize, count: usize, t: f32) -> f32 {
    let d = if count > 1 {
        index as f32 / (count - 1) as f32
    } else {
        0.5
    };
    MIN_DIFFICULTY_WEIGHT + (1.0 - MIN_DIFFICULTY_WEIGHT) * ((1.0 - d) * (1.0 - t) + d * t)
}

/// Per-shape weights frozen for one score.
#[derive(Debug, Clone)]
pub struct DifficultyWeights {
    weights: Vec<f32>,
    total: f32,
    progress: f32,
}

impl DifficultyWeights {
    #[must_use]
    pub fn for_score(score: u64) -> Self {
        let count = shape_count();
        let progress = difficulty_progress(score);
        let weights: Vec<f32> = (0..count)
            .map(|i| difficulty_weight(i, count, progress))
            .collect();
        let total = weights.iter().sum();

        Self {
            weights,
            total,
            progress,
        }
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub fn total(&self) -> f32 {
        self.total
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Index of the first shape whose cumulative weight exceeds `r`, for `r` in `[0, total)`.
    #[must_use]
    pub fn index_for(&self, r: f32) -> usize {
        let mut acc = 0.0;
        for (i, w) in self.weights.iter().enumerate() {
            acc += w;
            if r < acc {
                return i;
            }
        }
        self.weights.len() - 1
    }

    /// Weighted random shape index.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> usize {
        self.index_for(rng.range_f32(0.0, self.total))
    }
}
