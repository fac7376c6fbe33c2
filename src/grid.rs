#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since grid coordinates are at most GRID_MAX
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as grid coordinates are at most GRID_MAX
    clippy::cast_possible_wrap
)]

use crate::components::Theme;
use crate::game::{DEFAULT_GRID_SIZE, FILL_MAX_TRIES, GRID_MAX};
use crate::rng::RandomSource;
use crate::shapes::Shape;

type CellFlags = [[bool; GRID_MAX]; GRID_MAX];

/// Cells pending removal plus the full rows and columns that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearMask {
    cells: CellFlags,
    rows: [bool; GRID_MAX],
    cols: [bool; GRID_MAX],
    lines: usize,
}

impl Default for ClearMask {
    fn default() -> Self {
        Self::empty()
    }
}

impl ClearMask {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[false; GRID_MAX]; GRID_MAX],
            rows: [false; GRID_MAX],
            cols: [false; GRID_MAX],
            lines: 0,
        }
    }

    /// Full rows plus full columns. An intersection cell counts toward both.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < GRID_MAX && y < GRID_MAX && self.cells[y][x]
    }

    #[must_use]
    pub fn row_full(&self, y: usize) -> bool {
        y < GRID_MAX && self.rows[y]
    }

    #[must_use]
    pub fn col_full(&self, x: usize) -> bool {
        x < GRID_MAX && self.cols[x]
    }

    /// Number of flagged cells, each counted once.
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    fn from_occupancy(occ: &CellFlags, width: usize, height: usize) -> Self {
        let mut mask = Self::empty();

        for y in 0..height {
            if occ[y][..width].iter().all(|&c| c) {
                mask.rows[y] = true;
                mask.lines += 1;
                for x in 0..width {
                    mask.cells[y][x] = true;
                }
            }
        }
        for x in 0..width {
            if (0..height).all(|y| occ[y][x]) {
                mask.cols[x] = true;
                mask.lines += 1;
                for row in mask.cells.iter_mut().take(height) {
                    row[x] = true;
                }
            }
        }

        mask
    }
}

/// Occupancy grid of up to `GRID_MAX × GRID_MAX` cells.
///
/// Each occupied cell may carry a theme. Cells filled by the partial-fill
/// start mode are occupied without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    occ: CellFlags,
    themes: [[Option<Theme>; GRID_MAX]; GRID_MAX],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl Grid {
    /// Empty grid. Dimensions are clamped to `1..=GRID_MAX`.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.clamp(1, GRID_MAX),
            height: height.clamp(1, GRID_MAX),
            occ: [[false; GRID_MAX]; GRID_MAX],
            themes: [[None; GRID_MAX]; GRID_MAX],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Empties every cell and changes the dimensions.
    pub fn reset(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.occ = [[false; GRID_MAX]; GRID_MAX];
        self.themes = [[None; GRID_MAX]; GRID_MAX];
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.occ[y][x]
    }

    /// Theme of `(x, y)`, kept until the cell is cleared.
    #[must_use]
    pub fn theme_at(&self, x: usize, y: usize) -> Option<Theme> {
        if x < self.width && y < self.height {
            self.themes[y][x]
        } else {
            None
        }
    }

    pub fn set_cell(&mut self, x: usize, y: usize, theme: Option<Theme>) {
        if x < self.width && y < self.height {
            self.occ[y][x] = true;
            self.themes[y][x] = theme;
        }
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        (0..self.height)
            .map(|y| self.occ[y][..self.width].iter().filter(|&&c| c).count())
            .sum()
    }

    /// Whether every filled cell of `shape` at origin `(x, y)` lands in bounds on an empty cell.
    #[must_use]
    pub fn can_place(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.filled_cells().all(|(sx, sy)| {
            let gx = x + sx as i32;
            let gy = y + sy as i32;
            self.in_bounds(gx, gy) && !self.occ[gy as usize][gx as usize]
        })
    }

    /// Stamps `shape` at `(x, y)`. The caller must have checked [`Grid::can_place`].
    pub fn place(&mut self, shape: &Shape, x: i32, y: i32, theme: Option<Theme>) {
        debug_assert!(self.can_place(shape, x, y), "placement precondition violated");

        for (sx, sy) in shape.filled_cells() {
            let gx = (x + sx as i32) as usize;
            let gy = (y + sy as i32) as usize;
            self.occ[gy][gx] = true;
            self.themes[gy][gx] = theme;
        }
    }

    /// Whether `shape` fits anywhere on the grid.
    #[must_use]
    pub fn any_valid_placement(&self, shape: &Shape) -> bool {
        (0..self.height as i32)
            .any(|y| (0..self.width as i32).any(|x| self.can_place(shape, x, y)))
    }

    #[must_use]
    pub fn build_clear_mask(&self) -> ClearMask {
        ClearMask::from_occupancy(&self.occ, self.width, self.height)
    }

    /// Empties every flagged cell.
    pub fn apply_clear_mask(&mut self, mask: &ClearMask) {
        for y in 0..self.height {
            for x in 0..self.width {
                if mask.cells[y][x] {
                    self.occ[y][x] = false;
                    self.themes[y][x] = None;
                }
            }
        }
    }

    /// Occupied cells under the mask.
    #[must_use]
    pub fn count_cells_in_mask(&self, mask: &ClearMask) -> usize {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .filter(|&x| mask.cells[y][x] && self.occ[y][x])
                    .count()
            })
            .sum()
    }

    /// Lines that would be full if `shape` were stamped at `(x, y)`.
    /// Footprint cells falling outside the grid are ignored.
    #[must_use]
    pub fn predict_clear(&self, shape: &Shape, x: i32, y: i32) -> ClearMask {
        let mut temp = self.occ;
        for (sx, sy) in shape.filled_cells() {
            let gx = x + sx as i32;
            let gy = y + sy as i32;
            if self.in_bounds(gx, gy) {
                temp[gy as usize][gx as usize] = true;
            }
        }
        ClearMask::from_occupancy(&temp, self.width, self.height)
    }

    /// Occupies up to `count` random empty cells, without a theme.
    /// Gives up after a bounded number of attempts. Returns how many were filled.
    pub fn random_fill(&mut self, count: usize, rng: &mut dyn RandomSource) -> usize {
        let mut remaining = count;
        let mut tries = 0;

        while remaining > 0 && tries < FILL_MAX_TRIES {
            tries += 1;
            let x = rng.range_inclusive(0, self.width - 1);
            let y = rng.range_inclusive(0, self.height - 1);
            if !self.occ[y][x] {
                self.occ[y][x] = true;
                self.themes[y][x] = None;
                remaining -= 1;
            }
        }

        count - remaining
    }
}
