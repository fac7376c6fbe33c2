#![warn(clippy::all, clippy::pedantic)]

use crate::game::{CLEAR_FLASH_TIME, GRID_MAX, RETURN_TIME};
use crate::grid::ClearMask;

/// Hermite smoothstep, `3t² - 2t³`.
#[must_use]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where the dragged piece would land.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropPreview {
    /// Grid origin of the piece, `None` while the pointer is off the grid.
    pub origin: Option<(i32, i32)>,
    pub valid: bool,
    /// Lines the drop would complete. Only present for a valid origin.
    pub predicted: Option<ClearMask>,
}

impl DropPreview {
    #[must_use]
    pub fn row_predicted(&self, y: usize) -> bool {
        self.predicted.as_ref().is_some_and(|m| m.row_full(y))
    }

    #[must_use]
    pub fn col_predicted(&self, x: usize) -> bool {
        self.predicted.as_ref().is_some_and(|m| m.col_full(x))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub index: usize,
    /// Shape cell held under the pointer.
    pub grab: (usize, usize),
    pub pointer: (f32, f32),
    pub preview: DropPreview,
}

/// A rejected piece gliding back to its tray slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnAnim {
    pub index: usize,
    pub grab: (usize, usize),
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub remaining: f32,
}

impl ReturnAnim {
    #[must_use]
    pub fn new(index: usize, grab: (usize, usize), start: (f32, f32), end: (f32, f32)) -> Self {
        Self {
            index,
            grab,
            start,
            end,
            remaining: RETURN_TIME,
        }
    }

    /// Eased progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        smoothstep(1.0 - (self.remaining / RETURN_TIME).clamp(0.0, 1.0))
    }

    /// Canvas position of the grabbed cell's centre.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        let t = self.progress();
        (
            lerp(self.start.0, self.end.0, t),
            lerp(self.start.1, self.end.1, t),
        )
    }

    /// Drawn cell size, shrinking from grid cells to tray preview cells.
    #[must_use]
    pub fn cell_size(&self, grid_cell: f32, preview_cell: f32) -> f32 {
        lerp(grid_cell, preview_cell, self.progress())
    }

    /// Advances the timer. Returns true once finished.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }
}

/// Cells flashing before removal.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearFlash {
    pub mask: ClearMask,
    pub remaining: f32,
}

impl ClearFlash {
    #[must_use]
    pub fn new(mask: ClearMask) -> Self {
        Self {
            mask,
            remaining: CLEAR_FLASH_TIME,
        }
    }

    /// Flash intensity, 1 at the start fading to 0.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        (self.remaining / CLEAR_FLASH_TIME).clamp(0.0, 1.0)
    }

    /// Advances the timer. Returns true once the cells should be removed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    Returning(ReturnAnim),
    Clearing(ClearFlash),
}

impl Interaction {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Self::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    #[must_use]
    pub fn returning(&self) -> Option<&ReturnAnim> {
        match self {
            Self::Returning(anim) => Some(anim),
            _ => None,
        }
    }

    #[must_use]
    pub fn clearing(&self) -> Option<&ClearFlash> {
        match self {
            Self::Clearing(flash) => Some(flash),
            _ => None,
        }
    }
}

/// Per-cell countdowns for the placement pop.
#[derive(Debug, Clone, PartialEq)]
pub struct PopTimers {
    timers: [[f32; GRID_MAX]; GRID_MAX],
}

impl Default for PopTimers {
    fn default() -> Self {
        Self {
            timers: [[0.0; GRID_MAX]; GRID_MAX],
        }
    }
}

impl PopTimers {
    pub fn start(&mut self, x: usize, y: usize, duration: f32) {
        if x < GRID_MAX && y < GRID_MAX {
            self.timers[y][x] = duration;
        }
    }

    /// Remaining pop time of `(x, y)`; zero when inert.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        if x < GRID_MAX && y < GRID_MAX {
            self.timers[y][x]
        } else {
            0.0
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for t in self.timers.iter_mut().flatten() {
            if *t > 0.0 {
                *t = (*t - dt).max(0.0);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn any_active(&self) -> bool {
        self.timers.iter().flatten().any(|&t| t > 0.0)
    }
}
