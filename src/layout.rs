#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting grid and tray counts to f32 since they are at most GRID_MAX
    clippy::cast_precision_loss,
    // Allow truncation when flooring canvas coordinates to cell indices
    clippy::cast_possible_truncation
)]

use crate::shapes::Shape;

pub const CANVAS_WIDTH: f32 = 600.0;
pub const CANVAS_HEIGHT: f32 = 900.0;

const GRID_MARGIN: f32 = 5.0;
const GRID_TOP: f32 = 40.0;
const TRAY_GAP_BELOW_GRID: f32 = 60.0;
const VERTICAL_RESERVE: f32 = 171.0;
const TRAY_BOX_GAP: f32 = 4.0;
// Tray previews are drawn on a 9×9 lattice inside each box.
const TRAY_PREVIEW_DIVISIONS: f32 = 9.0;

/// Axis-aligned rectangle on the virtual canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CanvasRect {
    /// Half-open containment: left/top edges are inside, right/bottom are not.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
}

/// Board geometry for one grid size and tray count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub grid_w: usize,
    pub grid_h: usize,
    pub tray_count: usize,
    pub cell: f32,
    pub grid_x: f32,
    pub grid_y: f32,
    pub tray_x: f32,
    pub tray_y: f32,
    pub tray_box: f32,
}

impl BoardLayout {
    #[must_use]
    pub fn new(grid_w: usize, grid_h: usize, tray_count: usize) -> Self {
        let grid_w = grid_w.max(1);
        let grid_h = grid_h.max(1);
        let tray_count = tray_count.max(1);
        let (w, h, t) = (grid_w as f32, grid_h as f32, tray_count as f32);

        let cell_w = (CANVAS_WIDTH - 2.0 * GRID_MARGIN) / w;
        let cell_h = (CANVAS_HEIGHT - VERTICAL_RESERVE) / (h + w / t + 0.5);
        let cell = cell_w.min(cell_h);

        let grid_x = (CANVAS_WIDTH - w * cell) * 0.5;
        let grid_y = GRID_TOP;
        let tray_box = (w * cell - (t - 1.0) * TRAY_BOX_GAP) / t;

        Self {
            grid_w,
            grid_h,
            tray_count,
            cell,
            grid_x,
            grid_y,
            tray_x: grid_x,
            tray_y: grid_y + h * cell + TRAY_GAP_BELOW_GRID,
            tray_box,
        }
    }

    #[must_use]
    pub fn grid_rect(&self) -> CanvasRect {
        CanvasRect {
            x: self.grid_x,
            y: self.grid_y,
            w: self.grid_w as f32 * self.cell,
            h: self.grid_h as f32 * self.cell,
        }
    }

    /// Top-left corner of grid cell `(x, y)`.
    #[must_use]
    pub fn cell_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (
            self.grid_x + x as f32 * self.cell,
            self.grid_y + y as f32 * self.cell,
        )
    }

    #[must_use]
    pub fn cell_center(&self, x: usize, y: usize) -> (f32, f32) {
        (
            self.grid_x + (x as f32 + 0.5) * self.cell,
            self.grid_y + (y as f32 + 0.5) * self.cell,
        )
    }

    /// Grid cell under a canvas point, or `None` outside the grid.
    #[must_use]
    pub fn point_to_cell(&self, x: f32, y: f32) -> Option<(i32, i32)> {
        if !self.grid_rect().contains(x, y) {
            return None;
        }
        Some((
            ((x - self.grid_x) / self.cell).floor() as i32,
            ((y - self.grid_y) / self.cell).floor() as i32,
        ))
    }

    #[must_use]
    pub fn tray_slot_rect(&self, index: usize) -> CanvasRect {
        CanvasRect {
            x: self.tray_x + index as f32 * (self.tray_box + TRAY_BOX_GAP),
            y: self.tray_y,
            w: self.tray_box,
            h: self.tray_box,
        }
    }

    /// Tray slot under a canvas point.
    #[must_use]
    pub fn tray_slot_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.tray_count).find(|&i| self.tray_slot_rect(i).contains(x, y))
    }

    /// Side of one preview cell inside a tray box.
    #[must_use]
    pub fn preview_cell(&self) -> f32 {
        self.tray_box / TRAY_PREVIEW_DIVISIONS
    }

    /// Top-left of `shape`'s preview, centred in tray slot `index`.
    #[must_use]
    pub fn tray_preview_origin(&self, index: usize, shape: &Shape) -> (f32, f32) {
        let rect = self.tray_slot_rect(index);
        let pc = self.preview_cell();
        (
            rect.x + (rect.w - shape.width as f32 * pc) * 0.5,
            rect.y + (rect.h - shape.height as f32 * pc) * 0.5,
        )
    }

    /// Shape cell grabbed by a press at `(local_x, local_y)` relative to a tray box's corner.
    ///
    /// The filled cell under the press wins; otherwise the filled cell whose
    /// centre is nearest.
    #[must_use]
    pub fn grab_cell(&self, shape: &Shape, local_x: f32, local_y: f32) -> (usize, usize) {
        let pc = self.preview_cell();
        let rx = local_x - (self.tray_box - shape.width as f32 * pc) * 0.5;
        let ry = local_y - (self.tray_box - shape.height as f32 * pc) * 0.5;

        let sx = (rx / pc).floor();
        let sy = (ry / pc).floor();
        if sx >= 0.0 && sy >= 0.0 {
            #[allow(clippy::cast_sign_loss)]
            let (cx, cy) = (sx as usize, sy as usize);
            if shape.cell(cx, cy) {
                return (cx, cy);
            }
        }

        let mut best = (0, 0);
        let mut best_d2 = f32::MAX;
        for (x, y) in shape.filled_cells() {
            let dx = (x as f32 + 0.5) * pc - rx;
            let dy = (y as f32 + 0.5) * pc - ry;
            let d2 = dx * dx + dy * dy;
            if d2 < best_d2 {
                best_d2 = d2;
                best = (x, y);
            }
        }
        best
    }
}
