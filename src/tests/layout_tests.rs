#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::layout::{BoardLayout, CANVAS_WIDTH, CanvasRect};
    use crate::shapes::{self, index_of};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_default_board_geometry() {
        let l = BoardLayout::new(10, 10, 4);
        assert!(approx(l.cell, 729.0 / 13.0));
        assert!(approx(l.grid_x, (CANVAS_WIDTH - 10.0 * l.cell) / 2.0));
        assert!(approx(l.grid_y, 40.0));
        assert!(approx(l.tray_y, 40.0 + 10.0 * l.cell + 60.0));
        assert!(approx(l.tray_box, (10.0 * l.cell - 12.0) / 4.0));
        assert!(approx(l.preview_cell(), l.tray_box / 9.0));
    }

    #[test]
    fn test_cell_size_limits() {
        // Width-limited when the tray boxes are small
        let wide = BoardLayout::new(10, 10, 1);
        assert!(wide.cell < 59.0);
        let l = BoardLayout::new(20, 20, 1);
        assert!(approx(l.cell, 18.0));
        assert!(approx(l.tray_box, 360.0));

        let l = BoardLayout::new(15, 15, 4);
        assert!(approx(l.cell, 729.0 / 19.25));
    }

    #[test]
    fn test_board_fits_canvas() {
        for size in [10, 15, 20] {
            for tray in 1..=4 {
                let l = BoardLayout::new(size, size, tray);
                let grid = l.grid_rect();
                assert!(grid.x >= 0.0 && grid.x + grid.w <= CANVAS_WIDTH + 1e-3);
                let last = l.tray_slot_rect(tray - 1);
                assert!(approx(last.x + last.w, grid.x + grid.w));
                assert!(last.y + last.h <= 900.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_point_to_cell() {
        let l = BoardLayout::new(10, 10, 4);
        assert_eq!(l.point_to_cell(l.grid_x, l.grid_y), Some((0, 0)));

        let (cx, cy) = l.cell_center(3, 4);
        assert_eq!(l.point_to_cell(cx, cy), Some((3, 4)));

        let grid = l.grid_rect();
        assert_eq!(l.point_to_cell(grid.x + grid.w, grid.y), None);
        assert_eq!(l.point_to_cell(grid.x - 0.1, grid.y), None);
        assert_eq!(l.point_to_cell(grid.x, grid.y + grid.h), None);
        assert_eq!(
            l.point_to_cell(grid.x + grid.w - 0.01, grid.y + grid.h - 0.01),
            Some((9, 9))
        );

        let (ox, oy) = l.cell_origin(2, 7);
        assert_eq!(l.point_to_cell(ox + 1.0, oy + 1.0), Some((2, 7)));
    }

    #[test]
    fn test_tray_hit_testing() {
        let l = BoardLayout::new(10, 10, 4);
        for i in 0..4 {
            let (x, y) = l.tray_slot_rect(i).center();
            assert_eq!(l.tray_slot_at(x, y), Some(i));
        }
        // The gap between boxes belongs to no slot
        let first = l.tray_slot_rect(0);
        assert_eq!(l.tray_slot_at(first.x + first.w + 2.0, first.y + 1.0), None);
        assert_eq!(l.tray_slot_at(10.0, 10.0), None);
    }

    #[test]
    fn test_canvas_rect_is_half_open() {
        let r = CanvasRect {
            x: 10.0,
            y: 20.0,
            w: 5.0,
            h: 5.0,
        };
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(15.0, 22.0));
        assert!(!r.contains(12.0, 25.0));
        assert_eq!(r.center(), (12.5, 22.5));
    }

    #[test]
    fn test_grab_cell() {
        let l = BoardLayout::new(10, 10, 4);
        let pc = l.preview_cell();
        let i3 = shapes::shape(index_of("I3").expect("I3 exists"));
        let rect = l.tray_slot_rect(0);
        let (ox, oy) = l.tray_preview_origin(0, i3);
        let local = |sx: f32, sy: f32| (ox - rect.x + sx * pc, oy - rect.y + sy * pc);

        let (x, y) = local(2.5, 0.5);
        assert_eq!(l.grab_cell(i3, x, y), (2, 0));

        // Far right of the box: nearest filled cell is the last one
        assert_eq!(l.grab_cell(i3, l.tray_box - 1.0, l.tray_box / 2.0), (2, 0));
        // Top-left corner of the box
        assert_eq!(l.grab_cell(i3, 0.0, 0.0), (0, 0));

        // Pressing the hole of an L picks the nearest filled cell
        let l3 = shapes::shape(index_of("L3a").expect("L3a exists"));
        let (ox, oy) = l.tray_preview_origin(0, l3);
        let (x, y) = (ox - rect.x + 2.4 * pc, oy - rect.y + 0.5 * pc);
        assert_eq!(l.grab_cell(l3, x, y), (2, 1));
    }
}
