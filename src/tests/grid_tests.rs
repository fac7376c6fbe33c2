#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::Theme;
    use crate::game::GRID_MAX;
    use crate::grid::{ClearMask, Grid};
    use crate::shapes::{self, Shape, index_of};

    fn shape(name: &str) -> &'static Shape {
        shapes::shape(index_of(name).expect("unknown shape"))
    }

    fn fill_row(grid: &mut Grid, y: usize) {
        for x in 0..grid.width() {
            grid.set_cell(x, y, Some(Theme::new(1)));
        }
    }

    fn fill_col(grid: &mut Grid, x: usize) {
        for y in 0..grid.height() {
            grid.set_cell(x, y, Some(Theme::new(1)));
        }
    }

    #[test]
    fn test_dimensions_are_clamped() {
        let grid = Grid::new(0, 50);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), GRID_MAX);
        assert_eq!(Grid::default().width(), 10);
    }

    #[test]
    fn test_can_place_bounds_and_overlap() {
        let mut grid = Grid::new(10, 10);
        let i3 = shape("I3");

        assert!(grid.can_place(i3, 0, 0));
        assert!(grid.can_place(i3, 7, 9));
        assert!(!grid.can_place(i3, 8, 0));
        assert!(!grid.can_place(i3, -1, 0));
        assert!(!grid.can_place(i3, 0, -1));
        assert!(!grid.can_place(i3, 0, 10));

        grid.set_cell(4, 4, None);
        assert!(!grid.can_place(i3, 2, 4));
        assert!(grid.can_place(i3, 5, 4));

        // Empty footprint cells may hang over occupied ones
        let l2 = shape("L2");
        grid.set_cell(1, 0, None);
        assert!(grid.can_place(l2, 0, 0));
    }

    #[test]
    fn test_place_stamps_footprint() {
        let mut grid = Grid::new(10, 10);
        let t = shape("T");
        grid.place(t, 3, 2, Some(Theme::new(5)));

        assert_eq!(grid.occupied_count(), 4);
        for (x, y) in [(3, 2), (4, 2), (5, 2), (4, 3)] {
            assert!(grid.is_occupied(x, y));
            assert_eq!(grid.theme_at(x, y), Some(Theme::new(5)));
        }
        assert!(!grid.is_occupied(3, 3));
        assert!(!grid.can_place(t, 3, 2));
    }

    #[test]
    fn test_clear_mask_rows_and_columns() {
        let mut grid = Grid::new(10, 10);
        fill_row(&mut grid, 0);
        fill_row(&mut grid, 1);
        fill_col(&mut grid, 0);
        grid.set_cell(5, 5, None);

        let mask = grid.build_clear_mask();
        assert_eq!(mask.lines(), 3);
        assert!(mask.row_full(0));
        assert!(mask.row_full(1));
        assert!(!mask.row_full(2));
        assert!(mask.col_full(0));
        assert!(!mask.col_full(1));

        // Intersections are counted once
        assert_eq!(mask.flagged_count(), 28);
        assert_eq!(grid.count_cells_in_mask(&mask), 28);

        grid.apply_clear_mask(&mask);
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.is_occupied(5, 5));
        assert_eq!(grid.theme_at(0, 0), None);
    }

    #[test]
    fn test_no_lines_no_mask() {
        let mut grid = Grid::new(10, 10);
        for x in 0..9 {
            grid.set_cell(x, 3, None);
        }
        let mask = grid.build_clear_mask();
        assert!(mask.is_empty());
        assert_eq!(mask, ClearMask::empty());
    }

    #[test]
    fn test_full_grid_clears_every_line() {
        let mut grid = Grid::new(10, 10);
        for y in 0..10 {
            fill_row(&mut grid, y);
        }
        let mask = grid.build_clear_mask();
        assert_eq!(mask.lines(), 20);
        assert_eq!(grid.count_cells_in_mask(&mask), 100);
        assert!(!grid.any_valid_placement(shape("1")));
    }

    #[test]
    fn test_predict_clear_leaves_grid_alone() {
        let mut grid = Grid::new(10, 10);
        for x in 0..7 {
            grid.set_cell(x, 5, None);
        }
        let before = grid.clone();

        let mask = grid.predict_clear(shape("I3"), 7, 5);
        assert_eq!(mask.lines(), 1);
        assert!(mask.row_full(5));
        assert_eq!(grid, before);

        assert!(grid.predict_clear(shape("I3"), 6, 4).is_empty());

        // A column completed by a vertical piece
        let mut grid = Grid::new(10, 10);
        for y in 3..10 {
            grid.set_cell(2, y, None);
        }
        let mask = grid.predict_clear(shape("V3"), 2, 0);
        assert!(mask.col_full(2));
        assert_eq!(mask.lines(), 1);
    }

    #[test]
    fn test_any_valid_placement() {
        let mut grid = Grid::new(10, 10);
        assert!(grid.any_valid_placement(shape("I5")));

        // Checkerboard: single cells fit, nothing wider does
        for y in 0..10 {
            for x in 0..10 {
                if (x + y) % 2 == 0 {
                    grid.set_cell(x, y, None);
                }
            }
        }
        assert!(grid.any_valid_placement(shape("1")));
        assert!(!grid.any_valid_placement(shape("I2")));
        assert!(!grid.any_valid_placement(shape("O2")));
        // Diagonals fit on the empty colour of the board
        assert!(grid.any_valid_placement(shape("D\\2")));
    }

    #[test]
    fn test_random_fill() {
        let mut rng = fastrand::Rng::with_seed(21);
        let mut grid = Grid::new(10, 10);

        assert_eq!(grid.random_fill(16, &mut rng), 16);
        assert_eq!(grid.occupied_count(), 16);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(grid.theme_at(x, y), None);
            }
        }

        // Cannot fill more cells than there are
        let mut small = Grid::new(2, 2);
        assert_eq!(small.random_fill(10, &mut rng), 4);
        assert_eq!(small.occupied_count(), 4);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut grid = Grid::new(10, 10);
        fill_row(&mut grid, 0);
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);

        fill_row(&mut grid, 0);
        grid.reset(15, 20);
        assert_eq!((grid.width(), grid.height()), (15, 20));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let mut grid = Grid::new(10, 10);
        grid.set_cell(10, 0, Some(Theme::new(0)));
        assert_eq!(grid.occupied_count(), 0);
        assert!(!grid.is_occupied(10, 0));
        assert!(!grid.in_bounds(10, 0));
        assert!(!grid.in_bounds(-1, 3));
        assert!(grid.in_bounds(9, 9));
    }
}
