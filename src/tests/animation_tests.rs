#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::animation::{
        ClearFlash, DropPreview, Interaction, PopTimers, ReturnAnim, lerp, smoothstep,
    };
    use crate::components::Theme;
    use crate::game::{CLEAR_FLASH_TIME, PLACE_POP_TIME, RETURN_TIME};
    use crate::grid::Grid;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_easing_helpers() {
        assert!(approx(smoothstep(0.0), 0.0));
        assert!(approx(smoothstep(0.5), 0.5));
        assert!(approx(smoothstep(1.0), 1.0));
        assert!(smoothstep(0.25) < 0.25);
        assert!(approx(lerp(10.0, 20.0, 0.25), 12.5));
    }

    #[test]
    fn test_return_anim_glides_home() {
        let mut anim = ReturnAnim::new(1, (0, 0), (100.0, 50.0), (300.0, 650.0));
        assert_eq!(anim.position(), (100.0, 50.0));
        assert!(approx(anim.cell_size(56.0, 15.0), 56.0));

        assert!(!anim.tick(RETURN_TIME * 0.5));
        let (x, y) = anim.position();
        assert!(approx(x, 200.0));
        assert!(approx(y, 350.0));

        assert!(anim.tick(RETURN_TIME));
        assert!(approx(anim.remaining, 0.0));
        let (x, y) = anim.position();
        assert!(approx(x, 300.0) && approx(y, 650.0));
        assert!(approx(anim.cell_size(56.0, 15.0), 15.0));
    }

    #[test]
    fn test_clear_flash_countdown() {
        let mut grid = Grid::new(10, 10);
        for x in 0..10 {
            grid.set_cell(x, 0, Some(Theme::new(0)));
        }
        let mut flash = ClearFlash::new(grid.build_clear_mask());
        assert!(approx(flash.intensity(), 1.0));

        assert!(!flash.tick(CLEAR_FLASH_TIME * 0.5));
        assert!(approx(flash.intensity(), 0.5));
        assert!(flash.tick(CLEAR_FLASH_TIME));
        assert!(approx(flash.intensity(), 0.0));
        assert!(flash.mask.row_full(0));
    }

    #[test]
    fn test_interaction_accessors() {
        let idle = Interaction::default();
        assert!(idle.is_idle());
        assert!(idle.drag().is_none());

        let back = Interaction::Returning(ReturnAnim::new(0, (1, 0), (0.0, 0.0), (1.0, 1.0)));
        assert!(!back.is_idle());
        assert_eq!(back.returning().map(|a| a.grab), Some((1, 0)));
        assert!(back.clearing().is_none());
    }

    #[test]
    fn test_preview_without_prediction() {
        let preview = DropPreview::default();
        assert!(!preview.valid);
        assert!(!preview.row_predicted(0));
        assert!(!preview.col_predicted(0));
    }

    #[test]
    fn test_pop_timers() {
        let mut pops = PopTimers::default();
        assert!(!pops.any_active());

        pops.start(3, 4, PLACE_POP_TIME);
        // Out-of-range cells are ignored
        pops.start(40, 0, PLACE_POP_TIME);
        assert!(approx(pops.get(3, 4), PLACE_POP_TIME));
        assert!(approx(pops.get(40, 0), 0.0));

        pops.tick(PLACE_POP_TIME * 0.5);
        assert!(approx(pops.get(3, 4), PLACE_POP_TIME * 0.5));
        pops.tick(1.0);
        assert!(approx(pops.get(3, 4), 0.0));
        assert!(!pops.any_active());

        pops.start(0, 0, 1.0);
        pops.clear();
        assert!(!pops.any_active());
    }
}
