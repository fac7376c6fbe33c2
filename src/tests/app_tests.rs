#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    use crate::app::{App, MenuItem};
    use crate::components::{GamePhase, Theme};
    use crate::game::TICK_DT;
    use crate::tests::test_utils::{create_playing_session, create_test_session, set_tray_piece};
    use crate::ui::{self, BoardView, min_terminal_size};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn playing_app() -> App {
        let (session, _store) = create_playing_session();
        let mut app = App::new(session, TICK_DT);
        app.view = BoardView::new(Rect::new(0, 0, 120, 50), *app.session.layout());
        app
    }

    #[test]
    fn test_menu_navigation() {
        let (session, _store) = create_test_session();
        let mut app = App::new(session, TICK_DT);
        assert_eq!(app.selected_item(), MenuItem::StartEmpty);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_item(), MenuItem::Quit);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_item(), MenuItem::StartFilled);

        app.handle_key(key(KeyCode::Down));
        let before = app.session.settings().tray_count;
        app.handle_key(key(KeyCode::Right));
        assert_ne!(app.session.settings().tray_count, before);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_starts_and_escape_returns() {
        let (session, _store) = create_test_session();
        let mut app = App::new(session, TICK_DT);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.phase(), GamePhase::Play);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.session.phase(), GamePhase::Menu);
        assert!(!app.should_quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.handle_event(&Event::Key(ctrl_c));
        assert!(app.should_quit);
    }

    #[test]
    fn test_menu_labels() {
        let (session, _store) = create_test_session();
        let settings = session.settings();
        assert_eq!(MenuItem::Sound.label(settings, false), "Sound: off");
        assert_eq!(MenuItem::GridSize.label(settings, true), "Grid: 10x10");
        assert_eq!(MenuItem::TrayCount.label(settings, true), "Tray pieces: 4");
    }

    #[test]
    fn test_board_view_mapping() {
        let (session, _store) = create_playing_session();
        let layout = *session.layout();

        let (min_w, min_h) = min_terminal_size(&layout);
        assert!(BoardView::new(Rect::new(0, 0, min_w - 1, min_h), layout).is_none());

        let view = BoardView::new(Rect::new(0, 0, 120, 50), layout).expect("fits");
        assert_eq!((view.grid_col, view.grid_row), (36, 17));
        assert_eq!((view.tray_col, view.tray_row), (17, 29));

        let tray = session.tray();
        let (x, y) = view.to_canvas(view.grid_col, view.grid_row, tray);
        assert_eq!(layout.point_to_cell(x, y), Some((0, 0)));

        // Both columns of a grid cell map to the same cell
        for dc in [6, 7] {
            let (x, y) = view.to_canvas(view.grid_col + dc, view.grid_row + 4, tray);
            assert_eq!(layout.point_to_cell(x, y), Some((3, 4)));
        }

        let (cx, cy) = layout.cell_center(3, 4);
        assert_eq!(view.to_terminal(cx, cy), (43, 21));

        assert_eq!(view.slot_at(17, 29), Some(0));
        assert_eq!(view.slot_at(31, 30), None);
        assert_eq!(view.slot_at(32, 30), Some(1));
    }

    #[test]
    fn test_mouse_press_grabs_clicked_cell() {
        let mut app = playing_app();
        set_tray_piece(&mut app.session, 0, "I3");

        // I3 is drawn from column 21, row 32 in the first box
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 25, 32));
        let drag = app.session.interaction().drag().expect("dragging");
        assert_eq!(drag.index, 0);
        assert_eq!(drag.grab, (2, 0));

        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 20));
        let drag = app.session.interaction().drag().expect("still dragging");
        assert!(drag.preview.valid);
        // Grid column 2, row 3 is under the pointer; the grabbed cell is the third
        assert_eq!(drag.preview.origin, Some((0, 3)));

        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40, 20));
        assert!(app.session.interaction().is_idle());
        assert!(app.session.grid().is_occupied(0, 3));
        assert!(app.session.grid().is_occupied(2, 3));
        assert!(app.session.tray().get(0).is_some_and(|p| p.used));
    }

    #[test]
    fn test_resize_cancels_drag() {
        let mut app = playing_app();
        set_tray_piece(&mut app.session, 0, "1");
        assert!(app.session.begin_drag(0, (0, 0)));

        app.handle_event(&Event::Resize(100, 40));
        assert!(app.view.is_none());
        assert!(app.session.interaction().is_idle());

        // Without a view mouse input is ignored
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 25, 32));
        assert!(app.session.interaction().is_idle());
    }

    #[test]
    fn test_bell_on_line_clear() {
        let mut app = playing_app();
        assert!(!app.take_bell());

        for x in 0..7 {
            app.session.grid_mut().set_cell(x, 0, Some(Theme::new(1)));
        }
        set_tray_piece(&mut app.session, 0, "I3");
        assert!(app.session.begin_drag(0, (0, 0)));
        let (x, y) = app.session.layout().cell_center(7, 0);
        app.session.update_pointer(x, y);
        app.session.release_pointer();

        assert!(app.take_bell());
        // Cues are consumed
        assert!(!app.take_bell());

        app.advance(Duration::from_secs(1));
        assert_eq!(app.session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_small_terminal_pauses_play() {
        let mut app = playing_app();
        for x in 0..7 {
            app.session.grid_mut().set_cell(x, 0, Some(Theme::new(1)));
        }
        set_tray_piece(&mut app.session, 0, "I3");
        assert!(app.session.begin_drag(0, (0, 0)));
        let (x, y) = app.session.layout().cell_center(7, 0);
        app.session.update_pointer(x, y);
        app.session.release_pointer();
        assert!(app.session.interaction().clearing().is_some());

        app.handle_event(&Event::Resize(20, 10));
        assert!(app.is_paused());
        app.advance(Duration::from_secs(1));
        assert!(app.session.interaction().clearing().is_some());
        assert_eq!(app.session.grid().occupied_count(), 10);

        // The flash resumes once the board fits again
        app.view = BoardView::new(Rect::new(0, 0, 120, 50), *app.session.layout());
        assert!(!app.is_paused());
        app.advance(Duration::from_secs(1));
        assert!(app.session.interaction().is_idle());
        assert_eq!(app.session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_menu_is_not_paused_without_view() {
        let (session, _store) = create_test_session();
        let app = App::new(session, TICK_DT);
        assert!(app.view.is_none());
        assert!(!app.is_paused());
    }

    #[test]
    fn test_render_sets_view() {
        let mut app = playing_app();
        app.view = None;
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).expect("test terminal");

        terminal
            .draw(|f| ui::render(f, &mut app))
            .expect("draw succeeds");
        assert!(app.view.is_some());

        app.session.return_to_menu();
        terminal
            .draw(|f| ui::render(f, &mut app))
            .expect("draw succeeds");
        assert!(app.view.is_none());
    }
}
