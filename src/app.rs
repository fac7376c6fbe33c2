#![warn(clippy::all, clippy::pedantic)]

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};

use crate::FrameClock;
use crate::components::{GameEvent, GamePhase, StartMode};
use crate::persistence::settings::GameSettings;
use crate::session::Session;
use crate::ui::BoardView;

pub type AppResult<T> = anyhow::Result<T>;

/// Entries of the main menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartEmpty,
    StartFilled,
    TrayCount,
    GridSize,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 6] = [
        MenuItem::StartEmpty,
        MenuItem::StartFilled,
        MenuItem::TrayCount,
        MenuItem::GridSize,
        MenuItem::Sound,
        MenuItem::Quit,
    ];

    #[must_use]
    pub fn label(self, settings: GameSettings, sound_on: bool) -> String {
        match self {
            MenuItem::StartEmpty => "Play".to_string(),
            MenuItem::StartFilled => "Play (partially filled)".to_string(),
            MenuItem::TrayCount => format!("Tray pieces: {}", settings.tray_count),
            MenuItem::GridSize => format!("Grid: {0}x{0}", settings.grid_size),
            MenuItem::Sound => format!("Sound: {}", if sound_on { "on" } else { "off" }),
            MenuItem::Quit => "Quit".to_string(),
        }
    }
}

pub struct App {
    pub session: Session,
    pub should_quit: bool,
    pub menu_selected: usize,
    /// Board placement of the last rendered frame. `None` when no board is visible.
    pub view: Option<BoardView>,
    clock: FrameClock,
}

impl App {
    #[must_use]
    pub fn new(session: Session, tick_dt: f32) -> Self {
        Self {
            session,
            should_quit: false,
            menu_selected: 0,
            view: None,
            clock: FrameClock::new(tick_dt),
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_selected.min(MenuItem::ALL.len() - 1)]
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(w, h) => {
                debug!("Terminal resized to {w}x{h}");
                self.session.cancel_interaction();
                self.view = None;
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only presses and repeats; some terminals also report releases
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.session.phase() {
            GamePhase::Menu => self.handle_menu_key(key.code),
            GamePhase::Play => match key.code {
                KeyCode::Esc => {
                    self.session.return_to_menu();
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            GamePhase::GameOver if self.session.is_editing_name() => match key.code {
                KeyCode::Char(c) => self.session.type_name_char(c),
                KeyCode::Backspace => self.session.backspace_name(),
                KeyCode::Enter => {
                    let position = self.session.confirm_typed_name();
                    info!("Name confirmed, table position {position:?}");
                }
                _ => {}
            },
            GamePhase::GameOver => match key.code {
                KeyCode::Enter | KeyCode::Esc => {
                    self.session.return_to_menu();
                }
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let count = MenuItem::ALL.len();
        match code {
            KeyCode::Up | KeyCode::Char('w' | 'k') => {
                self.menu_selected = (self.menu_selected + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('s' | 'j') => {
                self.menu_selected = (self.menu_selected + 1) % count;
            }
            KeyCode::Left | KeyCode::Right => match self.selected_item() {
                MenuItem::TrayCount => self.session.cycle_tray_setting(),
                MenuItem::GridSize => self.session.cycle_grid_setting(),
                MenuItem::Sound => self.session.toggle_sound(),
                _ => {}
            },
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.selected_item()),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::StartEmpty => self.session.start_game(StartMode::Empty),
            MenuItem::StartFilled => self.session.start_game(StartMode::PartiallyFilled),
            MenuItem::TrayCount => self.session.cycle_tray_setting(),
            MenuItem::GridSize => self.session.cycle_grid_setting(),
            MenuItem::Sound => self.session.toggle_sound(),
            MenuItem::Quit => self.should_quit = true,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(view) = self.view else {
            return;
        };
        let (x, y) = view.to_canvas(mouse.column, mouse.row, self.session.tray());

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.session.update_pointer(x, y);
                if self.session.press_pointer(x, y) {
                    debug!("Picked up a piece at ({x:.0}, {y:.0})");
                }
            }
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.session.update_pointer(x, y);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.session.update_pointer(x, y);
                let outcome = self.session.release_pointer();
                debug!("Drop at ({x:.0}, {y:.0}): {outcome:?}");
            }
            _ => {}
        }
    }

    /// Runs every fixed tick that is due by the wall clock.
    pub fn on_tick(&mut self) {
        let steps = self.clock.update();
        self.run_steps(steps);
    }

    /// Runs the ticks due after `elapsed` of game time.
    pub fn advance(&mut self, elapsed: Duration) {
        let steps = self.clock.advance(elapsed);
        self.run_steps(steps);
    }

    /// True while a game is running but the terminal is too small to show it.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.view.is_none() && self.session.phase() == GamePhase::Play
    }

    // The clock keeps running so no backlog builds up while paused
    fn run_steps(&mut self, steps: u32) {
        if self.is_paused() {
            return;
        }
        let dt = self.clock.step_seconds();
        for _ in 0..steps {
            self.session.tick(dt);
        }
    }

    #[must_use]
    pub fn until_next_tick(&self) -> Duration {
        self.clock.until_next_step()
    }

    /// Drains the session's sound cues. True when the bell should ring.
    pub fn take_bell(&mut self) -> bool {
        let events = self.session.drain_events();
        if !events.is_empty() {
            debug!("Sound cues: {events:?}");
        }
        self.session.sound_on() && events.contains(&GameEvent::BreakLines)
    }
}
