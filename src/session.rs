#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when converting grid sizes to canvas pixels
    clippy::cast_precision_loss
)]

use log::{debug, info, warn};

use crate::animation::{ClearFlash, DragState, DropPreview, Interaction, PopTimers, ReturnAnim};
use crate::bag::Bag;
use crate::components::{GameEvent, GamePhase, StartMode, Theme};
use crate::game::{
    BONUS_PARTICLES, DEFAULT_PLAYER_NAME, FILL_MAX, FILL_MIN, MAX_PLAYER_NAME_LEN,
    PARTICLES_CAP_PER_CLEAR, PARTICLES_PER_CLEARED_CELL, PLACE_POP_TIME,
};
use crate::grid::{ClearMask, Grid};
use crate::layout::BoardLayout;
use crate::particles::ParticlePool;
use crate::persistence::RecordStore;
use crate::persistence::highscores::{self, HighScoreEntry, HighScoreTable};
use crate::persistence::settings::{self, GameSettings};
use crate::popups::{self, BonusPopups, ComboPopup};
use crate::rng::RandomSource;
use crate::scoring::{MoveScore, ScoreState};
use crate::screenshake::ScreenShake;
use crate::tray::Tray;

// Gap between the bottom of the grid and a bonus popup
const BONUS_POPUP_OFFSET_Y: f32 = 5.0;
// A combo banner appears only when the multiplier grows by more than this
const MULT_EPSILON: f32 = 0.001;

/// What a release did with the dragged piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// Nothing was being dragged.
    NotDragging,
    /// The slot had already been placed.
    AlreadyUsed,
    /// The preview was invalid; the piece glides back to the tray.
    Returned,
    Placed { lines: usize, score: MoveScore },
}

pub struct Session {
    phase: GamePhase,
    start_mode: StartMode,
    settings: GameSettings,
    sound_on: bool,

    grid: Grid,
    layout: BoardLayout,
    tray: Tray,
    bag: Bag,
    score: ScoreState,

    interaction: Interaction,
    pointer: (f32, f32),
    pops: PopTimers,
    particles: ParticlePool,
    bonus_popups: BonusPopups,
    combo_popup: Option<ComboPopup>,
    shake: ScreenShake,

    high_scores: HighScoreTable,
    player_name: String,
    last_player_name: String,
    editing_name: bool,

    events: Vec<GameEvent>,
    rng: Box<dyn RandomSource>,
    store: Box<dyn RecordStore>,
}

impl Session {
    /// Creates a session in the menu, loading persisted records from `store`.
    pub fn new(rng: Box<dyn RandomSource>, mut store: Box<dyn RecordStore>) -> Self {
        let settings = settings::load_settings(store.as_ref());
        let sound_on = settings::load_sound_state(store.as_mut());
        let last_player_name = settings::load_player_name(store.as_ref());
        let high_scores = highscores::load(store.as_ref());

        let size = settings.grid_size;
        Self {
            phase: GamePhase::Menu,
            start_mode: StartMode::Empty,
            settings,
            sound_on,
            grid: Grid::new(size, size),
            layout: BoardLayout::new(size, size, settings.tray_count),
            tray: Tray::new(settings.tray_count),
            bag: Bag::new(),
            score: ScoreState::with_high_score(high_scores.best_score()),
            interaction: Interaction::Idle,
            pointer: (0.0, 0.0),
            pops: PopTimers::default(),
            particles: ParticlePool::default(),
            bonus_popups: BonusPopups::default(),
            combo_popup: None,
            shake: ScreenShake::default(),
            high_scores,
            player_name: last_player_name.clone(),
            last_player_name,
            editing_name: false,
            events: Vec::new(),
            rng,
            store,
        }
    }

    /// Starts a new game with the current menu settings.
    pub fn start_game(&mut self, mode: StartMode) {
        let size = self.settings.grid_size;
        self.grid.reset(size, size);
        self.tray = Tray::new(self.settings.tray_count);
        self.layout = BoardLayout::new(size, size, self.settings.tray_count);

        self.phase = GamePhase::Play;
        self.start_mode = mode;
        let high_score = self.score.high_score.max(self.high_scores.best_score());
        self.score = ScoreState::with_high_score(high_score);
        self.combo_popup = None;

        self.interaction = Interaction::Idle;
        self.pops.clear();
        self.bag.reset();

        if mode == StartMode::PartiallyFilled {
            let count = self.rng.range_inclusive(FILL_MIN, FILL_MAX);
            let filled = self.grid.random_fill(count, self.rng.as_mut());
            let mask = self.grid.build_clear_mask();
            if !mask.is_empty() {
                self.grid.apply_clear_mask(&mask);
            }
            debug!("Pre-filled {filled} cells, removed {} lines", mask.lines());
        }

        self.tray
            .refill(&mut self.bag, self.score.score, self.rng.as_mut());

        self.shake.reset();
        self.particles.clear();
        self.bonus_popups.clear();
        self.player_name.clone_from(&self.last_player_name);
        self.editing_name = false;

        info!(
            "Game started: {size}x{size} grid, {} tray slots, {mode:?}",
            self.settings.tray_count
        );

        if self.tray.none_placeable(&self.grid) {
            self.set_gameover("none of the starting pieces can be placed");
        }
    }

    /// Ends the game and opens name entry. The score is recorded once the name is confirmed.
    pub fn set_gameover(&mut self, reason: &str) {
        if self.player_name.is_empty() {
            self.player_name.clone_from(&self.last_player_name);
        }
        if self.player_name.is_empty() {
            self.player_name = DEFAULT_PLAYER_NAME.to_string();
        }

        self.editing_name = true;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        info!("Game over: {reason} (score {})", self.score.score);
    }

    // Pointer input

    /// Handles a press at canvas `(x, y)`: picks up the unused tray piece under it.
    pub fn press_pointer(&mut self, x: f32, y: f32) -> bool {
        self.pointer = (x, y);
        if self.phase != GamePhase::Play || !self.interaction.is_idle() {
            return false;
        }
        let Some(index) = self.layout.tray_slot_at(x, y) else {
            return false;
        };
        let Some(piece) = self.tray.get(index).filter(|p| !p.used) else {
            return false;
        };

        let rect = self.layout.tray_slot_rect(index);
        let grab = self.layout.grab_cell(piece.shape(), x - rect.x, y - rect.y);
        self.begin_drag(index, grab)
    }

    /// Starts dragging tray slot `index`, holding shape cell `grab` under the pointer.
    ///
    /// Refused outside play, while another interaction is running, or for a used slot.
    pub fn begin_drag(&mut self, index: usize, grab: (usize, usize)) -> bool {
        if self.phase != GamePhase::Play || !self.interaction.is_idle() {
            return false;
        }
        if !self.tray.get(index).is_some_and(|p| !p.used) {
            return false;
        }

        self.interaction = Interaction::Dragging(DragState {
            index,
            grab,
            pointer: self.pointer,
            preview: DropPreview::default(),
        });
        self.events.push(GameEvent::Select);
        self.refresh_preview(true);
        true
    }

    /// Moves the pointer; while dragging this re-evaluates the drop preview.
    pub fn update_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
        if let Interaction::Dragging(drag) = &mut self.interaction {
            drag.pointer = (x, y);
            self.refresh_preview(false);
        }
    }

    pub fn release_pointer(&mut self) -> DropOutcome {
        self.try_drop()
    }

    fn refresh_preview(&mut self, force: bool) {
        let Interaction::Dragging(drag) = &mut self.interaction else {
            return;
        };
        let Some(piece) = self.tray.get(drag.index).filter(|p| !p.used) else {
            drag.preview = DropPreview::default();
            return;
        };

        let origin = self
            .layout
            .point_to_cell(drag.pointer.0, drag.pointer.1)
            .map(|(cx, cy)| {
                (
                    cx - i32::try_from(drag.grab.0).unwrap_or(0),
                    cy - i32::try_from(drag.grab.1).unwrap_or(0),
                )
            });
        if !force && origin == drag.preview.origin {
            return;
        }

        drag.preview = match origin {
            Some((x, y)) if self.grid.can_place(piece.shape(), x, y) => DropPreview {
                origin,
                valid: true,
                predicted: Some(self.grid.predict_clear(piece.shape(), x, y)),
            },
            _ => DropPreview {
                origin,
                valid: false,
                predicted: None,
            },
        };
    }

    /// Drops the dragged piece at its preview position, or sends it back to the tray.
    pub fn try_drop(&mut self) -> DropOutcome {
        let drag = match std::mem::take(&mut self.interaction) {
            Interaction::Dragging(drag) => drag,
            other => {
                self.interaction = other;
                return DropOutcome::NotDragging;
            }
        };

        let old_mult = self.score.last_move_mult;
        let Some(piece) = self.tray.get(drag.index).copied() else {
            return DropOutcome::NotDragging;
        };
        if piece.used {
            self.events.push(GameEvent::SendToTray);
            return DropOutcome::AlreadyUsed;
        }
        let (ox, oy) = match drag.preview.origin {
            Some(origin) if drag.preview.valid => origin,
            _ => {
                self.events.push(GameEvent::SendToTray);
                let end = self.layout.tray_slot_rect(drag.index).center();
                self.interaction =
                    Interaction::Returning(ReturnAnim::new(drag.index, drag.grab, drag.pointer, end));
                return DropOutcome::Returned;
            }
        };

        self.events.push(GameEvent::Place);
        let shape = piece.shape();
        self.grid.place(shape, ox, oy, Some(piece.theme));

        let mut placed = 0;
        for (sx, sy) in shape.filled_cells() {
            placed += 1;
            let gx = ox + i32::try_from(sx).unwrap_or(0);
            let gy = oy + i32::try_from(sy).unwrap_or(0);
            if let (Ok(gx), Ok(gy)) = (usize::try_from(gx), usize::try_from(gy)) {
                self.pops.start(gx, gy, PLACE_POP_TIME);
            }
        }

        let mask = self.grid.build_clear_mask();
        let lines = mask.lines();
        let cleared = if lines > 0 {
            self.events.push(GameEvent::BreakLines);
            self.grid.count_cells_in_mask(&mask)
        } else {
            0
        };

        let score = self.score.score_move(placed, lines, cleared);

        if lines > 0 && score.multiplier > old_mult + MULT_EPSILON {
            self.start_combo_popup(score.multiplier, piece.theme);
        }

        if lines > 0 {
            self.spawn_clear_particles(&mask, piece.theme);
            if score.clear_gain > 0 {
                let grid = self.layout.grid_rect();
                let bx = grid.x + grid.w;
                let by = grid.y + grid.h + BONUS_POPUP_OFFSET_Y;
                self.bonus_popups
                    .spawn(bx, by, score.clear_gain, score.multiplier, piece.theme);
                self.particles
                    .spawn(bx, by, piece.theme, BONUS_PARTICLES, self.rng.as_mut());
            }
            debug!(
                "Cleared {lines} lines ({cleared} cells) for {} points at x{:.0}",
                score.clear_gain, score.multiplier
            );
            self.interaction = Interaction::Clearing(ClearFlash::new(mask));
        }

        self.shake.trigger_for_lines(lines);

        self.tray.mark_used(drag.index);
        if self.tray.all_used() {
            self.tray
                .refill(&mut self.bag, self.score.score, self.rng.as_mut());
        }

        if self.interaction.clearing().is_none() && self.tray.none_placeable(&self.grid) {
            self.set_gameover("none of the offered pieces can be placed");
        }

        DropOutcome::Placed { lines, score }
    }

    fn spawn_clear_particles(&mut self, mask: &ClearMask, theme: Theme) {
        let mut spawned = 0;
        'rows: for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if !mask.contains(x, y) || !self.grid.is_occupied(x, y) {
                    continue;
                }
                let n = PARTICLES_PER_CLEARED_CELL.min(PARTICLES_CAP_PER_CLEAR - spawned);
                if n == 0 {
                    break 'rows;
                }
                let (cx, cy) = self.layout.cell_center(x, y);
                self.particles.spawn(cx, cy, theme, n, self.rng.as_mut());
                spawned += n;
            }
        }
    }

    fn start_combo_popup(&mut self, mult: f32, theme: Theme) {
        let popup = ComboPopup::new(&self.layout, mult, self.score.combo, theme);
        let (count, spread) = popups::combo_burst(mult);
        self.particles
            .spawn_spread(popup.x, popup.y, theme, count, spread, self.rng.as_mut());
        self.combo_popup = Some(popup);
    }

    fn finish_clear(&mut self) {
        if let Interaction::Clearing(flash) = std::mem::take(&mut self.interaction) {
            self.grid.apply_clear_mask(&flash.mask);
        }
        if self.phase == GamePhase::Play && self.tray.none_placeable(&self.grid) {
            self.set_gameover("none of the offered pieces can be placed after the clear");
        }
    }

    /// Drops any drag or return in flight. A clear flash is left to finish.
    pub fn cancel_interaction(&mut self) {
        if matches!(
            self.interaction,
            Interaction::Dragging(_) | Interaction::Returning(_)
        ) {
            self.interaction = Interaction::Idle;
        }
        self.combo_popup = None;
    }

    /// Advances every timer by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.shake.tick(dt, self.rng.as_mut());
        self.particles.tick(dt);
        self.bonus_popups.tick(dt);
        self.pops.tick(dt);

        let clear_done = match &mut self.interaction {
            Interaction::Clearing(flash) => flash.tick(dt),
            _ => false,
        };
        if clear_done {
            self.finish_clear();
        }

        if let Interaction::Returning(anim) = &mut self.interaction {
            if anim.tick(dt) {
                self.interaction = Interaction::Idle;
            }
        }

        if let Some(popup) = &mut self.combo_popup {
            if !popup.tick(dt) {
                self.combo_popup = None;
            }
        }

        if self.phase == GamePhase::Play {
            self.refresh_preview(false);
        }
    }

    // Name entry

    /// Appends a letter to the name being edited. Other characters are ignored.
    pub fn type_name_char(&mut self, c: char) {
        if self.editing_name
            && c.is_ascii_alphabetic()
            && self.player_name.chars().count() < MAX_PLAYER_NAME_LEN
        {
            self.player_name.push(c.to_ascii_uppercase());
        }
    }

    pub fn backspace_name(&mut self) {
        if self.editing_name {
            self.player_name.pop();
        }
    }

    /// Confirms the edited name and records the score.
    pub fn confirm_typed_name(&mut self) -> Option<usize> {
        let name = self.player_name.clone();
        self.confirm_name(&name)
    }

    /// Records the score under `name` and remembers it as the default name.
    ///
    /// The table is re-read from the store first so entries written by
    /// another run are kept. Returns the table position, if the score made it.
    pub fn confirm_name(&mut self, name: &str) -> Option<usize> {
        if self.phase != GamePhase::GameOver || !self.editing_name {
            return None;
        }
        let name = settings::parse_player_name(name);

        let mut table = highscores::load(self.store.as_ref());
        let position = table.insert(HighScoreEntry {
            grid_w: self.grid.width(),
            grid_h: self.grid.height(),
            tray_count: self.tray.count(),
            score: self.score.score,
            highest_combo: self.score.highest_combo,
            name: name.clone(),
        });
        if let Err(err) = highscores::save(self.store.as_mut(), &table) {
            warn!("Failed to save high scores: {err}");
        }
        if let Err(err) = settings::save_player_name(self.store.as_mut(), &name) {
            warn!("Failed to save player name: {err}");
        }

        self.score.high_score = self.score.high_score.max(table.best_score());
        self.high_scores = table;
        self.player_name.clone_from(&name);
        self.last_player_name = name;
        self.editing_name = false;
        position
    }

    /// Goes back to the menu from play, or from game over once the name is confirmed.
    pub fn return_to_menu(&mut self) -> bool {
        let allowed = match self.phase {
            GamePhase::Menu => false,
            GamePhase::Play => true,
            GamePhase::GameOver => !self.editing_name,
        };
        if allowed {
            self.interaction = Interaction::Idle;
            self.combo_popup = None;
            self.phase = GamePhase::Menu;
            self.events.push(GameEvent::Select);
        }
        allowed
    }

    // Menu settings

    pub fn cycle_tray_setting(&mut self) {
        self.settings.cycle_tray_count();
        self.save_settings();
    }

    pub fn cycle_grid_setting(&mut self) {
        self.settings.cycle_grid_size();
        self.save_settings();
    }

    fn save_settings(&mut self) {
        self.events.push(GameEvent::Select);
        if let Err(err) = settings::save_settings(self.store.as_mut(), self.settings) {
            warn!("Failed to save settings: {err}");
        }
    }

    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
        if let Err(err) = settings::save_sound_state(self.store.as_mut(), self.sound_on) {
            warn!("Failed to save sound state: {err}");
        }
    }

    /// Takes the sound cues emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // Read surface

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn start_mode(&self) -> StartMode {
        self.start_mode
    }

    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    #[must_use]
    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    #[must_use]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    #[must_use]
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    #[must_use]
    pub fn pops(&self) -> &PopTimers {
        &self.pops
    }

    #[must_use]
    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    #[must_use]
    pub fn bonus_popups(&self) -> &BonusPopups {
        &self.bonus_popups
    }

    #[must_use]
    pub fn combo_popup(&self) -> Option<&ComboPopup> {
        self.combo_popup.as_ref()
    }

    #[must_use]
    pub fn shake(&self) -> &ScreenShake {
        &self.shake
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn is_editing_name(&self) -> bool {
        self.editing_name
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn tray_mut(&mut self) -> &mut Tray {
        &mut self.tray
    }

    #[cfg(test)]
    pub(crate) fn score_mut(&mut self) -> &mut ScoreState {
        &mut self.score
    }
}
