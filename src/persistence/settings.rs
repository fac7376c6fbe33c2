#![warn(clippy::all, clippy::pedantic)]

use log::{info, warn};

use super::{Record, RecordStore, StoreError};
use crate::game::{
    DEFAULT_GRID_SIZE, DEFAULT_PLAYER_NAME, DEFAULT_TRAY_COUNT, GRID_SIZES, MAX_PLAYER_NAME_LEN,
    TRAY_MAX,
};

/// Tray count and grid size chosen in the menu. Applied at the next game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub tray_count: usize,
    pub grid_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tray_count: DEFAULT_TRAY_COUNT,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn is_valid(self) -> bool {
        (1..=TRAY_MAX).contains(&self.tray_count) && GRID_SIZES.contains(&self.grid_size)
    }

    /// 1 → 2 → … → `TRAY_MAX` → 1.
    pub fn cycle_tray_count(&mut self) {
        self.tray_count = self.tray_count % TRAY_MAX + 1;
    }

    /// Steps through the allowed grid sizes, wrapping around.
    pub fn cycle_grid_size(&mut self) {
        let next = GRID_SIZES
            .iter()
            .position(|&s| s == self.grid_size)
            .map_or(0, |i| (i + 1) % GRID_SIZES.len());
        self.grid_size = GRID_SIZES[next];
    }
}

/// Decodes `tray_count grid_size`. A missing, malformed or out-of-range field
/// gives the default settings for the whole record.
#[must_use]
pub fn parse_settings(text: &str) -> GameSettings {
    let mut tokens = text.split_whitespace().map(str::parse::<usize>);
    let (Some(Ok(tray_count)), Some(Ok(grid_size))) = (tokens.next(), tokens.next()) else {
        return GameSettings::default();
    };
    let settings = GameSettings {
        tray_count,
        grid_size,
    };
    if settings.is_valid() {
        settings
    } else {
        GameSettings::default()
    }
}

#[must_use]
pub fn format_settings(settings: GameSettings) -> String {
    format!("{} {}\n", settings.tray_count, settings.grid_size)
}

#[must_use]
pub fn load_settings(store: &dyn RecordStore) -> GameSettings {
    match store.read(Record::Settings) {
        Ok(Some(text)) => parse_settings(&text),
        Ok(None) => GameSettings::default(),
        Err(err) => {
            warn!("Failed to read settings: {err}");
            GameSettings::default()
        }
    }
}

pub fn save_settings(store: &mut dyn RecordStore, settings: GameSettings) -> Result<(), StoreError> {
    store.write(Record::Settings, &format_settings(settings))?;
    info!(
        "Settings saved: tray {} grid {}",
        settings.tray_count, settings.grid_size
    );
    Ok(())
}

/// First token, clipped to the name length limit. Empty input gives the default name.
#[must_use]
pub fn parse_player_name(text: &str) -> String {
    text.split_whitespace()
        .next()
        .map(|t| t.chars().take(MAX_PLAYER_NAME_LEN).collect::<String>())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
}

#[must_use]
pub fn load_player_name(store: &dyn RecordStore) -> String {
    match store.read(Record::PlayerName) {
        Ok(Some(text)) => parse_player_name(&text),
        Ok(None) => DEFAULT_PLAYER_NAME.to_string(),
        Err(err) => {
            warn!("Failed to read player name: {err}");
            DEFAULT_PLAYER_NAME.to_string()
        }
    }
}

pub fn save_player_name(store: &mut dyn RecordStore, name: &str) -> Result<(), StoreError> {
    store.write(Record::PlayerName, &format!("{}\n", parse_player_name(name)))
}

/// `1` is on, `0` is off; anything unreadable counts as on.
#[must_use]
pub fn parse_sound_state(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .and_then(|t| t.parse::<i64>().ok())
        .is_none_or(|v| v != 0)
}

/// Reads the sound toggle. An absent record is created with the default (on).
pub fn load_sound_state(store: &mut dyn RecordStore) -> bool {
    match store.read(Record::SoundState) {
        Ok(Some(text)) => parse_sound_state(&text),
        Ok(None) => {
            if let Err(err) = save_sound_state(store, true) {
                warn!("Failed to write default sound state: {err}");
            }
            true
        }
        Err(err) => {
            warn!("Failed to read sound state: {err}");
            true
        }
    }
}

pub fn save_sound_state(store: &mut dyn RecordStore, on: bool) -> Result<(), StoreError> {
    store.write(Record::SoundState, if on { "1\n" } else { "0\n" })?;
    info!("Sound state saved: {}", u8::from(on));
    Ok(())
}
