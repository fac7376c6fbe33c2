pub mod loader;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::game::REFRESH_RATE;

// Save directory used when the platform has no data directory
const FALLBACK_SAVE_DIR: &str = "DATA";

/// Application config, read from `config.toml`.
///
/// Game settings, the sound toggle and the player name are not part of it;
/// those live in the persisted records under [`StorageConfig::save_dir`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub gameplay: GameplayConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Fixed seed for reproducible sessions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Simulation ticks per second.
    pub frame_rate: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: REFRESH_RATE,
        }
    }
}

impl Config {
    /// Directory holding the persisted records.
    #[must_use]
    pub fn save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.save_dir {
            return dir.clone();
        }
        dirs::data_dir().map_or_else(
            || PathBuf::from(FALLBACK_SAVE_DIR),
            |dir| dir.join("blockblaster"),
        )
    }

    /// Seconds per simulation tick. A non-positive frame rate falls back to the default.
    #[must_use]
    pub fn tick_dt(&self) -> f32 {
        let rate = self.display.frame_rate;
        if rate.is_finite() && rate > 0.0 {
            1.0 / rate
        } else {
            1.0 / REFRESH_RATE
        }
    }
}
