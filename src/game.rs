#![warn(clippy::all, clippy::pedantic)]

// Grid dimensions
pub const GRID_MAX: usize = 20; // Upper bound for both grid width and height
pub const GRID_SIZES: [usize; 3] = [10, 15, 20];
pub const DEFAULT_GRID_SIZE: usize = 10;

// Tray
pub const TRAY_MAX: usize = 4;
pub const DEFAULT_TRAY_COUNT: usize = 4;

// Fixed simulation step
pub const REFRESH_RATE: f32 = 30.0;
pub const TICK_DT: f32 = 1.0 / REFRESH_RATE;

// Difficulty weighting: the shape picker reaches full difficulty at this score
pub const DIFFICULTY_MAX_SCORE: u64 = 75_000;
pub const MIN_DIFFICULTY_WEIGHT: f32 = 0.01; // Floor so no shape ever becomes impossible

// Scoring
pub const POINTS_PER_CELL: u64 = 1; // Per cell placed on the grid
pub const POINTS_PER_CLEAR: u64 = 10; // Per cell removed by a clear
pub const LINE_BONUS: u64 = 25; // Per completed row or column
pub const MULTILINE_BONUS: u64 = 50; // Per extra line beyond the first in one move
pub const MAX_MULTIPLIER: f32 = 20.0;
pub const COMBO_MISS_LIMIT: u32 = 3; // Non-clearing moves tolerated before the combo breaks

// Partially filled start mode
pub const FILL_MIN: usize = 16;
pub const FILL_MAX: usize = 28;
pub const FILL_MAX_TRIES: usize = 5000;

// Animation timings (seconds)
pub const PLACE_POP_TIME: f32 = 0.18;
pub const CLEAR_FLASH_TIME: f32 = 0.22;
pub const RETURN_TIME: f32 = 0.22;

// Bag randomizer
pub const BAG_SIZE: usize = 24;

// Particles
pub const MAX_PARTICLES: usize = 1000;
pub const PARTICLE_LIFE_MIN: f32 = 0.30;
pub const PARTICLE_LIFE_MAX: f32 = 0.60;
pub const PARTICLE_SPEED_MIN: f32 = 90.0;
pub const PARTICLE_SPEED_MAX: f32 = 220.0;
pub const PARTICLE_SIZE_MIN: f32 = 3.5;
pub const PARTICLE_SIZE_MAX: f32 = 7.0;
pub const PARTICLE_GRAVITY: f32 = 520.0;
pub const PARTICLE_DRAG_X: f32 = 0.9;
pub const PARTICLE_DRAG_Y: f32 = 0.2;
pub const PARTICLES_PER_CLEARED_CELL: usize = 15;
pub const PARTICLES_CAP_PER_CLEAR: usize = 500;

// Screen shake
pub const SHAKE_TIME: f32 = 0.22;
pub const SHAKE_STRENGTH: f32 = 7.0;
pub const SHAKE_MULTILINE_BOOST: f32 = 1.6;

// Bonus popups
pub const MAX_BONUS_POPUPS: usize = 24;
pub const BONUS_LIFE: f32 = 1.75;
pub const BONUS_RISE_SPEED: f32 = 55.0;
pub const BONUS_PARTICLES: usize = 50;

// Combo popup
pub const COMBO_POP_LIFE: f32 = 1.75;
pub const COMBO_POP_PARTICLES_BASE: usize = 50;
pub const COMBO_POP_PARTICLES_MAX: usize = 220;

// High scores and player name
pub const MAX_HIGH_SCORES: usize = 5;
pub const MAX_PLAYER_NAME_LEN: usize = 5;
pub const DEFAULT_PLAYER_NAME: &str = "PLAYR";

// Persisted record file names
pub const SCORES_FILENAME: &str = "blockblaster_scores.txt";
pub const LEGACY_HIGHSCORE_FILENAME: &str = "blockblaster_highscore.txt";
pub const PLAYER_NAME_FILENAME: &str = "blockblaster_playername.txt";
pub const SOUND_STATE_FILENAME: &str = "blockblaster_sound_state.txt";
pub const SETTINGS_FILENAME: &str = "blockblaster_settings.txt";
