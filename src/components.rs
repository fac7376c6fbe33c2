#![warn(clippy::all, clippy::pedantic)]

use ratatui::style::Color;

use crate::rng::RandomSource;

/// Number of colour themes in the palette.
pub const THEME_COUNT: usize = 8;

// (fill, stroke) pairs: a bright fill and a near-black outline.
const PALETTE: [((u8, u8, u8), (u8, u8, u8)); THEME_COUNT] = [
    ((120, 190, 255), (18, 18, 26)),
    ((255, 220, 110), (26, 20, 14)),
    ((160, 240, 170), (18, 26, 18)),
    ((255, 140, 160), (26, 18, 22)),
    ((190, 160, 255), (20, 18, 26)),
    ((255, 180, 120), (26, 20, 18)),
    ((140, 240, 240), (16, 24, 26)),
    ((240, 240, 140), (26, 26, 18)),
];

/// Colour identity of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Theme(u8);

impl Theme {
    /// Theme at `index`, wrapping around the palette.
    #[must_use]
    pub fn new(index: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((index % THEME_COUNT) as u8)
    }

    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::new(rng.range_inclusive(0, THEME_COUNT - 1))
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn fill_rgb(self) -> (u8, u8, u8) {
        PALETTE[self.index()].0
    }

    #[must_use]
    pub fn stroke_rgb(self) -> (u8, u8, u8) {
        PALETTE[self.index()].1
    }

    #[must_use]
    pub fn fill(self) -> Color {
        let (r, g, b) = self.fill_rgb();
        Color::Rgb(r, g, b)
    }

    #[must_use]
    pub fn stroke(self) -> Color {
        let (r, g, b) = self.stroke_rgb();
        Color::Rgb(r, g, b)
    }
}

/// Top-level flow state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Play,
    GameOver,
}

/// How the grid is prepared when a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    #[default]
    Empty,
    PartiallyFilled,
}

/// Sound cues emitted by the core. Front ends decide how (and whether) to play them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Select,
    Place,
    SendToTray,
    BreakLines,
    GameOver,
}
