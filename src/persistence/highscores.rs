#![warn(clippy::all, clippy::pedantic)]

use log::{info, warn};

use super::{Record, RecordStore, StoreError};
use crate::game::{
    DEFAULT_GRID_SIZE, DEFAULT_PLAYER_NAME, DEFAULT_TRAY_COUNT, MAX_HIGH_SCORES,
    MAX_PLAYER_NAME_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub grid_w: usize,
    pub grid_h: usize,
    pub tray_count: usize,
    pub score: u64,
    pub highest_combo: u32,
    pub name: String,
}

impl HighScoreEntry {
    /// An entry for a default-sized game (10×10 grid, four tray slots).
    #[must_use]
    pub fn with_defaults(score: u64, highest_combo: u32, name: &str) -> Self {
        Self {
            grid_w: DEFAULT_GRID_SIZE,
            grid_h: DEFAULT_GRID_SIZE,
            tray_count: DEFAULT_TRAY_COUNT,
            score,
            highest_combo,
            name: clean_name(name),
        }
    }
}

/// Entries sorted by descending score, at most [`MAX_HIGH_SCORES`] long.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from unordered entries: stable sort, then truncate.
    #[must_use]
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top score, zero for an empty table.
    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Inserts below every entry with an equal or higher score.
    /// Returns the position, or `None` when the score does not make the table.
    pub fn insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(pos)
    }
}

/// Clips a stored name to its first token and the name length limit.
fn clean_name(raw: &str) -> String {
    let name: String = raw
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .take(MAX_PLAYER_NAME_LEN)
        .collect();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name
    }
}

/// Parses a stored integer, clamping negative values to zero.
fn parse_count<T: TryFrom<u64>>(token: &str) -> Option<T> {
    let value: i64 = token.parse().ok()?;
    T::try_from(u64::try_from(value.max(0)).ok()?).ok()
}

type LineDecoder = fn(&[&str]) -> Option<HighScoreEntry>;

// `grid_w grid_h tray_count score highest_combo name`
fn decode_full(tokens: &[&str]) -> Option<HighScoreEntry> {
    let [gw, gh, tc, score, combo, name, ..] = tokens else {
        return None;
    };
    Some(HighScoreEntry {
        grid_w: parse_count(gw)?,
        grid_h: parse_count(gh)?,
        tray_count: parse_count(tc)?,
        score: parse_count(score)?,
        highest_combo: parse_count(combo)?,
        name: clean_name(name),
    })
}

// `score highest_combo [name]`
fn decode_short(tokens: &[&str]) -> Option<HighScoreEntry> {
    let [score, combo, rest @ ..] = tokens else {
        return None;
    };
    Some(HighScoreEntry::with_defaults(
        parse_count(score)?,
        parse_count(combo)?,
        rest.first().copied().unwrap_or(""),
    ))
}

// Tried in order; the first decoder that accepts a line wins.
const LINE_DECODERS: [LineDecoder; 2] = [decode_full, decode_short];

fn decode_line(line: &str) -> Option<HighScoreEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    LINE_DECODERS.iter().find_map(|decode| decode(&tokens))
}

/// Decodes the scores record. Reading stops at the first line no decoder accepts.
#[must_use]
pub fn parse_scores(text: &str) -> HighScoreTable {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(count) = lines
        .next()
        .and_then(|l| l.split_whitespace().next())
        .and_then(|t| t.parse::<i64>().ok())
    else {
        return HighScoreTable::new();
    };
    let count = usize::try_from(count.max(0))
        .unwrap_or(0)
        .min(MAX_HIGH_SCORES);

    let entries = lines.take(count).map_while(decode_line).collect();
    HighScoreTable::from_entries(entries)
}

/// Decodes the legacy single-score record: `score [highest_combo]`.
#[must_use]
pub fn parse_legacy(text: &str) -> Option<HighScoreTable> {
    let mut tokens = text.split_whitespace();
    let score = parse_count(tokens.next()?)?;
    let combo = tokens.next().and_then(parse_count).unwrap_or(0);
    Some(HighScoreTable::from_entries(vec![
        HighScoreEntry::with_defaults(score, combo, DEFAULT_PLAYER_NAME),
    ]))
}

#[must_use]
pub fn format_scores(table: &HighScoreTable) -> String {
    let mut out = format!("{}\n", table.len());
    for e in table.entries() {
        out.push_str(&format!(
            "{} {} {} {} {} {}\n",
            e.grid_w,
            e.grid_h,
            e.tray_count,
            e.score,
            e.highest_combo,
            clean_name(&e.name)
        ));
    }
    out
}

fn read_or_warn(store: &dyn RecordStore, record: Record) -> Option<String> {
    store.read(record).unwrap_or_else(|err| {
        warn!("Failed to read {}: {err}", record.file_name());
        None
    })
}

/// Loads the table, falling back to the legacy record and then to an empty table.
#[must_use]
pub fn load(store: &dyn RecordStore) -> HighScoreTable {
    let table = if let Some(text) = read_or_warn(store, Record::Scores) {
        parse_scores(&text)
    } else if let Some(text) = read_or_warn(store, Record::LegacyHighScore) {
        parse_legacy(&text).unwrap_or_default()
    } else {
        info!("No scores file yet");
        return HighScoreTable::new();
    };

    info!("Loaded {} high scores", table.len());
    table
}

pub fn save(store: &mut dyn RecordStore, table: &HighScoreTable) -> Result<(), StoreError> {
    store.write(Record::Scores, &format_scores(table))?;
    info!("Saved {} high scores", table.len());
    Ok(())
}
