#![warn(clippy::all, clippy::pedantic)]

pub mod highscores;
pub mod settings;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::game::{
    LEGACY_HIGHSCORE_FILENAME, PLAYER_NAME_FILENAME, SCORES_FILENAME, SETTINGS_FILENAME,
    SOUND_STATE_FILENAME,
};

/// The persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Record {
    Scores,
    /// Single-score file written by old versions. Read only.
    LegacyHighScore,
    PlayerName,
    SoundState,
    Settings,
}

impl Record {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Record::Scores => SCORES_FILENAME,
            Record::LegacyHighScore => LEGACY_HIGHSCORE_FILENAME,
            Record::PlayerName => PLAYER_NAME_FILENAME,
            Record::SoundState => SOUND_STATE_FILENAME,
            Record::Settings => SETTINGS_FILENAME,
        }
    }
}

/// Read/write access to whole records.
pub trait RecordStore {
    /// Contents of `record`, or `None` if it has never been written.
    fn read(&self, record: Record) -> Result<Option<String>, StoreError>;

    /// Replaces the contents of `record`.
    fn write(&mut self, record: Record, contents: &str) -> Result<(), StoreError>;
}

/// One file per record inside a save directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_of(&self, record: Record) -> PathBuf {
        self.dir.join(record.file_name())
    }
}

impl RecordStore for FileStore {
    fn read(&self, record: Record) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_of(record)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, record: Record, contents: &str) -> Result<(), StoreError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.path_of(record);
        fs::write(&path, contents)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Records held in memory. Used by tests and when no save directory is usable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<Record, String>,
    read_only: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_record(mut self, record: Record, contents: &str) -> Self {
        self.records.insert(record, contents.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, record: Record) -> Option<&str> {
        self.records.get(&record).map(String::as_str)
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, record: Record) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(&record).cloned())
    }

    fn write(&mut self, record: Record, contents: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly(record));
        }
        self.records.insert(record, contents.to_string());
        Ok(())
    }
}

// Custom error type for record storage
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    ReadOnly(Record),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "record I/O failed: {err}"),
            StoreError::ReadOnly(record) => {
                write!(f, "store is read-only, cannot write {}", record.file_name())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::ReadOnly(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}
