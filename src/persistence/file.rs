use crate::persistence::{PersistenceError, TournamentStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "tournament.json";
const HISTORY_FILE: &str = "history.json";

/// Store backed by two JSON files in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    /// Write via a temp file and rename so a crash never leaves half a file behind.
    fn write_atomic(&self, path: &Path, json: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.data_dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(Some(json)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl TournamentStore for JsonFileStore {
    fn read_snapshot(&self) -> Result<Option<String>, PersistenceError> {
        read_optional(&self.snapshot_path())
    }

    fn write_snapshot(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.write_atomic(&self.snapshot_path(), json)
    }

    fn clear_snapshot(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(self.snapshot_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_history(&self) -> Result<Option<String>, PersistenceError> {
        read_optional(&self.history_path())
    }

    fn write_history(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.write_atomic(&self.history_path(), json)
    }
}
