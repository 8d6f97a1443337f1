use crate::persistence::{PersistenceError, TournamentStore};

/// Simple in-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Option<String>,
    history: Option<String>,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `Unavailable` (reads keep working).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw snapshot text, as a file store would hold it.
    pub fn raw_snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Replace the raw snapshot text (e.g. to simulate a corrupt save).
    pub fn set_raw_snapshot(&mut self, json: impl Into<String>) {
        self.snapshot = Some(json.into());
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable("writes disabled".into()));
        }
        Ok(())
    }
}

impl TournamentStore for InMemoryStore {
    fn read_snapshot(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.snapshot.clone())
    }

    fn write_snapshot(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.snapshot = Some(json.to_string());
        Ok(())
    }

    fn clear_snapshot(&mut self) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.snapshot = None;
        Ok(())
    }

    fn read_history(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.history.clone())
    }

    fn write_history(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.history = Some(json.to_string());
        Ok(())
    }
}
