//! Persistence of the live tournament snapshot and the history of finished tournaments.
//!
//! Stores only move JSON text around; encoding and validation live here so every store
//! rejects the same malformed snapshots.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::logic::recompute_player_stats;
use crate::models::{Tournament, TournamentSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading or writing persisted data.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Store refused the write (e.g. read-only or simulated outage).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Serialized form of a live tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub saved_at: DateTime<Utc>,
}

const REQUIRED_FIELDS: [&str; 3] = ["players", "rounds", "current_round"];

pub fn encode_snapshot(tournament: &Tournament) -> Result<String, PersistenceError> {
    let snapshot = TournamentSnapshot {
        tournament: tournament.clone(),
        saved_at: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse and check a snapshot. Player stats are rebuilt from the completed matches.
pub fn decode_snapshot(json: &str) -> Result<TournamentSnapshot, PersistenceError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let obj = value
        .as_object()
        .ok_or_else(|| PersistenceError::InvalidSnapshot("not a JSON object".into()))?;
    if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !obj.contains_key(**f)) {
        return Err(PersistenceError::InvalidSnapshot(format!(
            "missing field `{missing}`"
        )));
    }

    let mut snapshot: TournamentSnapshot = serde_json::from_value(value)?;
    let t = &mut snapshot.tournament;
    if t.players.is_empty() || t.rounds.is_empty() {
        return Err(PersistenceError::InvalidSnapshot(
            "no players or no rounds".into(),
        ));
    }
    if t.current_round == 0 || t.current_round > t.total_rounds() + 1 {
        return Err(PersistenceError::InvalidSnapshot(format!(
            "current round {} outside 1..={}",
            t.current_round,
            t.total_rounds() + 1
        )));
    }
    if let Some(m) = t
        .rounds
        .iter()
        .filter(|r| r.number < t.current_round)
        .flat_map(|r| r.pending_matches())
        .next()
    {
        return Err(PersistenceError::InvalidSnapshot(format!(
            "match {} of round {} is pending behind current round {}",
            m.id, m.round, t.current_round
        )));
    }
    for m in t.matches() {
        if let Some(pid) = m.player_ids().into_iter().find(|&pid| t.get_player(pid).is_none()) {
            return Err(PersistenceError::InvalidSnapshot(format!(
                "match {} references unknown player {}",
                m.id, pid
            )));
        }
    }
    // `completed` follows `status`
    for m in t.rounds.iter_mut().flat_map(|r| r.matches.iter_mut()) {
        m.set_status(m.status);
    }
    recompute_player_stats(t).map_err(|e| PersistenceError::InvalidSnapshot(e.to_string()))?;
    Ok(snapshot)
}

/// Storage backend for one controller.
///
/// Implementors provide raw reads and writes; the provided methods add encoding,
/// validation and history ordering.
pub trait TournamentStore {
    fn read_snapshot(&self) -> Result<Option<String>, PersistenceError>;

    fn write_snapshot(&mut self, json: &str) -> Result<(), PersistenceError>;

    fn clear_snapshot(&mut self) -> Result<(), PersistenceError>;

    fn read_history(&self) -> Result<Option<String>, PersistenceError>;

    fn write_history(&mut self, json: &str) -> Result<(), PersistenceError>;

    fn save_snapshot(&mut self, tournament: &Tournament) -> Result<(), PersistenceError> {
        let json = encode_snapshot(tournament)?;
        self.write_snapshot(&json)
    }

    /// Load the saved tournament. An unreadable or invalid snapshot is discarded.
    fn load_snapshot(&mut self) -> Option<Tournament> {
        let json = match self.read_snapshot() {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read tournament snapshot: {}", e);
                return None;
            }
        };
        match decode_snapshot(&json) {
            Ok(snapshot) => Some(snapshot.tournament),
            Err(e) => {
                log::warn!("Discarding tournament snapshot: {}", e);
                if let Err(e) = self.clear_snapshot() {
                    log::warn!("Could not clear tournament snapshot: {}", e);
                }
                None
            }
        }
    }

    /// Parsed history; a missing history is empty, an unreadable one is an error.
    fn try_load_history(&self) -> Result<Vec<TournamentSummary>, PersistenceError> {
        match self.read_history()? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Finished tournaments, newest first. Unreadable history reads as empty.
    fn load_history(&self) -> Vec<TournamentSummary> {
        match self.try_load_history() {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Could not read tournament history: {}", e);
                Vec::new()
            }
        }
    }

    /// Put `summary` at the front of the history.
    ///
    /// Fails without writing when the existing history cannot be read, so it is never replaced.
    fn append_history(&mut self, summary: TournamentSummary) -> Result<(), PersistenceError> {
        let mut history = self.try_load_history()?;
        history.insert(0, summary);
        let json = serde_json::to_string_pretty(&history)?;
        self.write_history(&json)
    }
}
