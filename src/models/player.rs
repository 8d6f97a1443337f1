//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};

/// Stable identifier for a player within one tournament (1-based, in entry order).
pub type PlayerId = u32;

/// Cumulative statistics of a player (for API / display).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
}

/// A player in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Rounds in which this player had no court slot. Drives pairing order.
    #[serde(default)]
    pub times_sat_out: u32,
}

impl Player {
    /// Create a new player with the given id and name. Stats start at zero.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            points: 0,
            matches_played: 0,
            wins: 0,
            losses: 0,
            times_sat_out: 0,
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> PlayerStats {
        PlayerStats {
            points: self.points,
            matches_played: self.matches_played,
            wins: self.wins,
            losses: self.losses,
        }
    }

    /// Points after crediting `score`, or `None` if the total would overflow.
    pub fn points_after(&self, score: u32) -> Option<u32> {
        self.points.checked_add(score)
    }

    /// Credit one played match worth `score` points.
    ///
    /// Callers check [`Player::points_after`] first.
    pub fn add_match(&mut self, score: u32) {
        self.points += score;
        self.matches_played += 1;
    }

    /// Take back a match previously credited with [`Player::add_match`].
    pub fn remove_match(&mut self, score: u32) {
        self.points = self.points.saturating_sub(score);
        self.matches_played = self.matches_played.saturating_sub(1);
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub fn remove_win(&mut self) {
        self.wins = self.wins.saturating_sub(1);
    }

    pub fn remove_loss(&mut self) {
        self.losses = self.losses.saturating_sub(1);
    }

    /// Record that this player sat out one round.
    pub fn record_sat_out(&mut self) {
        self.times_sat_out += 1;
    }

    /// Zero all match statistics (sit-out count is schedule data and is kept).
    pub fn clear_stats(&mut self) {
        self.points = 0;
        self.matches_played = 0;
        self.wins = 0;
        self.losses = 0;
    }
}
