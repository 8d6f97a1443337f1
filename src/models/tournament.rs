//! Tournament, TournamentState and the error type shared by all tournament operations.

use crate::models::game::{Match, MatchId, Round, TeamId};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
///
/// A call that returns an error leaves the tournament unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Bad player list, court list or score policy.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Team {team_id} is not part of match {match_id}")]
    TeamNotFound { match_id: MatchId, team_id: TeamId },
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    /// Tournament is not in a state that allows this action.
    #[error("Invalid state for this action: {0}")]
    InvalidState(&'static str),
    /// The configured fixed-total score policy rejected the entered scores.
    #[error("Scores must total {expected} (current: {actual})")]
    ScoreTotalMismatch { expected: u32, actual: u32 },
    /// A score too large to add to a total.
    #[error("Score {score} would overflow the points of player {player}")]
    ScoreOutOfRange { player: PlayerId, score: u32 },
}

impl TournamentError {
    /// True for the unknown-id errors (match, team, player).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::MatchNotFound(_)
                | TournamentError::TeamNotFound { .. }
                | TournamentError::PlayerNotFound(_)
        )
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament as seen by the controller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    #[default]
    NotStarted,
    /// Rounds are being played and scored.
    InProgress,
    /// Every round is confirmed; scores are frozen.
    Completed,
}

/// Optional validation applied to a match's two scores on confirmation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "total")]
pub enum ScorePolicy {
    /// Any pair of scores is accepted.
    #[default]
    Unrestricted,
    /// Both team scores must add up to exactly this total.
    FixedTotal(u32),
}

/// Settings chosen when a tournament is created.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub court_names: Vec<String>,
    #[serde(default)]
    pub score_policy: ScorePolicy,
}

impl TournamentConfig {
    /// `court_count` courts named "Court 1".."Court n" with no score validation.
    pub fn with_courts(court_count: usize) -> Self {
        Self {
            court_names: default_court_names(court_count),
            score_policy: ScorePolicy::Unrestricted,
        }
    }

    pub fn score_policy(mut self, policy: ScorePolicy) -> Self {
        self.score_policy = policy;
        self
    }
}

/// "Court 1", "Court 2", ... for `count` courts.
pub fn default_court_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Court {i}")).collect()
}

/// How much of the ideal schedule actually fits on the courts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub total_rounds: u32,
    /// Matches that were placed on a court.
    pub scheduled_matches: u32,
    /// Matches the player count would allow with unlimited courts.
    pub possible_matches: u32,
    /// Teams formed by the pairing step that did not get a court slot.
    pub dropped_teams: u32,
    /// Teams that had to repeat an earlier partnership.
    pub relaxed_pairings: u32,
}

/// Full tournament state: players, courts, rounds and the current round pointer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub players: Vec<Player>,
    pub courts: Vec<String>,
    pub rounds: Vec<Round>,
    /// 1-based round being played; `total_rounds() + 1` once completed.
    pub current_round: u32,
    #[serde(default)]
    pub score_policy: ScorePolicy,
    #[serde(default)]
    pub report: ScheduleReport,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn state(&self) -> TournamentState {
        if self.current_round as usize > self.rounds.len() {
            TournamentState::Completed
        } else {
            TournamentState::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == TournamentState::Completed
    }

    pub fn total_rounds(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }

    pub fn completed_matches(&self) -> usize {
        self.matches().filter(|m| m.is_completed()).count()
    }

    /// All matches of all rounds in schedule order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    /// The round currently being played, `None` once completed.
    pub fn current(&self) -> Option<&Round> {
        let idx = (self.current_round as usize).checked_sub(1)?;
        self.rounds.get(idx)
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.rounds
            .iter_mut()
            .flat_map(|r| r.matches.iter_mut())
            .find(|m| m.id == id)
    }

    /// Top of the standings.
    pub fn winner(&self) -> Option<&Player> {
        crate::logic::leader(&self.players)
    }

    /// Display name for a player id ("?" for unknown ids).
    pub fn player_name(&self, id: PlayerId) -> &str {
        self.get_player(id).map(|p| p.name.as_str()).unwrap_or("?")
    }
}
