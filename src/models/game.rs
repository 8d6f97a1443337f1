//! Match, Team and Round for 2v2 play.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Identifier for a match, unique across the whole tournament (1-based).
pub type MatchId = u32;

/// Identifier for a team, unique across the whole tournament (1-based).
pub type TeamId = u32;

/// Which of the two teams of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

/// Result of a match derived from its two scores.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Won(Side),
    Draw,
}

/// A pair of partners playing one match together.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub players: [PlayerId; 2],
    /// Score entered for the match this team belongs to.
    pub score: u32,
}

impl Team {
    pub fn new(id: TeamId, players: [PlayerId; 2]) -> Self {
        Self {
            id,
            players,
            score: 0,
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single 2v2 match on one court.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// 1-based round this match belongs to.
    pub round: u32,
    /// 1-based position of the match within its round.
    pub number: u32,
    pub court: String,
    pub teams: [Team; 2],
    pub status: MatchStatus,
    /// Mirrors `status == Completed`; kept for snapshot consumers.
    pub completed: bool,
}

impl Match {
    pub fn new(id: MatchId, round: u32, number: u32, court: impl Into<String>, teams: [Team; 2]) -> Self {
        Self {
            id,
            round,
            number,
            court: court.into(),
            teams,
            status: MatchStatus::Pending,
            completed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Set status and the `completed` flag together.
    pub fn set_status(&mut self, status: MatchStatus) {
        self.status = status;
        self.completed = status == MatchStatus::Completed;
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    /// Which side a team id belongs to in this match.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.teams[0].id == team_id {
            Some(Side::One)
        } else if self.teams[1].id == team_id {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// Outcome from the currently entered scores. Equal scores are a draw.
    pub fn outcome(&self) -> MatchOutcome {
        let (one, two) = (self.teams[0].score, self.teams[1].score);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => MatchOutcome::Won(Side::One),
            std::cmp::Ordering::Less => MatchOutcome::Won(Side::Two),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// All four players of the match, team one first.
    pub fn player_ids(&self) -> [PlayerId; 4] {
        let [a, b] = self.teams[0].players;
        let [c, d] = self.teams[1].players;
        [a, b, c, d]
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.teams.iter().any(|t| t.contains(player))
    }
}

/// One batch of matches played concurrently across the courts.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<Match>,
    /// Players without a court slot this round.
    #[serde(default)]
    pub sitting_out: Vec<PlayerId>,
}

impl Round {
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_completed)
    }

    pub fn pending_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| !m.is_completed())
    }
}
