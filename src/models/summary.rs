//! Immutable record of a finished tournament, kept in the history list.

use crate::models::player::Player;
use crate::models::tournament::Tournament;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final line of one player in a finished tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
}

impl From<&Player> for PlayerSummary {
    fn from(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            points: p.points,
            matches_played: p.matches_played,
            wins: p.wins,
            losses: p.losses,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: Uuid,
    pub date: NaiveDate,
    pub player_count: usize,
    pub court_count: usize,
    pub match_count: usize,
    pub winner: String,
    pub winner_points: u32,
    /// Final standings, best first.
    pub players: Vec<PlayerSummary>,
}

impl TournamentSummary {
    /// Summary of `t` as it stands now, players in standings order.
    pub fn from_tournament(t: &Tournament) -> Self {
        let mut ranked: Vec<&Player> = t.players.iter().collect();
        ranked.sort_by(|a, b| crate::logic::compare(a, b));
        let (winner, winner_points) = ranked
            .first()
            .map(|p| (p.name.clone(), p.points))
            .unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            date: Utc::now().date_naive(),
            player_count: t.players.len(),
            court_count: t.courts.len(),
            match_count: t.total_matches(),
            winner,
            winner_points,
            players: ranked.into_iter().map(PlayerSummary::from).collect(),
        }
    }
}
