//! Standings: ranked leaderboard derived from player stats.

use crate::logic::scoring::credit_match;
use crate::models::{Player, PlayerId, PlayerStats, Tournament, TournamentError};
use serde::Serialize;
use std::cmp::Ordering;

/// One leaderboard line.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position; players with identical stats still get distinct ranks.
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// Leaderboard order: points desc, wins desc, losses asc, name (case-insensitive), id.
pub fn compare(a: &Player, b: &Player) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.wins.cmp(&a.wins))
        .then(a.losses.cmp(&b.losses))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then(a.id.cmp(&b.id))
}

/// Rank `players`. Pure: recomputed on every call, nothing is stored on the players.
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| compare(a, b));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i + 1,
            player_id: p.id,
            name: p.name.clone(),
            stats: p.stats(),
        })
        .collect()
}

/// Leader of the standings, `None` for an empty player list.
pub fn leader(players: &[Player]) -> Option<&Player> {
    players.iter().min_by(|a, b| compare(a, b))
}

/// Rebuild every player's stats from the completed matches of the tournament.
pub fn recompute_player_stats(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let mut players = tournament.players.clone();
    for p in &mut players {
        p.clear_stats();
    }
    for m in tournament.matches().filter(|m| m.is_completed()) {
        credit_match(&mut players, m)?;
    }
    tournament.players = players;
    Ok(())
}
