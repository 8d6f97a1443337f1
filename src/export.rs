//! Results export: full JSON report and CSV standings.

use crate::logic::standings;
use crate::models::{MatchOutcome, MatchStatus, Tournament};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Output(String),
}

#[derive(Serialize)]
struct ExportOverview {
    players: usize,
    courts: usize,
    matches: usize,
    completed: bool,
}

#[derive(Serialize)]
struct ExportPlayer<'a> {
    name: &'a str,
    points: u32,
    matches_played: u32,
    wins: u32,
    losses: u32,
}

#[derive(Serialize)]
struct ExportMatch<'a> {
    round: u32,
    court: &'a str,
    team_1: [&'a str; 2],
    team_2: [&'a str; 2],
    status: MatchStatus,
    score: String,
    /// Names of the winning pair, or "Tie"; `None` while pending.
    winner: Option<String>,
}

#[derive(Serialize)]
struct ExportReport<'a> {
    tournament: ExportOverview,
    players: Vec<ExportPlayer<'a>>,
    matches: Vec<ExportMatch<'a>>,
}

/// Whole tournament as pretty JSON: overview, players in standings order, every match.
pub fn results_json(t: &Tournament) -> Result<String, ExportError> {
    let ranked = standings(&t.players);
    let players = ranked
        .iter()
        .filter_map(|s| t.get_player(s.player_id))
        .map(|p| ExportPlayer {
            name: &p.name,
            points: p.points,
            matches_played: p.matches_played,
            wins: p.wins,
            losses: p.losses,
        })
        .collect();

    let names = move |ids: [u32; 2]| [t.player_name(ids[0]), t.player_name(ids[1])];
    let matches = t
        .matches()
        .map(|m| {
            let winner = m.is_completed().then(|| match m.outcome() {
                MatchOutcome::Won(side) => names(m.team(side).players).join(" & "),
                MatchOutcome::Draw => "Tie".to_string(),
            });
            ExportMatch {
                round: m.round,
                court: &m.court,
                team_1: names(m.teams[0].players),
                team_2: names(m.teams[1].players),
                status: m.status,
                score: format!("{}-{}", m.teams[0].score, m.teams[1].score),
                winner,
            }
        })
        .collect();

    let report = ExportReport {
        tournament: ExportOverview {
            players: t.players.len(),
            courts: t.courts.len(),
            matches: t.total_matches(),
            completed: t.is_completed(),
        },
        players,
        matches,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Standings as CSV with a header row.
pub fn standings_csv(t: &Tournament) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "name", "points", "matches_played", "wins", "losses"])?;
    for s in standings(&t.players) {
        wtr.write_record([
            s.rank.to_string(),
            s.name,
            s.stats.points.to_string(),
            s.stats.matches_played.to_string(),
            s.stats.wins.to_string(),
            s.stats.losses.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Output(e.to_string()))
}
