//! Data structures for the Americano tournament: players, teams, matches, rounds, tournament state.

mod game;
mod player;
mod summary;
mod tournament;

pub use game::{Match, MatchId, MatchOutcome, MatchStatus, Round, Side, Team, TeamId};
pub use player::{Player, PlayerId, PlayerStats};
pub use summary::{PlayerSummary, TournamentSummary};
pub use tournament::{
    default_court_names, ScheduleReport, ScorePolicy, Tournament, TournamentConfig,
    TournamentError, TournamentId, TournamentState,
};
