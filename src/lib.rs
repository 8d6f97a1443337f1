//! Americano tournament web app: library with models, scheduling/scoring logic and persistence.

pub mod config;
pub mod controller;
pub mod export;
pub mod logic;
pub mod models;
pub mod persistence;

pub use config::AppConfig;
pub use controller::TournamentController;
pub use logic::{
    confirm_match, confirm_round, record_score, reopen_match, standings, start_tournament,
    ConfirmOutcome, PartnershipLedger, Standing,
};
pub use models::{
    default_court_names, Match, MatchId, MatchOutcome, MatchStatus, Player, PlayerId, PlayerStats,
    Round, ScheduleReport, ScorePolicy, Side, Team, TeamId, Tournament, TournamentConfig,
    TournamentError, TournamentId, TournamentState, TournamentSummary,
};
pub use persistence::{InMemoryStore, JsonFileStore, PersistenceError, TournamentStore};
