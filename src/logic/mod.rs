//! Tournament business logic: pairing, courts, scoring, standings.

mod courts;
mod ledger;
mod pairing;
mod scoring;
mod setup;
mod standings;

pub use courts::{assign_courts, CourtAssignment, IdSequence};
pub use ledger::PartnershipLedger;
pub use pairing::{generate_round, pair_players, scan_order, DraftTeam, GeneratedRound};
pub use scoring::{
    check_policy, confirm_match, confirm_round, record_score, reopen_match, ConfirmOutcome,
};
pub use setup::{build_schedule, start_tournament, MIN_PLAYERS};
pub use standings::{compare, leader, recompute_player_stats, standings, Standing};
