//! Setup: validate the player and court lists and build the whole round schedule.

use crate::logic::courts::IdSequence;
use crate::logic::ledger::PartnershipLedger;
use crate::logic::pairing::generate_round;
use crate::models::{
    Player, Round, ScheduleReport, ScorePolicy, Tournament, TournamentConfig, TournamentError,
};
use chrono::Utc;
use uuid::Uuid;

/// Fewest players an Americano can be played with (one match).
pub const MIN_PLAYERS: usize = 4;

/// Check the configuration and return trimmed player names.
fn validate(names: &[String], config: &TournamentConfig) -> Result<Vec<String>, TournamentError> {
    let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
    if names.len() < MIN_PLAYERS {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Need at least {MIN_PLAYERS} players (got {})",
            names.len()
        )));
    }
    if names.len() % 2 != 0 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Player count must be even (got {})",
            names.len()
        )));
    }
    if names.iter().any(|n| n.is_empty()) {
        return Err(TournamentError::InvalidConfiguration(
            "Player names must not be empty".into(),
        ));
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].iter().any(|other| other.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::InvalidConfiguration(format!(
                "Duplicate player name: {name}"
            )));
        }
    }

    let courts = &config.court_names;
    if courts.is_empty() {
        return Err(TournamentError::InvalidConfiguration(
            "Need at least one court".into(),
        ));
    }
    if courts.len() > names.len() / 2 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Number of courts ({}) cannot exceed half the number of players ({})",
            courts.len(),
            names.len()
        )));
    }
    if courts.iter().any(|c| c.trim().is_empty()) {
        return Err(TournamentError::InvalidConfiguration(
            "Court names must not be empty".into(),
        ));
    }
    if config.score_policy == ScorePolicy::FixedTotal(0) {
        return Err(TournamentError::InvalidConfiguration(
            "Fixed score total must be positive".into(),
        ));
    }
    Ok(names)
}

/// Build rounds `1..=players - 1` with one shared ledger.
pub fn build_schedule(players: &mut [Player], courts: &[String]) -> (Vec<Round>, PartnershipLedger, ScheduleReport) {
    let total_rounds = players.len().saturating_sub(1) as u32;
    let mut ledger = PartnershipLedger::new();
    let mut ids = IdSequence::default();
    let mut report = ScheduleReport {
        total_rounds,
        possible_matches: total_rounds * (players.len() / 4) as u32,
        ..ScheduleReport::default()
    };

    let rounds = (1..=total_rounds)
        .map(|number| {
            let generated = generate_round(number, players, courts, &mut ledger, &mut ids);
            report.scheduled_matches += generated.round.matches.len() as u32;
            report.dropped_teams += generated.dropped_teams;
            report.relaxed_pairings += generated.relaxed_pairings;
            generated.round
        })
        .collect();

    (rounds, ledger, report)
}

/// Create a tournament in progress at round 1 from a list of names.
pub fn start_tournament(names: &[String], config: TournamentConfig) -> Result<Tournament, TournamentError> {
    let names = validate(names, &config)?;
    let mut players: Vec<Player> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Player::new(i as u32 + 1, name))
        .collect();

    let (rounds, ledger, report) = build_schedule(&mut players, &config.court_names);
    log::info!(
        "Scheduled {} rounds: {} of {} possible matches on {} court(s), {} partnerships",
        report.total_rounds,
        report.scheduled_matches,
        report.possible_matches,
        config.court_names.len(),
        ledger.len()
    );

    Ok(Tournament {
        id: Uuid::new_v4(),
        players,
        courts: config.court_names,
        rounds,
        current_round: 1,
        score_policy: config.score_policy,
        report,
        created_at: Utc::now(),
    })
}
