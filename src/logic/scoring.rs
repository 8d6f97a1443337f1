//! Match scoring: record team scores, confirm matches and apply their result to player stats.

use crate::models::{
    Match, MatchId, MatchOutcome, MatchStatus, Player, ScorePolicy, Side, TeamId, Tournament,
    TournamentError,
};

/// What a successful confirmation did to the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ConfirmOutcome {
    /// Matches newly marked completed.
    pub confirmed: usize,
    /// The last pending match of the round was confirmed and the round pointer moved.
    pub round_advanced: bool,
    /// The final round finished.
    pub tournament_completed: bool,
}

fn ensure_in_progress(tournament: &Tournament) -> Result<(), TournamentError> {
    if tournament.is_completed() {
        return Err(TournamentError::InvalidState("tournament is completed"));
    }
    Ok(())
}

fn find_match(tournament: &Tournament, match_id: MatchId) -> Result<&Match, TournamentError> {
    tournament
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))
}

/// Check the two scores of a match against the policy.
pub fn check_policy(policy: ScorePolicy, m: &Match) -> Result<(), TournamentError> {
    match policy {
        ScorePolicy::Unrestricted => Ok(()),
        ScorePolicy::FixedTotal(expected) => {
            let (one, two) = (m.teams[0].score, m.teams[1].score);
            match one.checked_add(two) {
                Some(actual) if actual == expected => Ok(()),
                Some(actual) => Err(TournamentError::ScoreTotalMismatch { expected, actual }),
                None => Err(TournamentError::ScoreTotalMismatch {
                    expected,
                    actual: u32::MAX,
                }),
            }
        }
    }
}

/// Store a team's score for a pending match. Stats are not touched until confirmation.
pub fn record_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    team_id: TeamId,
    score: u32,
) -> Result<(), TournamentError> {
    ensure_in_progress(tournament)?;
    let current = tournament.current_round;
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let side = m
        .side_of(team_id)
        .ok_or(TournamentError::TeamNotFound { match_id, team_id })?;
    if m.is_completed() {
        return Err(TournamentError::InvalidState("match is already completed"));
    }
    if m.round != current {
        return Err(TournamentError::InvalidState("match is not in the current round"));
    }
    m.teams[side.index()].score = score;
    log::debug!("Match {}: team {} scored {}", match_id, team_id, score);
    Ok(())
}

/// Ensure crediting the match cannot overflow any of its players' points.
fn check_totals(players: &[Player], m: &Match) -> Result<(), TournamentError> {
    for team in &m.teams {
        for pid in team.players {
            let p = players
                .iter()
                .find(|p| p.id == pid)
                .ok_or(TournamentError::PlayerNotFound(pid))?;
            if p.points_after(team.score).is_none() {
                return Err(TournamentError::ScoreOutOfRange {
                    player: pid,
                    score: team.score,
                });
            }
        }
    }
    Ok(())
}

/// Add one match's contribution to the players, or take it back when `undo` is set.
///
/// Nothing is changed when an error is returned.
fn apply_to_players(players: &mut [Player], m: &Match, undo: bool) -> Result<(), TournamentError> {
    if !undo {
        check_totals(players, m)?;
    }
    let outcome = m.outcome();
    for side in [Side::One, Side::Two] {
        let team = m.team(side);
        for pid in team.players {
            let p = players
                .iter_mut()
                .find(|p| p.id == pid)
                .ok_or(TournamentError::PlayerNotFound(pid))?;
            match (undo, outcome) {
                (false, MatchOutcome::Won(w)) if w == side => p.add_win(),
                (false, MatchOutcome::Won(_)) => p.add_loss(),
                (true, MatchOutcome::Won(w)) if w == side => p.remove_win(),
                (true, MatchOutcome::Won(_)) => p.remove_loss(),
                (_, MatchOutcome::Draw) => {}
            }
            if undo {
                p.remove_match(team.score);
            } else {
                p.add_match(team.score);
            }
        }
    }
    Ok(())
}

/// Apply one completed match to a player list (used by the full recompute).
pub(crate) fn credit_match(players: &mut [Player], m: &Match) -> Result<(), TournamentError> {
    apply_to_players(players, m, false)
}

/// Ensure all four players of a match exist, so applying it cannot fail halfway.
fn ensure_players(tournament: &Tournament, m: &Match) -> Result<(), TournamentError> {
    for pid in m.player_ids() {
        tournament
            .get_player(pid)
            .ok_or(TournamentError::PlayerNotFound(pid))?;
    }
    Ok(())
}

/// Move the round pointer past every fully completed round.
fn advance(tournament: &mut Tournament) -> (bool, bool) {
    let before = tournament.current_round;
    while let Some(round) = tournament.current() {
        if !round.is_complete() {
            break;
        }
        tournament.current_round += 1;
        log::info!("Round {} complete", tournament.current_round - 1);
    }
    let advanced = tournament.current_round != before;
    (advanced, advanced && tournament.is_completed())
}

/// Confirm the given matches: validate all of them first, then apply all of them.
fn confirm_many(tournament: &mut Tournament, ids: &[MatchId]) -> Result<ConfirmOutcome, TournamentError> {
    ensure_in_progress(tournament)?;
    let current = tournament.current_round;
    for &id in ids {
        let m = find_match(tournament, id)?;
        if m.is_completed() {
            return Err(TournamentError::InvalidState("match is already completed"));
        }
        if m.round != current {
            return Err(TournamentError::InvalidState("match is not in the current round"));
        }
        check_policy(tournament.score_policy, m)?;
        ensure_players(tournament, m)?;
        // a player plays at most once per round, so checking each match alone is enough
        check_totals(&tournament.players, m)?;
    }

    for &id in ids {
        let snapshot = find_match(tournament, id)?.clone();
        apply_to_players(&mut tournament.players, &snapshot, false)?;
        if let Some(m) = tournament.get_match_mut(id) {
            m.set_status(MatchStatus::Completed);
        }
        log::debug!(
            "Match {} confirmed: {}-{}",
            id,
            snapshot.teams[0].score,
            snapshot.teams[1].score
        );
    }

    let (round_advanced, tournament_completed) = advance(tournament);
    Ok(ConfirmOutcome {
        confirmed: ids.len(),
        round_advanced,
        tournament_completed,
    })
}

/// Confirm one match of the current round and update its players' stats.
///
/// Each player gains their team's score in points and one match played; the higher score
/// gives its two players a win and the other two a loss, equal scores change neither.
/// Confirming an already completed match is rejected with `InvalidState`.
pub fn confirm_match(tournament: &mut Tournament, match_id: MatchId) -> Result<ConfirmOutcome, TournamentError> {
    confirm_many(tournament, &[match_id])
}

/// Confirm every pending match of the current round at once.
pub fn confirm_round(tournament: &mut Tournament) -> Result<ConfirmOutcome, TournamentError> {
    ensure_in_progress(tournament)?;
    let ids: Vec<MatchId> = tournament
        .current()
        .map(|r| r.pending_matches().map(|m| m.id).collect())
        .unwrap_or_default();
    confirm_many(tournament, &ids)
}

/// Revert a completed match of the current round back to pending and take back its stats.
pub fn reopen_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    ensure_in_progress(tournament)?;
    let m = find_match(tournament, match_id)?;
    if !m.is_completed() {
        return Err(TournamentError::InvalidState("match is not completed"));
    }
    if m.round != tournament.current_round {
        return Err(TournamentError::InvalidState("match is not in the current round"));
    }
    ensure_players(tournament, m)?;
    let snapshot = m.clone();
    apply_to_players(&mut tournament.players, &snapshot, true)?;
    if let Some(m) = tournament.get_match_mut(match_id) {
        m.set_status(MatchStatus::Pending);
    }
    log::info!("Match {} reopened", match_id);
    Ok(())
}
