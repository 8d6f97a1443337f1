//! Tournament controller: owns the live tournament, drives its lifecycle and saves snapshots.

use crate::logic::{self, ConfirmOutcome, Standing};
use crate::models::{
    MatchId, Round, TeamId, Tournament, TournamentConfig, TournamentError, TournamentState,
    TournamentSummary,
};
use crate::persistence::{PersistenceError, TournamentStore};

/// Owns at most one live tournament and the store it is saved to.
///
/// Every operation runs to completion before returning, so a reader never sees a half-applied
/// confirmation. Store failures never fail an operation; they are logged and queued as
/// warnings (see [`TournamentController::take_warnings`]).
#[derive(Debug)]
pub struct TournamentController<S: TournamentStore> {
    store: S,
    live: Option<Tournament>,
    warnings: Vec<String>,
}

impl<S: TournamentStore> TournamentController<S> {
    /// Controller with no tournament, ignoring any saved snapshot.
    pub fn new(store: S) -> Self {
        Self {
            store,
            live: None,
            warnings: Vec::new(),
        }
    }

    /// Controller that picks up the saved snapshot, if a valid one exists.
    pub fn resume(mut store: S) -> Self {
        let live = store.load_snapshot();
        if let Some(t) = &live {
            log::info!(
                "Resumed tournament {} at round {}/{}",
                t.id,
                t.current_round.min(t.total_rounds()),
                t.total_rounds()
            );
        }
        Self {
            store,
            live,
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> TournamentState {
        self.live
            .as_ref()
            .map_or(TournamentState::NotStarted, Tournament::state)
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.live.as_ref()
    }

    /// Matches of the round being played; `None` when not started or completed.
    pub fn current_round(&self) -> Option<&Round> {
        self.live.as_ref().and_then(Tournament::current)
    }

    /// Leaderboard of the live tournament (empty when there is none).
    pub fn standings(&self) -> Vec<Standing> {
        self.live
            .as_ref()
            .map(|t| logic::standings(&t.players))
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<TournamentSummary> {
        self.store.load_history()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Drain the persistence warnings collected since the last call.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    /// NotStarted -> InProgress: create the players and the full schedule.
    pub fn start(&mut self, names: &[String], config: TournamentConfig) -> Result<&Tournament, TournamentError> {
        if self.live.is_some() {
            return Err(TournamentError::InvalidState(
                "a tournament already exists; reset it first",
            ));
        }
        let tournament = logic::start_tournament(names, config)?;
        log::info!(
            "Started tournament {}: {} players, {} court(s), {} rounds, {} matches",
            tournament.id,
            tournament.players.len(),
            tournament.courts.len(),
            tournament.total_rounds(),
            tournament.total_matches()
        );
        self.live = Some(tournament);
        self.persist();
        self.live
            .as_ref()
            .ok_or(TournamentError::InvalidState("no tournament"))
    }

    pub fn record_score(&mut self, match_id: MatchId, team_id: TeamId, score: u32) -> Result<(), TournamentError> {
        logic::record_score(self.live_mut()?, match_id, team_id, score)?;
        self.persist();
        Ok(())
    }

    pub fn confirm_match(&mut self, match_id: MatchId) -> Result<ConfirmOutcome, TournamentError> {
        let outcome = logic::confirm_match(self.live_mut()?, match_id)?;
        self.after_confirm(outcome);
        Ok(outcome)
    }

    pub fn confirm_round(&mut self) -> Result<ConfirmOutcome, TournamentError> {
        let outcome = logic::confirm_round(self.live_mut()?)?;
        self.after_confirm(outcome);
        Ok(outcome)
    }

    pub fn reopen_match(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        logic::reopen_match(self.live_mut()?, match_id)?;
        self.persist();
        Ok(())
    }

    /// Any state -> NotStarted. Drops the live tournament and its snapshot; history is kept.
    pub fn reset(&mut self) {
        if let Some(t) = self.live.take() {
            log::info!("Reset tournament {}", t.id);
        }
        let result = self.store.clear_snapshot();
        self.report("clear snapshot", result);
    }

    fn live_mut(&mut self) -> Result<&mut Tournament, TournamentError> {
        self.live
            .as_mut()
            .ok_or(TournamentError::InvalidState("no tournament has been started"))
    }

    fn after_confirm(&mut self, outcome: ConfirmOutcome) {
        if outcome.round_advanced {
            if let Some(t) = &self.live {
                if !t.is_completed() {
                    log::info!("Advanced to round {}/{}", t.current_round, t.total_rounds());
                }
            }
        }
        self.persist();
        if outcome.tournament_completed {
            self.finish();
        }
    }

    /// InProgress -> Completed: record the summary in the history.
    fn finish(&mut self) {
        let Some(t) = &self.live else { return };
        let summary = TournamentSummary::from_tournament(t);
        log::info!(
            "Tournament {} completed; winner {} with {} points",
            t.id,
            summary.winner,
            summary.winner_points
        );
        let result = self.store.append_history(summary);
        self.report("append history", result);
    }

    fn persist(&mut self) {
        let Some(t) = &self.live else { return };
        let result = self.store.save_snapshot(t);
        self.report("save snapshot", result);
    }

    fn report(&mut self, action: &str, result: Result<(), PersistenceError>) {
        if let Err(e) = result {
            log::warn!("Could not {}: {}", action, e);
            self.warnings.push(format!("Could not {action}: {e}"));
        }
    }
}
