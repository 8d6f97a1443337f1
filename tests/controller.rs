//! Integration tests for the controller lifecycle: start, play, complete, reset, persistence.

use americano_tournament_web::{
    InMemoryStore, ScorePolicy, TournamentConfig, TournamentController, TournamentError,
    TournamentState, TournamentStore,
};

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("P{i}")).collect()
}

fn started(players: usize, courts: usize) -> TournamentController<InMemoryStore> {
    let mut ctrl = TournamentController::new(InMemoryStore::new());
    ctrl.start(&names(players), TournamentConfig::with_courts(courts))
        .unwrap();
    ctrl
}

/// Score every pending match of the current round `a`-`b` and confirm the round.
fn play_round(ctrl: &mut TournamentController<InMemoryStore>, a: u32, b: u32) {
    let matches = ctrl.current_round().unwrap().matches.clone();
    for m in &matches {
        ctrl.record_score(m.id, m.teams[0].id, a).unwrap();
        ctrl.record_score(m.id, m.teams[1].id, b).unwrap();
    }
    ctrl.confirm_round().unwrap();
}

#[test]
fn starts_not_started_with_empty_standings() {
    let ctrl = TournamentController::new(InMemoryStore::new());
    assert_eq!(ctrl.state(), TournamentState::NotStarted);
    assert!(ctrl.tournament().is_none());
    assert!(ctrl.current_round().is_none());
    assert!(ctrl.standings().is_empty());
    assert!(ctrl.history().is_empty());
}

#[test]
fn operations_before_start_are_invalid_state() {
    let mut ctrl = TournamentController::new(InMemoryStore::new());
    assert!(matches!(ctrl.record_score(1, 1, 3), Err(TournamentError::InvalidState(_))));
    assert!(matches!(ctrl.confirm_match(1), Err(TournamentError::InvalidState(_))));
    assert!(matches!(ctrl.confirm_round(), Err(TournamentError::InvalidState(_))));
}

#[test]
fn start_moves_to_in_progress_and_saves_a_snapshot() {
    let ctrl = started(8, 2);
    assert_eq!(ctrl.state(), TournamentState::InProgress);
    assert_eq!(ctrl.current_round().unwrap().number, 1);
    assert_eq!(ctrl.standings().len(), 8);
    assert!(ctrl.store().raw_snapshot().is_some());
}

#[test]
fn invalid_start_keeps_not_started() {
    let mut ctrl = TournamentController::new(InMemoryStore::new());
    let err = ctrl
        .start(&names(6), TournamentConfig::with_courts(4))
        .unwrap_err();
    assert!(matches!(err, TournamentError::InvalidConfiguration(_)));
    assert_eq!(ctrl.state(), TournamentState::NotStarted);
    assert!(ctrl.store().raw_snapshot().is_none());
}

#[test]
fn second_start_requires_reset() {
    let mut ctrl = started(4, 1);
    let id = ctrl.tournament().unwrap().id;
    assert!(matches!(
        ctrl.start(&names(4), TournamentConfig::with_courts(1)),
        Err(TournamentError::InvalidState(_))
    ));
    assert_eq!(ctrl.tournament().unwrap().id, id);
}

#[test]
fn full_event_completes_and_appends_history() {
    let mut ctrl = started(4, 1);
    play_round(&mut ctrl, 11, 9);
    assert_eq!(ctrl.state(), TournamentState::InProgress);
    play_round(&mut ctrl, 11, 9);
    play_round(&mut ctrl, 11, 9);
    assert_eq!(ctrl.state(), TournamentState::Completed);
    assert!(ctrl.current_round().is_none());

    let history = ctrl.history();
    assert_eq!(history.len(), 1);
    let summary = &history[0];
    assert_eq!(summary.player_count, 4);
    assert_eq!(summary.court_count, 1);
    assert_eq!(summary.match_count, 3);
    // P1 is on the first team every round
    assert_eq!(summary.winner, "P1");
    assert_eq!(summary.winner_points, 33);
    assert_eq!(summary.players.len(), 4);
    assert_eq!(summary.players[0].name, "P1");

    assert!(matches!(ctrl.confirm_round(), Err(TournamentError::InvalidState(_))));
    assert_eq!(ctrl.history().len(), 1);
}

#[test]
fn reset_discards_tournament_but_keeps_history() {
    let mut ctrl = started(4, 1);
    for _ in 0..3 {
        play_round(&mut ctrl, 6, 4);
    }
    ctrl.reset();

    assert_eq!(ctrl.state(), TournamentState::NotStarted);
    assert!(ctrl.standings().is_empty());
    assert_eq!(ctrl.history().len(), 1);
    assert!(ctrl.store_mut().load_snapshot().is_none());

    ctrl.start(&names(6), TournamentConfig::with_courts(1)).unwrap();
    assert_eq!(ctrl.state(), TournamentState::InProgress);
}

#[test]
fn history_is_newest_first() {
    let mut ctrl = started(4, 1);
    for _ in 0..3 {
        play_round(&mut ctrl, 6, 4);
    }
    ctrl.reset();
    ctrl.start(&names(6), TournamentConfig::with_courts(1)).unwrap();
    for _ in 0..5 {
        play_round(&mut ctrl, 6, 4);
    }
    let history = ctrl.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].player_count, 6);
    assert_eq!(history[1].player_count, 4);
}

#[test]
fn persistence_failure_does_not_block_play() {
    let mut ctrl = started(4, 1);
    ctrl.store_mut().set_fail_writes(true);

    play_round(&mut ctrl, 8, 2);
    assert_eq!(ctrl.tournament().unwrap().current_round, 2);
    let warnings = ctrl.take_warnings();
    assert!(!warnings.is_empty());
    assert!(warnings[0].contains("save snapshot"));
    assert!(ctrl.take_warnings().is_empty());

    play_round(&mut ctrl, 8, 2);
    play_round(&mut ctrl, 8, 2);
    assert_eq!(ctrl.state(), TournamentState::Completed);
    assert!(ctrl
        .take_warnings()
        .iter()
        .any(|w| w.contains("append history")));
    assert!(ctrl.history().is_empty());

    ctrl.reset();
    assert_eq!(ctrl.state(), TournamentState::NotStarted);
}

#[test]
fn corrupt_history_is_kept_and_reported_on_completion() {
    let mut ctrl = started(4, 1);
    let corrupt = r#"[{"id":"not a real summary"}]"#;
    ctrl.store_mut().write_history(corrupt).unwrap();

    for _ in 0..3 {
        play_round(&mut ctrl, 8, 2);
    }
    assert_eq!(ctrl.state(), TournamentState::Completed);
    assert!(ctrl
        .take_warnings()
        .iter()
        .any(|w| w.contains("append history")));
    assert_eq!(
        ctrl.store().read_history().unwrap().as_deref(),
        Some(corrupt)
    );
}

#[test]
fn resume_restores_the_saved_tournament() {
    let mut ctrl = started(8, 2);
    play_round(&mut ctrl, 12, 8);
    let first = ctrl.current_round().unwrap().matches[0].clone();
    ctrl.record_score(first.id, first.teams[0].id, 5).unwrap();
    let standings = ctrl.standings();

    let resumed = TournamentController::resume(ctrl.into_store());
    assert_eq!(resumed.state(), TournamentState::InProgress);
    assert_eq!(resumed.tournament().unwrap().current_round, 2);
    assert_eq!(resumed.standings(), standings);
    let m = resumed.current_round().unwrap().matches[0].clone();
    assert_eq!(m.teams[0].score, 5);
}

#[test]
fn resume_discards_a_corrupt_snapshot() {
    let mut store = InMemoryStore::new();
    store.set_raw_snapshot(r#"{"courts": ["Court 1"], "saved_at": "2026-01-01T00:00:00Z"}"#);
    let ctrl = TournamentController::resume(store);
    assert_eq!(ctrl.state(), TournamentState::NotStarted);
    assert!(ctrl.store().raw_snapshot().is_none());
}

#[test]
fn score_policy_flows_through_the_controller() {
    let mut ctrl = TournamentController::new(InMemoryStore::new());
    ctrl.start(
        &names(4),
        TournamentConfig::with_courts(1).score_policy(ScorePolicy::FixedTotal(20)),
    )
    .unwrap();
    let m = ctrl.current_round().unwrap().matches[0].clone();
    ctrl.record_score(m.id, m.teams[0].id, 10).unwrap();
    ctrl.record_score(m.id, m.teams[1].id, 9).unwrap();
    assert!(matches!(
        ctrl.confirm_match(m.id),
        Err(TournamentError::ScoreTotalMismatch { expected: 20, actual: 19 })
    ));
    ctrl.record_score(m.id, m.teams[1].id, 10).unwrap();
    let outcome = ctrl.confirm_match(m.id).unwrap();
    assert!(outcome.round_advanced);
}
