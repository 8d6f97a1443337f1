//! Property tests for scheduling and scoring over random configurations and scores.
//!
//! Properties tested:
//! - Total rounds is players - 1 for every valid configuration
//! - No player appears twice in a round; no match exceeds the court count
//! - Scheduled matches plus dropped teams account for every team formed
//! - Each confirmation adds exactly 4 to the total matches played
//! - Player points equal the sum of their team scores over completed matches
//! - A confirmation rejected for an oversized score leaves every player untouched

use americano_tournament_web::{
    confirm_match, record_score, start_tournament, Tournament, TournamentConfig,
    TournamentError,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn config() -> impl Strategy<Value = (usize, usize)> {
    (2usize..=8).prop_flat_map(|half| {
        let players = half * 2;
        (Just(players), 1..=half)
    })
}

fn build(players: usize, courts: usize) -> Tournament {
    let names: Vec<String> = (1..=players).map(|i| format!("P{i}")).collect();
    start_tournament(&names, TournamentConfig::with_courts(courts)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_schedule_shape((players, courts) in config()) {
        let t = build(players, courts);
        prop_assert_eq!(t.total_rounds() as usize, players - 1);

        for round in &t.rounds {
            prop_assert!(round.matches.len() <= courts);
            prop_assert!(!round.matches.is_empty());
            let mut seen = HashSet::new();
            for m in &round.matches {
                let ids: HashSet<_> = m.player_ids().into_iter().collect();
                prop_assert_eq!(ids.len(), 4, "match {} repeats a player", m.id);
                for pid in m.player_ids() {
                    prop_assert!(seen.insert(pid), "player {} twice in round {}", pid, round.number);
                }
            }
        }

        // every round forms players / 2 teams; each is either on a court or dropped
        let teams_formed = (players / 2) * (players - 1);
        let teams_placed = 2 * t.report.scheduled_matches as usize;
        prop_assert_eq!(teams_placed + t.report.dropped_teams as usize, teams_formed);
        prop_assert_eq!(t.report.scheduled_matches as usize, t.total_matches());
        prop_assert!(t.report.scheduled_matches <= t.report.possible_matches);
    }

    #[test]
    fn prop_scoring_stays_consistent(
        (players, courts) in config(),
        scores in prop::collection::vec((0u32..=20, 0u32..=20), 60),
    ) {
        let mut t = build(players, courts);
        let ids: Vec<u32> = t.matches().map(|m| m.id).collect();

        for (k, id) in ids.iter().enumerate() {
            let (a, b) = scores[k % scores.len()];
            let m = t.get_match(*id).unwrap().clone();
            record_score(&mut t, *id, m.teams[0].id, a).unwrap();
            record_score(&mut t, *id, m.teams[1].id, b).unwrap();

            let before: u32 = t.players.iter().map(|p| p.matches_played).sum();
            confirm_match(&mut t, *id).unwrap();
            prop_assert!(confirm_match(&mut t, *id).is_err());
            let after: u32 = t.players.iter().map(|p| p.matches_played).sum();
            prop_assert_eq!(after - before, 4);
        }
        prop_assert!(t.is_completed());

        for p in &t.players {
            let expected: u32 = t
                .matches()
                .flat_map(|m| m.teams.iter())
                .filter(|team| team.contains(p.id))
                .map(|team| team.score)
                .sum();
            prop_assert_eq!(p.points, expected);
            prop_assert!(p.wins + p.losses <= p.matches_played);
        }
    }

    #[test]
    fn prop_oversized_scores_never_half_apply(
        (players, courts) in config(),
        scores in prop::collection::vec(
            (
                prop_oneof![0u32..=20, (u32::MAX - 20)..=u32::MAX],
                prop_oneof![0u32..=20, (u32::MAX - 20)..=u32::MAX],
            ),
            60,
        ),
    ) {
        let mut t = build(players, courts);
        let ids: Vec<u32> = t.matches().map(|m| m.id).collect();

        for (k, id) in ids.iter().enumerate() {
            let (a, b) = scores[k % scores.len()];
            let m = t.get_match(*id).unwrap().clone();
            record_score(&mut t, *id, m.teams[0].id, a).unwrap();
            record_score(&mut t, *id, m.teams[1].id, b).unwrap();

            let before = t.players.clone();
            match confirm_match(&mut t, *id) {
                Ok(_) => {}
                Err(TournamentError::ScoreOutOfRange { .. }) => {
                    prop_assert_eq!(&t.players, &before);
                    prop_assert!(!t.get_match(*id).unwrap().is_completed());
                    record_score(&mut t, *id, m.teams[0].id, 0).unwrap();
                    record_score(&mut t, *id, m.teams[1].id, 0).unwrap();
                    confirm_match(&mut t, *id).unwrap();
                }
                Err(e) => prop_assert!(false, "unexpected error {}", e),
            }
        }
        prop_assert!(t.is_completed());

        for p in &t.players {
            let expected: u64 = t
                .matches()
                .flat_map(|m| m.teams.iter())
                .filter(|team| team.contains(p.id))
                .map(|team| u64::from(team.score))
                .sum();
            prop_assert_eq!(u64::from(p.points), expected);
        }
    }
}
