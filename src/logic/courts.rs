//! Court assigner: turn consecutive teams into matches and put them on courts.

use crate::logic::pairing::DraftTeam;
use crate::models::{Match, MatchId, Team, TeamId};

/// Hands out tournament-wide match and team ids.
#[derive(Clone, Debug)]
pub struct IdSequence {
    next_match: MatchId,
    next_team: TeamId,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            next_match: 1,
            next_team: 1,
        }
    }
}

impl IdSequence {
    pub fn next_match(&mut self) -> MatchId {
        let id = self.next_match;
        self.next_match += 1;
        id
    }

    pub fn next_team(&mut self) -> TeamId {
        let id = self.next_team;
        self.next_team += 1;
        id
    }
}

#[derive(Clone, Debug, Default)]
pub struct CourtAssignment {
    pub matches: Vec<Match>,
    /// Teams that did not become a match (over court capacity, or an unpaired last team).
    pub dropped: u32,
}

/// Pair teams two at a time into matches, at most one match per court.
///
/// Only the first `2 * courts.len()` teams are used. Match `k` (0-based) plays on
/// `courts[k % courts.len()]`.
pub fn assign_courts(
    round: u32,
    teams: &[DraftTeam],
    courts: &[String],
    ids: &mut IdSequence,
) -> CourtAssignment {
    if courts.is_empty() {
        return CourtAssignment {
            matches: Vec::new(),
            dropped: teams.len() as u32,
        };
    }

    let capacity = (2 * courts.len()).min(teams.len());
    let matches: Vec<Match> = teams[..capacity]
        .chunks_exact(2)
        .enumerate()
        .map(|(k, pair)| {
            let team_1 = Team::new(ids.next_team(), pair[0].players);
            let team_2 = Team::new(ids.next_team(), pair[1].players);
            Match::new(
                ids.next_match(),
                round,
                k as u32 + 1,
                courts[k % courts.len()].clone(),
                [team_1, team_2],
            )
        })
        .collect();

    let dropped = (teams.len() - 2 * matches.len()) as u32;
    CourtAssignment { matches, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_court_names;

    fn draft(pairs: &[[u32; 2]]) -> Vec<DraftTeam> {
        pairs
            .iter()
            .map(|&players| DraftTeam {
                players,
                repeat: false,
            })
            .collect()
    }

    #[test]
    fn caps_matches_at_court_count() {
        let teams = draft(&[[1, 2], [3, 4], [5, 6], [7, 8]]);
        let out = assign_courts(1, &teams, &default_court_names(1), &mut IdSequence::default());
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.dropped, 2);
        assert_eq!(out.matches[0].court, "Court 1");
        assert_eq!(out.matches[0].player_ids(), [1, 2, 3, 4]);
    }

    #[test]
    fn odd_team_is_dropped() {
        let teams = draft(&[[1, 2], [3, 4], [5, 6]]);
        let out = assign_courts(2, &teams, &default_court_names(3), &mut IdSequence::default());
        assert_eq!(out.matches.len(), 1);
        assert_eq!(out.dropped, 1);
        assert_eq!(out.matches[0].round, 2);
        assert_eq!(out.matches[0].number, 1);
    }

    #[test]
    fn ids_continue_across_calls() {
        let mut ids = IdSequence::default();
        let teams = draft(&[[1, 2], [3, 4], [5, 6], [7, 8]]);
        let courts = default_court_names(2);
        let first = assign_courts(1, &teams, &courts, &mut ids);
        let second = assign_courts(2, &teams, &courts, &mut ids);
        assert_eq!(first.matches[1].court, "Court 2");
        assert_eq!(first.matches[1].id, 2);
        assert_eq!(second.matches[0].id, 3);
        assert_eq!(second.matches[0].teams[0].id, 5);
    }
}
