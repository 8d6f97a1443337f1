//! Round generator: choose partnerships for one round with a greedy scan over the ledger.

use crate::logic::courts::{assign_courts, IdSequence};
use crate::logic::ledger::PartnershipLedger;
use crate::models::{Player, PlayerId, Round};

/// A partnership picked by the scan, before it is placed on a court.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DraftTeam {
    pub players: [PlayerId; 2],
    /// The pair had already partnered; no fresh pair was left among the available players.
    pub repeat: bool,
}

/// Order in which the pair scan considers players.
///
/// Players who sat out more often come first so they get the court slots; ties by ascending id.
pub fn scan_order(players: &[Player]) -> Vec<PlayerId> {
    let mut order: Vec<(u32, PlayerId)> = players.iter().map(|p| (p.times_sat_out, p.id)).collect();
    order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    order.into_iter().map(|(_, id)| id).collect()
}

/// Pair up `order` into teams.
///
/// Repeatedly takes the first pair `(order[i], order[j])`, `i < j`, of still available players
/// whose partnership is not in the ledger. When no such pair exists, the first two available
/// players are teamed anyway and the team is flagged as a repeat. With an odd count the last
/// available player is left out.
pub fn pair_players(order: &[PlayerId], ledger: &PartnershipLedger) -> Vec<DraftTeam> {
    let mut available = vec![true; order.len()];
    let mut remaining = order.len();
    let mut teams = Vec::with_capacity(order.len() / 2);

    while remaining >= 2 {
        let (i, j, repeat) = match first_fresh_pair(order, &available, ledger) {
            Some((i, j)) => (i, j, false),
            None => {
                let mut free = (0..order.len()).filter(|&k| available[k]);
                match (free.next(), free.next()) {
                    (Some(i), Some(j)) => (i, j, true),
                    _ => break,
                }
            }
        };
        available[i] = false;
        available[j] = false;
        remaining -= 2;
        teams.push(DraftTeam {
            players: [order[i], order[j]],
            repeat,
        });
    }

    teams
}

fn first_fresh_pair(
    order: &[PlayerId],
    available: &[bool],
    ledger: &PartnershipLedger,
) -> Option<(usize, usize)> {
    for i in 0..order.len() {
        if !available[i] {
            continue;
        }
        for j in (i + 1)..order.len() {
            if available[j] && !ledger.has_played(order[i], order[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// One generated round plus what the pairing step had to give up.
#[derive(Clone, Debug)]
pub struct GeneratedRound {
    pub round: Round,
    /// Teams that got no court slot.
    pub dropped_teams: u32,
    /// Scheduled teams that repeat an earlier partnership.
    pub relaxed_pairings: u32,
}

/// Generate round `number`: pair players, place teams on courts, record the scheduled
/// partnerships in `ledger`, and count sit-outs on the players.
pub fn generate_round(
    number: u32,
    players: &mut [Player],
    courts: &[String],
    ledger: &mut PartnershipLedger,
    ids: &mut IdSequence,
) -> GeneratedRound {
    let order = scan_order(players);
    let draft = pair_players(&order, ledger);
    let assignment = assign_courts(number, &draft, courts, ids);

    // matches are built from the leading teams of the draft, in order
    let mut relaxed_pairings = 0;
    for team in draft.iter().take(2 * assignment.matches.len()) {
        let [a, b] = team.players;
        if team.repeat {
            relaxed_pairings += 1;
            log::warn!("Round {}: {} and {} partner again (no fresh pair left)", number, a, b);
        }
        ledger.record(a, b);
    }

    let mut sitting_out: Vec<PlayerId> = order
        .iter()
        .copied()
        .filter(|&id| !assignment.matches.iter().any(|m| m.involves(id)))
        .collect();
    sitting_out.sort_unstable();
    for p in players.iter_mut().filter(|p| sitting_out.contains(&p.id)) {
        p.record_sat_out();
    }
    if assignment.dropped > 0 {
        log::warn!(
            "Round {}: {} team(s) without a court, {} player(s) sit out",
            number,
            assignment.dropped,
            sitting_out.len()
        );
    }

    GeneratedRound {
        round: Round {
            number,
            matches: assignment.matches,
            sitting_out,
        },
        dropped_teams: assignment.dropped,
        relaxed_pairings,
    }
}
