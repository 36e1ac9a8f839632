//! Rotating partners scheduler for individual players.
//!
//! Every round the players are paired greedily so that partnerships and
//! oppositions already seen are avoided where possible. Pairs formed in a
//! round play each other in formation order: pair 1 vs pair 2, pair 3 vs
//! pair 4, and so on.
//!
//! A pair has no participant id of its own until someone materializes it,
//! so the generated matches reference [`PendingPair`]s instead of team ids.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::errors::{ScheduleError, ScheduleResult};
use super::{ensure_unique_ids, require_courts, require_individuals};
use crate::domain::{EventId, Match, Participant, ParticipantId};

/// Rounds played when the event does not say otherwise
pub const DEFAULT_ROTATING_ROUNDS: usize = 4;

/// Penalty per earlier round played together
const PARTNER_WEIGHT: u32 = 10;

/// Penalty per earlier round played against each other
const OPPONENT_WEIGHT: u32 = 2;

/// Two individual participants playing as a team, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PendingPair {
    pub first: ParticipantId,
    pub second: ParticipantId,
}

impl PendingPair {
    pub fn new(a: ParticipantId, b: ParticipantId) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    pub fn contains(&self, participant_id: ParticipantId) -> bool {
        self.first == participant_id || self.second == participant_id
    }
}

impl fmt::Display for PendingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} & {}", self.first, self.second)
    }
}

/// A rotating match whose teams are not materialized yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMatch {
    pub event_id: EventId,
    pub round: u32,
    pub court: u32,
    pub team1: PendingPair,
    pub team2: PendingPair,
}

impl PendingMatch {
    /// Turn into a regular pending [`Match`] once both pairs have ids
    pub fn materialize(&self, team1_id: ParticipantId, team2_id: ParticipantId) -> Match {
        Match::pending(self.event_id, team1_id, team2_id)
            .with_round(self.round)
            .with_court(self.court)
    }
}

/// Pairs formed in one round and the matches between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingRound {
    pub round: u32,
    pub pairs: Vec<(Participant, Participant)>,
    pub matches: Vec<PendingMatch>,
}

/// How often two players have been partners or opponents so far
#[derive(Debug, Default)]
struct RepetitionTable {
    partners: HashMap<PendingPair, u32>,
    opponents: HashMap<PendingPair, u32>,
}

impl RepetitionTable {
    fn penalty(&self, a: ParticipantId, b: ParticipantId) -> u32 {
        let key = PendingPair::new(a, b);
        let partners = self.partners.get(&key).copied().unwrap_or(0);
        let opponents = self.opponents.get(&key).copied().unwrap_or(0);
        partners * PARTNER_WEIGHT + opponents * OPPONENT_WEIGHT
    }

    fn record(&mut self, round: &RotatingRound) {
        for (a, b) in &round.pairs {
            *self.partners.entry(PendingPair::new(a.id, b.id)).or_default() += 1;
        }

        for m in &round.matches {
            for left in [m.team1.first, m.team1.second] {
                for right in [m.team2.first, m.team2.second] {
                    *self.opponents.entry(PendingPair::new(left, right)).or_default() += 1;
                }
            }
        }
    }
}

/// Greedily pair the players for one round.
///
/// Each step scans every unordered pair of players still available and takes
/// the one with the lowest penalty, keeping the first one found on ties.
fn pair_round(participants: &[Participant], table: &RepetitionTable) -> Vec<(Participant, Participant)> {
    let mut available: Vec<&Participant> = participants.iter().collect();
    let mut pairs = Vec::with_capacity(available.len() / 2);

    while available.len() >= 2 {
        let mut best: Option<(usize, usize)> = None;
        let mut best_penalty = u32::MAX;

        for i in 0..available.len() {
            for j in i + 1..available.len() {
                let penalty = table.penalty(available[i].id, available[j].id);
                if penalty < best_penalty {
                    best_penalty = penalty;
                    best = Some((i, j));
                }
            }
        }

        let Some((i, j)) = best else {
            break;
        };
        let second = available.remove(j);
        let first = available.remove(i);
        pairs.push((first.clone(), second.clone()));
    }

    pairs
}

/// Generate `min(num_rounds, n - 1)` rotating rounds for individual players.
///
/// Matches within a round get courts `1..=num_courts` in turn. The result is
/// deterministic for a given input order.
pub fn generate_rotating_rounds(
    participants: &[Participant],
    event_id: EventId,
    num_courts: usize,
    num_rounds: usize,
) -> ScheduleResult<Vec<RotatingRound>> {
    require_courts(num_courts)?;
    require_individuals(participants)?;
    ensure_unique_ids(participants)?;

    let n = participants.len();
    if n < 4 {
        return Err(ScheduleError::NotEnoughParticipants {
            needed: 4,
            actual: n,
        });
    }
    if n % 2 != 0 {
        return Err(ScheduleError::OddParticipantCount(n));
    }

    let total_rounds = num_rounds.min(n - 1);
    let mut table = RepetitionTable::default();
    let mut rounds = Vec::with_capacity(total_rounds);

    for round in (1..).take(total_rounds) {
        let pairs = pair_round(participants, &table);
        let matches = pairs
            .chunks_exact(2)
            .enumerate()
            .map(|(idx, teams)| PendingMatch {
                event_id,
                round,
                court: (idx % num_courts) as u32 + 1,
                team1: PendingPair::new(teams[0].0.id, teams[0].1.id),
                team2: PendingPair::new(teams[1].0.id, teams[1].1.id),
            })
            .collect::<Vec<_>>();

        debug!(
            "Round {} pairs {:?}",
            round,
            matches
                .iter()
                .flat_map(|m| [m.team1, m.team2])
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
        );

        let round = RotatingRound {
            round,
            pairs,
            matches,
        };
        table.record(&round);
        rounds.push(round);
    }

    info!(
        "Generated {} rotating rounds for {} players on {} courts",
        rounds.len(),
        n,
        num_courts
    );
    Ok(rounds)
}

/// Every partnership used across the rounds, in order of first appearance
pub fn distinct_partnerships(rounds: &[RotatingRound]) -> Vec<PendingPair> {
    let mut seen = HashSet::new();
    rounds
        .iter()
        .flat_map(|r| r.pairs.iter())
        .map(|(a, b)| PendingPair::new(a.id, b.id))
        .filter(|pair| seen.insert(*pair))
        .collect()
}

/// Human-readable account of how the rotation was built
pub fn explain_rotation(rounds: &[RotatingRound]) -> String {
    let mut out = String::from("How the rotation was generated:\n\n");

    out.push_str(&format!("Rounds: {}\n", rounds.len()));
    if let Some(first) = rounds.first() {
        out.push_str(&format!("Games per round: {}\n", first.matches.len()));
    }

    out.push_str("\nRounds:\n");
    for round in rounds {
        out.push_str(&format!("\nRound {}:\n", round.round));
        for (idx, m) in round.matches.iter().enumerate() {
            out.push_str(&format!(
                "  Game {} (court {}): {} vs {}\n",
                idx + 1,
                m.court,
                m.team1,
                m.team2
            ));
        }
    }

    out.push_str("\nHeuristic:\n");
    out.push_str(&format!(
        "- avoid repeating partners (weight {PARTNER_WEIGHT})\n"
    ));
    out.push_str(&format!(
        "- avoid repeating opponents (weight {OPPONENT_WEIGHT})\n"
    ));
    out.push_str("- spread each round's games across the courts\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: i64) -> Vec<Participant> {
        (1..=n).map(|i| Participant::individual(i, i * 100)).collect()
    }

    fn pair_ids(round: &RotatingRound) -> Vec<(i64, i64)> {
        round.pairs.iter().map(|(a, b)| (a.id, b.id)).collect()
    }

    #[test]
    fn test_first_rounds_follow_greedy_choice() {
        let rounds = generate_rotating_rounds(&players(8), 5, 2, 4).unwrap();

        assert_eq!(pair_ids(&rounds[0]), vec![(1, 2), (3, 4), (5, 6), (7, 8)]);
        assert_eq!(pair_ids(&rounds[1]), vec![(1, 5), (2, 6), (3, 7), (4, 8)]);
        assert_eq!(pair_ids(&rounds[2]), vec![(1, 7), (2, 8), (3, 5), (4, 6)]);
        assert_eq!(pair_ids(&rounds[3]), vec![(1, 3), (2, 4), (5, 7), (6, 8)]);

        let first = &rounds[0].matches[0];
        assert_eq!(first.team1, PendingPair::new(1, 2));
        assert_eq!(first.team2, PendingPair::new(3, 4));
        assert_eq!((first.event_id, first.round, first.court), (5, 1, 1));
        assert_eq!(rounds[0].matches[1].court, 2);
    }

    #[test]
    fn test_every_round_covers_all_players() {
        let rounds = generate_rotating_rounds(&players(8), 1, 2, 4).unwrap();
        assert_eq!(rounds.len(), 4);

        for round in &rounds {
            assert_eq!(round.pairs.len(), 4);
            assert_eq!(round.matches.len(), 2);
            let ids: HashSet<_> = round.pairs.iter().flat_map(|(a, b)| [a.id, b.id]).collect();
            assert_eq!(ids.len(), 8);
        }
    }

    #[test]
    fn test_no_partnership_repeats_in_four_rounds() {
        let rounds = generate_rotating_rounds(&players(8), 1, 2, 4).unwrap();
        assert_eq!(distinct_partnerships(&rounds).len(), 16);
    }

    #[test]
    fn test_round_count_capped() {
        let rounds = generate_rotating_rounds(&players(8), 1, 2, 20).unwrap();
        assert_eq!(rounds.len(), 7);
        assert_eq!(rounds.last().map(|r| r.round), Some(7));
    }

    #[test]
    fn test_single_court_reuses_court_one() {
        let rounds = generate_rotating_rounds(&players(8), 1, 1, 2).unwrap();
        assert!(rounds.iter().flat_map(|r| &r.matches).all(|m| m.court == 1));
    }

    #[test]
    fn test_rejects_pairs_and_small_rosters() {
        let mut roster = players(8);
        roster[3] = Participant::pair(4, 400, 401);
        assert_eq!(
            generate_rotating_rounds(&roster, 1, 2, 4),
            Err(ScheduleError::UnexpectedPair(4))
        );
        assert!(matches!(
            generate_rotating_rounds(&players(2), 1, 2, 4),
            Err(ScheduleError::NotEnoughParticipants { needed: 4, actual: 2 })
        ));
        assert_eq!(
            generate_rotating_rounds(&players(8), 1, 0, 4),
            Err(ScheduleError::NoCourts)
        );
    }

    #[test]
    fn test_materialize_keeps_slot() {
        let pending = PendingMatch {
            event_id: 3,
            round: 2,
            court: 1,
            team1: PendingPair::new(4, 1),
            team2: PendingPair::new(2, 3),
        };
        assert_eq!(pending.team1.first, 1);

        let m = pending.materialize(101, 102);
        assert_eq!((m.team1_id, m.team2_id), (101, 102));
        assert_eq!((m.round, m.court), (2, Some(1)));
        assert!(!m.is_finished());
    }

    #[test]
    fn test_explanation_lists_games() {
        let rounds = generate_rotating_rounds(&players(8), 1, 2, 2).unwrap();
        let text = explain_rotation(&rounds);

        assert!(text.contains("Rounds: 2"));
        assert!(text.contains("Games per round: 2"));
        assert!(text.contains("Game 1 (court 1): 1 & 2 vs 3 & 4"));
        assert!(text.contains("Round 2:"));
        assert!(text.contains("weight 10"));
    }
}
