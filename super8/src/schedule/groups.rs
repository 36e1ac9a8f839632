//! Group stage and semifinal pairing for the groups + finals format.

use log::debug;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::errors::{ScheduleError, ScheduleResult};
use super::round_robin::generate_round_robin_matches;
use super::{ensure_unique_ids, require_count, require_courts};
use crate::domain::{EventId, Match, Participant, ParticipantId};
use crate::ranking::RankingEntry;

/// Entrants per group
pub const GROUP_SIZE: usize = 4;

/// Name of the first group
pub const GROUP_A: &str = "Grupo A";

/// Name of the second group
pub const GROUP_B: &str = "Grupo B";

/// A named group of participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub participants: Vec<Participant>,
}

impl Group {
    pub fn new(name: impl Into<String>, participants: Vec<Participant>) -> Self {
        Self {
            name: name.into(),
            participants,
        }
    }

    pub fn contains(&self, participant_id: ParticipantId) -> bool {
        self.participants.iter().any(|p| p.id == participant_id)
    }
}

/// Splits a roster into two groups, shuffling it first unless told to keep
/// the given order.
pub struct GroupDrawer<R = ThreadRng> {
    rng: R,
}

impl GroupDrawer<ThreadRng> {
    /// Drawer backed by the thread-local generator
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for GroupDrawer<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GroupDrawer<R> {
    /// Drawer backed by a caller-supplied generator
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Split 8 participants into [`GROUP_A`] and [`GROUP_B`].
    ///
    /// With `seed` the input order is kept (first four form group A);
    /// otherwise a uniform shuffle of a copy decides the groups.
    pub fn draw(&mut self, participants: &[Participant], seed: bool) -> ScheduleResult<[Group; 2]> {
        require_count(participants, 2 * GROUP_SIZE)?;
        ensure_unique_ids(participants)?;

        let mut ordered = participants.to_vec();
        if !seed {
            ordered.shuffle(&mut self.rng);
        }
        let second = ordered.split_off(GROUP_SIZE);

        Ok([Group::new(GROUP_A, ordered), Group::new(GROUP_B, second)])
    }
}

/// Split 8 participants into two groups of 4 using the thread-local generator
pub fn divide_into_groups(participants: &[Participant], seed: bool) -> ScheduleResult<[Group; 2]> {
    GroupDrawer::new().draw(participants, seed)
}

/// Round robin inside one group, every match tagged with the group name
pub fn generate_group_matches(group: &Group, event_id: EventId) -> ScheduleResult<Vec<Match>> {
    Ok(generate_round_robin_matches(&group.participants, event_id)?
        .into_iter()
        .map(|m| m.in_group(group.name.as_str()))
        .collect())
}

/// Pack matches into rounds in a single greedy pass.
///
/// Matches are taken in input order. A match joins the current round only if
/// the round still has a free court and neither team already plays in it;
/// otherwise the round is closed and the match opens the next one. Rounds are
/// numbered from 1 and courts from 1 in placement order. No lookahead is
/// done, so the round count is not minimal.
pub fn organize_into_rounds(matches: Vec<Match>, num_courts: usize) -> ScheduleResult<Vec<Vec<Match>>> {
    require_courts(num_courts)?;

    let mut rounds: Vec<Vec<Match>> = Vec::new();
    let mut current: Vec<Match> = Vec::new();
    let mut busy: HashSet<ParticipantId> = HashSet::new();
    let mut round = 1u32;

    for mut m in matches {
        let conflict = busy.contains(&m.team1_id) || busy.contains(&m.team2_id);
        if current.len() >= num_courts || conflict {
            rounds.push(std::mem::take(&mut current));
            busy.clear();
            round += 1;
        }

        m.round = round;
        m.court = Some(current.len() as u32 + 1);
        busy.insert(m.team1_id);
        busy.insert(m.team2_id);
        current.push(m);
    }

    if !current.is_empty() {
        rounds.push(current);
    }

    debug!(
        "Packed {} matches into {} rounds on {} courts",
        rounds.iter().map(Vec::len).sum::<usize>(),
        rounds.len(),
        num_courts
    );
    Ok(rounds)
}

/// Best two of a group by wins alone; ties keep the given order.
fn top_two(ranking: &[RankingEntry], group: &str) -> ScheduleResult<(ParticipantId, ParticipantId)> {
    let mut by_wins: Vec<&RankingEntry> = ranking.iter().collect();
    by_wins.sort_by(|a, b| b.wins.cmp(&a.wins));

    match by_wins.as_slice() {
        [first, second, ..] => Ok((first.participant.id, second.participant.id)),
        _ => Err(ScheduleError::IncompleteGroup {
            group: group.to_string(),
            actual: ranking.len(),
        }),
    }
}

/// Cross-bracket semifinals from the two group standings: A1 vs B2 and
/// B1 vs A2, both in `start_round` with no court assigned.
///
/// Group places are decided by wins only, not by the full tiebreak chain
/// used for event standings.
pub fn generate_finals(
    group_a_ranking: &[RankingEntry],
    group_b_ranking: &[RankingEntry],
    event_id: EventId,
    start_round: u32,
) -> ScheduleResult<[Match; 2]> {
    let (a1, a2) = top_two(group_a_ranking, GROUP_A)?;
    let (b1, b2) = top_two(group_b_ranking, GROUP_B)?;

    Ok([
        Match::pending(event_id, a1, b2).with_round(start_round),
        Match::pending(event_id, b1, a2).with_round(start_round),
    ])
}
