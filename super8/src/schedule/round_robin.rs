//! All-play-all matchups and circular round scheduling.

use log::debug;
use std::collections::VecDeque;

use super::errors::{ScheduleError, ScheduleResult};
use super::{ensure_unique_ids, require_courts};
use crate::domain::{EventId, Match, Participant, ParticipantId};

/// One pending match per unordered pair of participants, in input order:
/// `n * (n - 1) / 2` matches, none placed in a round yet.
///
/// A participant id listed twice is refused, since it would pair an entry
/// with itself.
pub fn generate_round_robin_matches(
    participants: &[Participant],
    event_id: EventId,
) -> ScheduleResult<Vec<Match>> {
    ensure_unique_ids(participants)?;

    Ok(participants
        .iter()
        .enumerate()
        .flat_map(|(i, first)| {
            participants[i + 1..]
                .iter()
                .map(move |second| Match::pending(event_id, first.id, second.id))
        })
        .collect())
}

/// Arrange a full round robin into rounds with the circle method.
///
/// The first participant stays fixed while the others rotate around a ring.
/// Each of the `n - 1` rotations has every participant play exactly once; it
/// is then split into consecutive rounds of at most `num_courts` matches,
/// with courts numbered from 1 inside each round. Rounds are numbered
/// sequentially from 1 across the whole schedule.
pub fn schedule_round_robin(
    participants: &[Participant],
    event_id: EventId,
    num_courts: usize,
) -> ScheduleResult<Vec<Vec<Match>>> {
    require_courts(num_courts)?;
    ensure_unique_ids(participants)?;

    let n = participants.len();
    if n < 2 {
        return Err(ScheduleError::NotEnoughParticipants {
            needed: 2,
            actual: n,
        });
    }
    if n % 2 != 0 {
        return Err(ScheduleError::OddParticipantCount(n));
    }

    let fixed = participants[0].id;
    let mut ring: VecDeque<ParticipantId> = participants[1..].iter().map(|p| p.id).collect();
    let mut rounds: Vec<Vec<Match>> = Vec::new();

    for rotation in 0..n - 1 {
        let mut pairings = Vec::with_capacity(n / 2);
        pairings.push((fixed, ring[0]));
        for i in 1..n / 2 {
            pairings.push((ring[i], ring[n - 1 - i]));
        }
        ring.rotate_right(1);

        debug!(
            "Rotation {} pairs {:?}",
            rotation + 1,
            pairings.as_slice()
        );

        for chunk in pairings.chunks(num_courts) {
            let round = rounds.len() as u32 + 1;
            rounds.push(
                chunk
                    .iter()
                    .zip(1u32..)
                    .map(|(&(team1, team2), court)| {
                        Match::pending(event_id, team1, team2)
                            .with_round(round)
                            .with_court(court)
                    })
                    .collect(),
            );
        }
    }

    Ok(rounds)
}
