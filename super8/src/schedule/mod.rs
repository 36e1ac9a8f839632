//! Match schedulers for the three event formats.
//!
//! - [`round_robin`]: every pair plays every other pair once, laid out in
//!   rounds with the circle method
//! - [`groups`]: two groups of four, greedy round packing, then cross-bracket
//!   semifinals from the group standings
//! - [`rotating`]: individual players change partner every round, paired
//!   greedily to avoid repeated partnerships and oppositions
//!
//! Schedulers are pure: they never mutate their input and report broken
//! preconditions as [`ScheduleError`] instead of producing a partial schedule.

use std::collections::HashSet;

use crate::domain::Participant;

pub mod errors;
pub mod groups;
pub mod rotating;
pub mod round_robin;

pub use errors::{ScheduleError, ScheduleResult};
pub use groups::{
    GROUP_A, GROUP_B, GROUP_SIZE, Group, GroupDrawer, divide_into_groups, generate_finals,
    generate_group_matches, organize_into_rounds,
};
pub use rotating::{
    DEFAULT_ROTATING_ROUNDS, PendingMatch, PendingPair, RotatingRound, distinct_partnerships,
    explain_rotation, generate_rotating_rounds,
};
pub use round_robin::{generate_round_robin_matches, schedule_round_robin};

pub(crate) fn require_courts(num_courts: usize) -> ScheduleResult<()> {
    if num_courts == 0 {
        return Err(ScheduleError::NoCourts);
    }
    Ok(())
}

pub(crate) fn require_count(participants: &[Participant], expected: usize) -> ScheduleResult<()> {
    if participants.len() != expected {
        return Err(ScheduleError::WrongParticipantCount {
            expected,
            actual: participants.len(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_unique_ids(participants: &[Participant]) -> ScheduleResult<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.id) {
            return Err(ScheduleError::DuplicateParticipant(participant.id));
        }
    }
    Ok(())
}

/// Pair formats need both players on every entry
pub(crate) fn require_pairs(participants: &[Participant]) -> ScheduleResult<()> {
    match participants.iter().find(|p| !p.is_pair()) {
        Some(p) => Err(ScheduleError::IncompletePair(p.id)),
        None => Ok(()),
    }
}

/// The rotating format builds its own pairs from single players
pub(crate) fn require_individuals(participants: &[Participant]) -> ScheduleResult<()> {
    match participants.iter().find(|p| p.is_pair()) {
        Some(p) => Err(ScheduleError::UnexpectedPair(p.id)),
        None => Ok(()),
    }
}
