//! Error types for schedule generation

use thiserror::Error;

use crate::domain::ParticipantId;

/// Preconditions a scheduler refuses to work around
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Roster size differs from what the format needs
    #[error("expected exactly {expected} participants, got {actual}")]
    WrongParticipantCount { expected: usize, actual: usize },

    /// Roster too small
    #[error("need at least {needed} participants, got {actual}")]
    NotEnoughParticipants { needed: usize, actual: usize },

    /// Odd roster for a rotation
    #[error("circular rotation needs an even number of participants, got {0}")]
    OddParticipantCount(usize),

    /// Entry without a second player
    #[error("participant {0} must be a complete pair for this format")]
    IncompletePair(ParticipantId),

    /// Pair entered in an individual format
    #[error("participant {0} must be an individual player for this format")]
    UnexpectedPair(ParticipantId),

    /// Participant id listed twice
    #[error("participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    /// Participant id not on the roster
    #[error("participant {0} is not part of the event")]
    UnknownParticipant(ParticipantId),

    /// Zero courts
    #[error("at least one court is required")]
    NoCourts,

    /// Group ranking too short for the semifinals
    #[error("{group} needs at least 2 ranked entries for the semifinals, got {actual}")]
    IncompleteGroup { group: String, actual: usize },
}

/// Result type for schedule generation
pub type ScheduleResult<T> = Result<T, ScheduleError>;
