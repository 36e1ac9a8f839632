//! Core event entities: participants, matches and set scores.

pub mod models;

pub use models::{
    EventId, Match, MatchScores, MatchStatus, OutcomeType, Participant, ParticipantId, PlayerId,
    SetScore, Side,
};
