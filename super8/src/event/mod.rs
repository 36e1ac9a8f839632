//! Event layer: configuration, match generation, result recording and
//! standings for a whole Super 8 event.

use thiserror::Error;

use crate::domain::{Match, Participant};
use crate::ranking::{RankingEntry, calculate_individual_ranking, calculate_ranking};
use crate::schedule::ScheduleError;

pub mod config;
pub mod generator;
pub mod results;

pub use config::{ConfigError, ConfigResult, EventConfig, EventFormat};
pub use generator::{
    EVENT_SIZE, EventGenerator, InMemoryPairRegistry, PairRegistry, generate_event_matches,
    schedule_semifinals,
};
pub use results::{ResultError, ResultResult};

/// Event-level errors
#[derive(Debug, Error)]
pub enum EventError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scheduler refused the roster
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Result could not be recorded
    #[error(transparent)]
    Result(#[from] ResultError),

    /// No group stage to seed from
    #[error("no group-stage matches found")]
    NoGroupMatches,

    /// Group stage still running
    #[error("group stage still has {0} pending matches")]
    GroupStageUnfinished(usize),
}

/// Result type for event operations
pub type EventResult<T> = Result<T, EventError>;

/// Current standings of an event.
///
/// Rotating events rank individual players, so `participants` must include
/// both the players and the pairs formed for them. Other formats rank the
/// fixed pairs.
pub fn standings(
    config: &EventConfig,
    participants: &[Participant],
    matches: &[Match],
) -> Vec<RankingEntry> {
    let criteria = &config.tiebreak_criteria;
    match config.format {
        EventFormat::Rotating => {
            calculate_individual_ranking(participants, matches, criteria, config.points_per_win)
        }
        EventFormat::RoundRobin | EventFormat::GroupsFinals => {
            calculate_ranking(participants, matches, criteria, config.points_per_win)
        }
    }
}
