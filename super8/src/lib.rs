//! # Super 8
//!
//! Scheduling and ranking engine for beach-tennis "Super 8" events: eight
//! entrants, a fixed number of courts and one of three formats.
//!
//! Everything here is a pure computation over in-memory values. Schedulers
//! never mutate their input, the ranking is recomputed from a full snapshot
//! of matches, and validation failures come back as values rather than
//! panics.
//!
//! ## Formats
//!
//! - **Round robin**: every pair plays every other pair once
//! - **Groups + finals**: two groups of four, then A1 vs B2 and B1 vs A2
//! - **Rotating**: eight individual players, a new partner every round
//!
//! ## Core Modules
//!
//! - [`domain`]: participants, matches and set scores
//! - [`scoring`]: score rulesets, set and match validation, walkover scores
//! - [`schedule`]: the three schedulers
//! - [`ranking`]: standings with configurable tiebreak criteria
//! - [`event`]: configuration, match generation and result recording
//!
//! ## Example
//!
//! ```
//! use super8::{EventConfig, InMemoryPairRegistry, Participant, generate_event_matches};
//!
//! let pairs: Vec<Participant> = (1..=8).map(|i| Participant::pair(i, i * 10, i * 10 + 1)).collect();
//! let config = EventConfig::default();
//! let mut registry = InMemoryPairRegistry::new(&pairs);
//!
//! let matches = generate_event_matches(&config, 1, &pairs, &mut registry).unwrap();
//! assert_eq!(matches.len(), 28);
//! ```

/// Participants, matches and scores.
pub mod domain;
pub use domain::{Match, MatchScores, MatchStatus, OutcomeType, Participant, SetScore, Side};

/// Score rulesets and validation.
pub mod scoring;
pub use scoring::{ScoreRulesetId, SetsPerMatch, validate_match_score, validate_set_score};

/// Match schedulers.
pub mod schedule;
pub use schedule::{ScheduleError, ScheduleResult};

/// Ranking engine.
pub mod ranking;
pub use ranking::{RankingEntry, TiebreakCriterion, calculate_individual_ranking, calculate_ranking};

/// Event configuration, generation and results.
pub mod event;
pub use event::{
    EventConfig, EventError, EventFormat, EventResult, InMemoryPairRegistry, PairRegistry,
    generate_event_matches, schedule_semifinals, standings,
};
