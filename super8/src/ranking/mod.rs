//! Ranking engine.
//!
//! Standings are a pure function of the participants, the finished matches,
//! the tiebreak criteria and the points awarded per win. Nothing is cached:
//! callers recompute after every score change from a complete snapshot.
//!
//! Ordering rules:
//! - **Points** always come first
//! - **Numeric criteria** (`wins`, `game_difference`, `games_for`) break
//!   ties in the order the event lists them
//! - **Head-to-head** only reorders blocks of exactly two entrants still
//!   level on every numeric metric; larger blocks keep their order
//! - Anything still tied keeps input order
//!
//! ## Example
//!
//! ```
//! use super8::domain::{Match, MatchScores, MatchStatus, Participant, SetScore};
//! use super8::ranking::{calculate_ranking, DEFAULT_TIEBREAK_CRITERIA};
//!
//! let participants = vec![Participant::pair(1, 10, 11), Participant::pair(2, 20, 21)];
//! let mut m = Match::pending(1, 1, 2).with_round(1);
//! m.status = MatchStatus::Finished;
//! m.scores = MatchScores::one_set(SetScore::new(3, 6));
//! m.winner_id = Some(2);
//!
//! let ranking = calculate_ranking(&participants, &[m], &DEFAULT_TIEBREAK_CRITERIA, 3);
//! assert_eq!(ranking[0].participant.id, 2);
//! assert_eq!(ranking[0].points, 3);
//! assert_eq!(ranking[1].game_difference, -3);
//! ```

pub mod criteria;
pub mod engine;

pub use criteria::{DEFAULT_TIEBREAK_CRITERIA, TiebreakCriterion};
pub use engine::{RankingEntry, calculate_individual_ranking, calculate_ranking};
