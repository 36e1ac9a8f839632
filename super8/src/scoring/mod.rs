//! Score rulesets and result validation.
//!
//! Three fixed presets decide what a legal set looks like:
//! - **fast_4**: first to 4 games, 4-3 is the closest legal score
//! - **normal_6**: 6-0 through 6-4, or 7-5; 6-5 and 7-6 never finish a set
//! - **super_tiebreak**: first to 10 with a margin of 2, no upper bound
//!
//! A two-set match split 1-1 is decided by a third set that is always
//! played as a super tiebreak.
//!
//! ## Example
//!
//! ```
//! use super8::domain::{MatchScores, SetScore};
//! use super8::scoring::{validate_match_score, ScoreRulesetId, SetsPerMatch};
//!
//! let ruleset = ScoreRulesetId::Normal6.ruleset();
//! let scores = MatchScores::two_sets(SetScore::new(6, 4), SetScore::new(4, 6));
//!
//! let validation = validate_match_score(ruleset, SetsPerMatch::Two, &scores);
//! assert!(validation.requires_decider());
//!
//! let scores = scores.with_decider(SetScore::new(10, 8));
//! assert!(validate_match_score(ruleset, SetsPerMatch::Two, &scores).is_ok());
//! ```

pub mod errors;
pub mod ruleset;
pub mod validation;

pub use errors::{MatchScoreError, SetScoreError, SetScoreResult, UnsupportedSetCount};
pub use ruleset::{
    DEFAULT_SCORE_RULESET, FAST_4, NORMAL_6, SCORE_RULESETS, SUPER_TIEBREAK, ScoreRuleset,
    ScoreRulesetId, validate_set_score,
};
pub use validation::{
    MatchScoreValidation, ScoreVerdict, SetsPerMatch, validate_match_score, walkover_score,
};
