//! Error types for score validation

use thiserror::Error;

use super::ruleset::ScoreRulesetId;

/// Reasons a single set score is not legal under a ruleset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetScoreError {
    /// Score below zero
    #[error("scores cannot be negative")]
    Negative,

    /// Winner short of the games needed
    #[error("{ruleset}: a set is won by reaching {target} games")]
    TargetNotReached { ruleset: ScoreRulesetId, target: i32 },

    /// Winning margin too narrow
    #[error("{ruleset}: a set needs a margin of at least {margin}")]
    MarginTooSmall { ruleset: ScoreRulesetId, margin: i32 },

    /// More games than the ruleset allows
    #[error("{ruleset}: at most {max} games can be won in a set")]
    AboveMaximum { ruleset: ScoreRulesetId, max: i32 },

    /// 6-5 under normal_6
    #[error("{ruleset}: 6-5 does not finish the set, play on to 7-5")]
    UnfinishedSet { ruleset: ScoreRulesetId },

    /// 7-6 under normal_6
    #[error("{ruleset}: 7-6 is not allowed without a tiebreak")]
    TiebreakNotAllowed { ruleset: ScoreRulesetId },

    /// Any other illegal combination
    #[error("{ruleset}: invalid set score {team1}-{team2}")]
    InvalidScore {
        ruleset: ScoreRulesetId,
        team1: i32,
        team2: i32,
    },
}

/// Reasons a whole match score is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchScoreError {
    /// Required set not entered
    #[error("set {0} is required")]
    MissingSet(u8),

    /// Regular set failed validation
    #[error("set {set}: {source}")]
    InvalidSet { set: u8, source: SetScoreError },

    /// Decider failed super tiebreak validation
    #[error("decider (set 3): {0}")]
    InvalidDecider(#[source] SetScoreError),

    /// Sets won are level
    #[error("could not determine the winner")]
    UndeterminedWinner,

    /// Game totals do not fit in an i32
    #[error("game totals are too large to count")]
    GamesOverflow,
}

/// Unsupported number of sets per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("matches are played over 1 or 2 sets, got {0}")]
pub struct UnsupportedSetCount(pub u8);

/// Result type for set validation
pub type SetScoreResult<T> = Result<T, SetScoreError>;
