//! Score rulesets and set-level validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::{SetScoreError, SetScoreResult};
use crate::domain::SetScore;

/// Identifier of a fixed scoring preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreRulesetId {
    #[serde(rename = "fast_4")]
    Fast4,
    #[serde(rename = "normal_6")]
    Normal6,
    #[serde(rename = "super_tiebreak")]
    SuperTiebreak,
}

/// Ruleset used when an event does not pick one
pub const DEFAULT_SCORE_RULESET: ScoreRulesetId = ScoreRulesetId::Normal6;

impl ScoreRulesetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreRulesetId::Fast4 => "fast_4",
            ScoreRulesetId::Normal6 => "normal_6",
            ScoreRulesetId::SuperTiebreak => "super_tiebreak",
        }
    }

    /// The preset this id names
    pub fn ruleset(self) -> &'static ScoreRuleset {
        match self {
            ScoreRulesetId::Fast4 => &FAST_4,
            ScoreRulesetId::Normal6 => &NORMAL_6,
            ScoreRulesetId::SuperTiebreak => &SUPER_TIEBREAK,
        }
    }
}

impl Default for ScoreRulesetId {
    fn default() -> Self {
        DEFAULT_SCORE_RULESET
    }
}

impl std::fmt::Display for ScoreRulesetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreRulesetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast_4" => Ok(ScoreRulesetId::Fast4),
            "normal_6" => Ok(ScoreRulesetId::Normal6),
            "super_tiebreak" => Ok(ScoreRulesetId::SuperTiebreak),
            other => Err(format!("unknown score ruleset: {other}")),
        }
    }
}

/// Immutable scoring regime for a single set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRuleset {
    pub id: ScoreRulesetId,
    pub name: &'static str,
    pub description: &'static str,
    /// Games needed to win a set
    pub max_games: i32,
    /// Minimum winning margin
    pub min_difference: i32,
    /// Carried for completeness; no ruleset scores tiebreak games yet
    pub allow_tiebreak: bool,
}

/// Short set to 4 games
pub const FAST_4: ScoreRuleset = ScoreRuleset {
    id: ScoreRulesetId::Fast4,
    name: "Fast set to 4",
    description: "Set is won on reaching 4 games, minimum margin of 1",
    max_games: 4,
    min_difference: 1,
    allow_tiebreak: false,
};

/// Regular set to 6 games (7-5 allowed, no tiebreak)
pub const NORMAL_6: ScoreRuleset = ScoreRuleset {
    id: ScoreRulesetId::Normal6,
    name: "Normal set to 6",
    description: "Set is won with 6 games, minimum margin of 2",
    max_games: 6,
    min_difference: 2,
    allow_tiebreak: false,
};

/// Super tiebreak to 10 points
pub const SUPER_TIEBREAK: ScoreRuleset = ScoreRuleset {
    id: ScoreRulesetId::SuperTiebreak,
    name: "Super tiebreak",
    description: "Won on reaching 10 points, minimum margin of 2",
    max_games: 10,
    min_difference: 2,
    allow_tiebreak: false,
};

/// All presets, in display order
pub const SCORE_RULESETS: [&ScoreRuleset; 3] = [&FAST_4, &NORMAL_6, &SUPER_TIEBREAK];

impl ScoreRuleset {
    /// Validate one set score under this ruleset
    pub fn validate_set(&self, score: SetScore) -> SetScoreResult<()> {
        validate_set_score(self, score.team1, score.team2)
    }
}

/// Check that `team1`-`team2` is a finished, legal set under `ruleset`.
///
/// Scores are symmetric: 4-2 and 2-4 are both accepted under `fast_4`.
pub fn validate_set_score(ruleset: &ScoreRuleset, team1: i32, team2: i32) -> SetScoreResult<()> {
    if team1 < 0 || team2 < 0 {
        return Err(SetScoreError::Negative);
    }

    let id = ruleset.id;
    let winner = team1.max(team2);
    let loser = team1.min(team2);
    let margin = winner - loser;

    if winner < ruleset.max_games {
        return Err(SetScoreError::TargetNotReached {
            ruleset: id,
            target: ruleset.max_games,
        });
    }

    let too_close = SetScoreError::MarginTooSmall {
        ruleset: id,
        margin: ruleset.min_difference,
    };

    match id {
        ScoreRulesetId::Fast4 => {
            if winner > 4 {
                return Err(SetScoreError::AboveMaximum { ruleset: id, max: 4 });
            }
            if margin < ruleset.min_difference {
                return Err(too_close);
            }
            Ok(())
        }
        ScoreRulesetId::Normal6 => match (winner, loser) {
            (6, 0..=4) | (7, 5) => Ok(()),
            (6, 5) => Err(SetScoreError::UnfinishedSet { ruleset: id }),
            (7, 6) => Err(SetScoreError::TiebreakNotAllowed { ruleset: id }),
            (w, _) if w > 7 => Err(SetScoreError::AboveMaximum { ruleset: id, max: 7 }),
            _ if margin < ruleset.min_difference => Err(too_close),
            _ => Err(SetScoreError::InvalidScore {
                ruleset: id,
                team1,
                team2,
            }),
        },
        ScoreRulesetId::SuperTiebreak => {
            if margin < ruleset.min_difference {
                return Err(too_close);
            }
            Ok(())
        }
    }
}
