//! Tiebreak criteria applied after points.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Secondary ranking metric, applied in the order an event lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakCriterion {
    Wins,
    GameDifference,
    GamesFor,
    /// Only resolves ties between exactly two entrants
    HeadToHead,
}

/// Fixed criteria order used by every event format
pub const DEFAULT_TIEBREAK_CRITERIA: [TiebreakCriterion; 4] = [
    TiebreakCriterion::Wins,
    TiebreakCriterion::GameDifference,
    TiebreakCriterion::GamesFor,
    TiebreakCriterion::HeadToHead,
];

impl TiebreakCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TiebreakCriterion::Wins => "wins",
            TiebreakCriterion::GameDifference => "game_difference",
            TiebreakCriterion::GamesFor => "games_for",
            TiebreakCriterion::HeadToHead => "head_to_head",
        }
    }
}

impl std::fmt::Display for TiebreakCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TiebreakCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(TiebreakCriterion::Wins),
            "game_difference" => Ok(TiebreakCriterion::GameDifference),
            "games_for" => Ok(TiebreakCriterion::GamesFor),
            "head_to_head" => Ok(TiebreakCriterion::HeadToHead),
            other => Err(format!("unknown tiebreak criterion: {other}")),
        }
    }
}
