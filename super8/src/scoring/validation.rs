//! Match-level score validation and walkover scores.

use serde::{Deserialize, Serialize};

use super::errors::{MatchScoreError, UnsupportedSetCount};
use super::ruleset::{SUPER_TIEBREAK, ScoreRuleset};
use crate::domain::{MatchScores, SetScore, Side};

/// Number of regular sets an event plays per match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SetsPerMatch {
    #[default]
    One,
    /// Two sets, with a super tiebreak decider on a 1-1 split
    Two,
}

impl TryFrom<u8> for SetsPerMatch {
    type Error = UnsupportedSetCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SetsPerMatch::One),
            2 => Ok(SetsPerMatch::Two),
            other => Err(UnsupportedSetCount(other)),
        }
    }
}

impl From<SetsPerMatch> for u8 {
    fn from(value: SetsPerMatch) -> Self {
        match value {
            SetsPerMatch::One => 1,
            SetsPerMatch::Two => 2,
        }
    }
}

/// Outcome of validating a full match score
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreVerdict {
    /// Score is legal and decides the match
    Accepted { winner: Side },
    /// Sets are split 1-1 and no decider was entered yet.
    /// This asks for more input; the sets entered so far are valid.
    DeciderRequired,
    Rejected(MatchScoreError),
}

/// Result of [`validate_match_score`], with the counters accumulated
/// up to the point validation stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScoreValidation {
    pub verdict: ScoreVerdict,
    pub sets_won_team1: u8,
    pub sets_won_team2: u8,
    pub games_for_team1: i32,
    pub games_against_team1: i32,
}

impl MatchScoreValidation {
    fn new() -> Self {
        Self {
            verdict: ScoreVerdict::Rejected(MatchScoreError::UndeterminedWinner),
            sets_won_team1: 0,
            sets_won_team2: 0,
            games_for_team1: 0,
            games_against_team1: 0,
        }
    }

    fn reject(mut self, error: MatchScoreError) -> Self {
        self.verdict = ScoreVerdict::Rejected(error);
        self
    }

    fn count(&mut self, set: SetScore) -> Result<(), MatchScoreError> {
        let (Some(games_for), Some(games_against)) = (
            self.games_for_team1.checked_add(set.team1),
            self.games_against_team1.checked_add(set.team2),
        ) else {
            return Err(MatchScoreError::GamesOverflow);
        };
        self.games_for_team1 = games_for;
        self.games_against_team1 = games_against;

        match set.winner() {
            Some(Side::Team1) => self.sets_won_team1 += 1,
            Some(Side::Team2) => self.sets_won_team2 += 1,
            None => {}
        }
        Ok(())
    }

    /// Whether the score is accepted; check this before trusting the other fields
    pub fn is_ok(&self) -> bool {
        matches!(self.verdict, ScoreVerdict::Accepted { .. })
    }

    pub fn requires_decider(&self) -> bool {
        self.verdict == ScoreVerdict::DeciderRequired
    }

    pub fn winner(&self) -> Option<Side> {
        match self.verdict {
            ScoreVerdict::Accepted { winner } => Some(winner),
            _ => None,
        }
    }

    /// Human readable reason when the score is not accepted
    pub fn reason(&self) -> Option<String> {
        match &self.verdict {
            ScoreVerdict::Accepted { .. } => None,
            ScoreVerdict::DeciderRequired => {
                Some("sets are tied 1-1, enter the decider (super tiebreak) as set 3".to_string())
            }
            ScoreVerdict::Rejected(error) => Some(error.to_string()),
        }
    }

    /// Whether a third set was counted
    pub fn decider_played(&self) -> bool {
        self.sets_won_team1 + self.sets_won_team2 == 3
    }
}

/// Validate a full match score.
///
/// Set 1 is always required. With [`SetsPerMatch::Two`] set 2 is required
/// too, and a 1-1 split requires a decider that is always judged under the
/// super tiebreak ruleset, whatever the event's own ruleset is. A missing
/// decider yields [`ScoreVerdict::DeciderRequired`] rather than a rejection.
/// Any set beyond what the format needs is ignored.
pub fn validate_match_score(
    ruleset: &ScoreRuleset,
    sets: SetsPerMatch,
    scores: &MatchScores,
) -> MatchScoreValidation {
    let mut result = MatchScoreValidation::new();

    let Some(set1) = scores.set1 else {
        return result.reject(MatchScoreError::MissingSet(1));
    };
    if let Err(source) = ruleset.validate_set(set1) {
        return result.reject(MatchScoreError::InvalidSet { set: 1, source });
    }
    if let Err(error) = result.count(set1) {
        return result.reject(error);
    }

    if sets == SetsPerMatch::Two {
        let Some(set2) = scores.set2 else {
            return result.reject(MatchScoreError::MissingSet(2));
        };
        if let Err(source) = ruleset.validate_set(set2) {
            return result.reject(MatchScoreError::InvalidSet { set: 2, source });
        }
        if let Err(error) = result.count(set2) {
            return result.reject(error);
        }

        if result.sets_won_team1 == 1 && result.sets_won_team2 == 1 {
            let Some(decider) = scores.set3 else {
                result.verdict = ScoreVerdict::DeciderRequired;
                return result;
            };
            if let Err(source) = SUPER_TIEBREAK.validate_set(decider) {
                return result.reject(MatchScoreError::InvalidDecider(source));
            }
            if let Err(error) = result.count(decider) {
                return result.reject(error);
            }
        }
    }

    result.verdict = match result.sets_won_team1.cmp(&result.sets_won_team2) {
        std::cmp::Ordering::Greater => ScoreVerdict::Accepted {
            winner: Side::Team1,
        },
        std::cmp::Ordering::Less => ScoreVerdict::Accepted {
            winner: Side::Team2,
        },
        std::cmp::Ordering::Equal => ScoreVerdict::Rejected(MatchScoreError::UndeterminedWinner),
    };
    result
}

/// Canonical walkover score: `max_games`-0 in favour of team 1 for every
/// regular set the event plays.
pub fn walkover_score(ruleset: &ScoreRuleset, sets: SetsPerMatch) -> MatchScores {
    let set = SetScore::new(ruleset.max_games, 0);
    match sets {
        SetsPerMatch::One => MatchScores::one_set(set),
        SetsPerMatch::Two => MatchScores::two_sets(set, set),
    }
}
