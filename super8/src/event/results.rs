//! Recording match results.
//!
//! A match moves from pending to finished exactly once. Scores, winner and
//! outcome are written together, and only after the score is accepted.

use log::info;
use thiserror::Error;

use crate::domain::{Match, MatchScores, MatchStatus, OutcomeType, ParticipantId, Side};
use crate::scoring::{
    MatchScoreError, ScoreRuleset, ScoreVerdict, SetsPerMatch, validate_match_score, walkover_score,
};

/// Reasons a result cannot be recorded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    /// Match already has a result
    #[error("match {team1} vs {team2} is already finished")]
    AlreadyFinished {
        team1: ParticipantId,
        team2: ParticipantId,
    },

    /// Split sets without a decider
    #[error("sets are tied 1-1, a decider is required")]
    DeciderRequired,

    /// Score failed validation
    #[error("score rejected: {0}")]
    InvalidScore(#[from] MatchScoreError),

    /// Walkover winner is not in the match
    #[error("participant {0} does not play in this match")]
    NotInMatch(ParticipantId),
}

/// Result type for result recording
pub type ResultResult<T> = Result<T, ResultError>;

impl Match {
    fn ensure_pending(&self) -> ResultResult<()> {
        if self.is_finished() {
            return Err(ResultError::AlreadyFinished {
                team1: self.team1_id,
                team2: self.team2_id,
            });
        }
        Ok(())
    }

    /// Record a played result after validating it.
    ///
    /// Only the sets the format counts are stored. On any error the match is
    /// left untouched.
    pub fn record_played(
        &mut self,
        ruleset: &ScoreRuleset,
        sets: SetsPerMatch,
        scores: MatchScores,
    ) -> ResultResult<Side> {
        self.ensure_pending()?;

        let validation = validate_match_score(ruleset, sets, &scores);
        let winner = match validation.verdict {
            ScoreVerdict::Accepted { winner } => winner,
            ScoreVerdict::DeciderRequired => return Err(ResultError::DeciderRequired),
            ScoreVerdict::Rejected(error) => return Err(error.into()),
        };

        self.scores = MatchScores {
            set1: scores.set1,
            set2: if sets == SetsPerMatch::Two { scores.set2 } else { None },
            set3: if validation.decider_played() { scores.set3 } else { None },
        };
        self.winner_id = Some(self.team_id(winner));
        self.outcome_type = Some(OutcomeType::Played);
        self.status = MatchStatus::Finished;

        info!(
            "Match {} vs {} (round {}) won by {}",
            self.team1_id,
            self.team2_id,
            self.round,
            self.team_id(winner)
        );
        Ok(winner)
    }

    /// Award the match without play.
    ///
    /// The canonical walkover score is stored from the winner's side: the
    /// winner takes every regular set at the ruleset's maximum, the loser 0.
    pub fn record_walkover(
        &mut self,
        ruleset: &ScoreRuleset,
        sets: SetsPerMatch,
        winner_team_id: ParticipantId,
        reason: Option<String>,
    ) -> ResultResult<Side> {
        self.ensure_pending()?;
        let winner = self
            .side_of(winner_team_id)
            .ok_or(ResultError::NotInMatch(winner_team_id))?;

        let scores = walkover_score(ruleset, sets);
        self.scores = match winner {
            Side::Team1 => scores,
            Side::Team2 => scores.flipped(),
        };
        self.winner_id = Some(winner_team_id);
        self.outcome_type = Some(OutcomeType::Walkover);
        self.walkover_winner_team_id = Some(winner_team_id);
        self.walkover_reason = reason;
        self.status = MatchStatus::Finished;

        info!(
            "Match {} vs {} (round {}) awarded to {} by walkover",
            self.team1_id, self.team2_id, self.round, winner_team_id
        );
        Ok(winner)
    }
}
