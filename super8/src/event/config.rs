//! Event configuration models.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::ranking::{DEFAULT_TIEBREAK_CRITERIA, TiebreakCriterion};
use crate::schedule::DEFAULT_ROTATING_ROUNDS;
use crate::scoring::{DEFAULT_SCORE_RULESET, ScoreRulesetId, SetsPerMatch};

/// Tournament format variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    /// Every pair plays every other pair once
    RoundRobin,
    /// Two groups of four, then cross-bracket semifinals
    GroupsFinals,
    /// Individual players with a new partner each round
    Rotating,
}

impl EventFormat {
    /// Whether entrants are individual players rather than fixed pairs
    pub fn is_individual(&self) -> bool {
        matches!(self, EventFormat::Rotating)
    }
}

impl std::fmt::Display for EventFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventFormat::RoundRobin => write!(f, "round_robin"),
            EventFormat::GroupsFinals => write!(f, "groups_finals"),
            EventFormat::Rotating => write!(f, "rotating"),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Zero courts
    #[error("event needs at least one court")]
    NoCourts,

    /// Win worth no points
    #[error("points per win must be at least 1")]
    ZeroPointsPerWin,

    /// Rotating event with no rounds
    #[error("rotating events need at least one round")]
    ZeroRotatingRounds,

    /// Tiebreak criterion repeated
    #[error("tiebreak criterion {0} is listed more than once")]
    DuplicateCriterion(TiebreakCriterion),

    /// Malformed JSON
    #[error("invalid event configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Event configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Event name
    pub name: String,

    /// Tournament format
    pub format: EventFormat,

    /// Courts available at the same time
    pub num_courts: usize,

    /// Regular sets per match (1 or 2)
    pub num_sets: SetsPerMatch,

    /// Points awarded per win (default: 1)
    pub points_per_win: u32,

    /// Tiebreak criteria applied after points, in order
    pub tiebreak_criteria: Vec<TiebreakCriterion>,

    /// Scoring preset for regular sets
    pub score_ruleset: ScoreRulesetId,

    /// Rounds played in the rotating format (default: 4)
    pub rotating_rounds: usize,

    /// Keep the given participant order when forming groups instead of drawing
    pub seed_groups: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Super 8".to_string(),
            format: EventFormat::RoundRobin,
            num_courts: 2,
            num_sets: SetsPerMatch::One,
            points_per_win: 1,
            tiebreak_criteria: DEFAULT_TIEBREAK_CRITERIA.to_vec(),
            score_ruleset: DEFAULT_SCORE_RULESET,
            rotating_rounds: DEFAULT_ROTATING_ROUNDS,
            seed_groups: false,
        }
    }
}

impl EventConfig {
    /// Parse a JSON document and validate it; missing fields take defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: EventConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_courts == 0 {
            return Err(ConfigError::NoCourts);
        }

        if self.points_per_win == 0 {
            return Err(ConfigError::ZeroPointsPerWin);
        }

        if self.format == EventFormat::Rotating && self.rotating_rounds == 0 {
            return Err(ConfigError::ZeroRotatingRounds);
        }

        let mut seen = HashSet::new();
        for criterion in &self.tiebreak_criteria {
            if !seen.insert(criterion) {
                return Err(ConfigError::DuplicateCriterion(*criterion));
            }
        }

        Ok(())
    }
}
