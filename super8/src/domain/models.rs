//! Event entities shared by the schedulers, score validation and ranking.

use serde::{Deserialize, Serialize};

/// Event ID type
pub type EventId = i64;

/// Participant ID type (the unit that plays a match)
pub type ParticipantId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Registered entrant: a single player or a fixed two-player pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub player1_id: PlayerId,
    /// Absent for individual entrants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_id: Option<PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
}

impl Participant {
    /// Create an individual entrant
    pub fn individual(id: ParticipantId, player_id: PlayerId) -> Self {
        Self {
            id,
            player1_id: player_id,
            player2_id: None,
            team_name: None,
        }
    }

    /// Create a fixed pair
    pub fn pair(id: ParticipantId, player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            id,
            player1_id,
            player2_id: Some(player2_id),
            team_name: None,
        }
    }

    /// Attach a display name
    pub fn with_team_name(mut self, name: impl Into<String>) -> Self {
        self.team_name = Some(name.into());
        self
    }

    pub fn is_pair(&self) -> bool {
        self.player2_id.is_some()
    }

    /// Players represented by this participant, first player first.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        std::iter::once(self.player1_id)
            .chain(self.player2_id)
            .collect()
    }
}

/// Side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Finished,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Finished => write!(f, "finished"),
        }
    }
}

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeType {
    Played,
    Walkover,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeType::Played => write!(f, "played"),
            OutcomeType::Walkover => write!(f, "walkover"),
        }
    }
}

/// Games won by each side in a single set.
///
/// Scores are signed so that negative input can be represented and rejected
/// by validation instead of being silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team1: i32,
    pub team2: i32,
}

impl SetScore {
    pub fn new(team1: i32, team2: i32) -> Self {
        Self { team1, team2 }
    }

    /// Side with more games, `None` on a level score
    pub fn winner(&self) -> Option<Side> {
        match self.team1.cmp(&self.team2) {
            std::cmp::Ordering::Greater => Some(Side::Team1),
            std::cmp::Ordering::Less => Some(Side::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn games(&self, side: Side) -> i32 {
        match side {
            Side::Team1 => self.team1,
            Side::Team2 => self.team2,
        }
    }

    /// Same score seen from the other side
    pub fn flipped(self) -> Self {
        Self {
            team1: self.team2,
            team2: self.team1,
        }
    }
}

/// Up to three set scores of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchScores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set1: Option<SetScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set2: Option<SetScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set3: Option<SetScore>,
}

impl MatchScores {
    /// Single-set score
    pub fn one_set(set1: SetScore) -> Self {
        Self {
            set1: Some(set1),
            ..Self::default()
        }
    }

    /// Two-set score without a decider
    pub fn two_sets(set1: SetScore, set2: SetScore) -> Self {
        Self {
            set1: Some(set1),
            set2: Some(set2),
            set3: None,
        }
    }

    /// Add the deciding third set
    pub fn with_decider(mut self, set3: SetScore) -> Self {
        self.set3 = Some(set3);
        self
    }

    /// Recorded sets in play order
    pub fn sets(&self) -> impl Iterator<Item = &SetScore> {
        [&self.set1, &self.set2, &self.set3]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    /// Total games for one side across all recorded sets, saturating at `i32::MAX`
    pub fn total_games(&self, side: Side) -> i32 {
        self.sets()
            .fold(0, |total: i32, set| total.saturating_add(set.games(side)))
    }

    pub fn is_empty(&self) -> bool {
        self.set1.is_none() && self.set2.is_none() && self.set3.is_none()
    }

    /// Same scores seen from the other side
    pub fn flipped(self) -> Self {
        Self {
            set1: self.set1.map(SetScore::flipped),
            set2: self.set2.map(SetScore::flipped),
            set3: self.set3.map(SetScore::flipped),
        }
    }
}

/// A scheduled match between two participants.
///
/// Created pending with no scores. Finishing a match is a one-way
/// transition that sets scores, winner and outcome together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub event_id: EventId,
    /// 1-based round, 0 until the match is placed in a round
    pub round: u32,
    /// 1-based court within the round
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<u32>,
    pub team1_id: ParticipantId,
    pub team2_id: ParticipantId,
    /// Group tag for group-stage matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "MatchScores::is_empty")]
    pub scores: MatchScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<ParticipantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_type: Option<OutcomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walkover_winner_team_id: Option<ParticipantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walkover_reason: Option<String>,
}

impl Match {
    /// Create a pending match that is not yet placed in a round
    pub fn pending(event_id: EventId, team1_id: ParticipantId, team2_id: ParticipantId) -> Self {
        debug_assert_ne!(team1_id, team2_id, "a participant cannot play itself");
        Self {
            event_id,
            round: 0,
            court: None,
            team1_id,
            team2_id,
            group: None,
            status: MatchStatus::Pending,
            scores: MatchScores::default(),
            winner_id: None,
            outcome_type: None,
            walkover_winner_team_id: None,
            walkover_reason: None,
        }
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    pub fn with_court(mut self, court: u32) -> Self {
        self.court = Some(court);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Whether the participant plays in this match
    pub fn involves(&self, participant_id: ParticipantId) -> bool {
        self.team1_id == participant_id || self.team2_id == participant_id
    }

    /// Participant id playing on `side`
    pub fn team_id(&self, side: Side) -> ParticipantId {
        match side {
            Side::Team1 => self.team1_id,
            Side::Team2 => self.team2_id,
        }
    }

    /// Side on which the participant plays, if any
    pub fn side_of(&self, participant_id: ParticipantId) -> Option<Side> {
        if self.team1_id == participant_id {
            Some(Side::Team1)
        } else if self.team2_id == participant_id {
            Some(Side::Team2)
        } else {
            None
        }
    }

    /// Total games won by `side` across all sets; missing sets count as 0
    pub fn games(&self, side: Side) -> i32 {
        self.scores.total_games(side)
    }

    /// Unordered identity of the matchup, smaller id first
    pub fn pair_key(&self) -> (ParticipantId, ParticipantId) {
        (
            self.team1_id.min(self.team2_id),
            self.team1_id.max(self.team2_id),
        )
    }
}
