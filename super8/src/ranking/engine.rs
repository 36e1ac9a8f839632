//! Standings computed from finished matches.

use log::warn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::criteria::TiebreakCriterion;
use crate::domain::{Match, Participant, ParticipantId, PlayerId, Side};

/// One line of a ranking table. Derived on every call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position after all tiebreaks
    pub position: usize,
    pub participant: Participant,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub games_for: i32,
    pub games_against: i32,
    pub game_difference: i32,
}

/// Running totals for one ranked entity.
///
/// `key` is the identity used for head-to-head lookups: the participant id
/// in team rankings, the player id in individual rankings.
#[derive(Debug)]
struct Tally {
    participant: Participant,
    key: i64,
    wins: u32,
    losses: u32,
    points: u32,
    games_for: i32,
    games_against: i32,
    head_to_head: HashMap<i64, u32>,
}

impl Tally {
    fn new(participant: Participant, key: i64) -> Self {
        Self {
            participant,
            key,
            wins: 0,
            losses: 0,
            points: 0,
            games_for: 0,
            games_against: 0,
            head_to_head: HashMap::new(),
        }
    }

    fn game_difference(&self) -> i32 {
        self.games_for.saturating_sub(self.games_against)
    }

    /// Totals saturate instead of wrapping on absurd super tiebreak scores
    fn add_games(&mut self, games_for: i32, games_against: i32) {
        self.games_for = self.games_for.saturating_add(games_for);
        self.games_against = self.games_against.saturating_add(games_against);
    }

    fn add_win(&mut self, points_per_win: u32, beaten: &[i64]) {
        self.wins += 1;
        self.points += points_per_win;
        for &opponent in beaten {
            *self.head_to_head.entry(opponent).or_default() += 1;
        }
    }

    fn wins_over(&self, other: &Tally) -> u32 {
        self.head_to_head.get(&other.key).copied().unwrap_or(0)
    }

    /// Equal on every numeric metric, whatever criteria the event uses
    fn numerically_tied(&self, other: &Tally) -> bool {
        self.points == other.points
            && self.wins == other.wins
            && self.game_difference() == other.game_difference()
            && self.games_for == other.games_for
    }

    fn into_entry(self, position: usize) -> RankingEntry {
        let game_difference = self.game_difference();
        RankingEntry {
            position,
            participant: self.participant,
            wins: self.wins,
            losses: self.losses,
            points: self.points,
            games_for: self.games_for,
            games_against: self.games_against,
            game_difference,
        }
    }
}

/// Descending comparison on one numeric criterion; head-to-head is not numeric
fn compare_by(criterion: TiebreakCriterion, a: &Tally, b: &Tally) -> Ordering {
    match criterion {
        TiebreakCriterion::Wins => b.wins.cmp(&a.wins),
        TiebreakCriterion::GameDifference => b.game_difference().cmp(&a.game_difference()),
        TiebreakCriterion::GamesFor => b.games_for.cmp(&a.games_for),
        TiebreakCriterion::HeadToHead => Ordering::Equal,
    }
}

/// Sort by points, then by the numeric criteria in the given order, then
/// resolve two-way ties by head-to-head when requested.
///
/// The sort is stable, so entities tied on everything keep input order.
fn order_tallies(tallies: &mut [Tally], criteria: &[TiebreakCriterion]) {
    tallies.sort_by(|a, b| {
        criteria.iter().fold(b.points.cmp(&a.points), |ordering, &criterion| {
            ordering.then_with(|| compare_by(criterion, a, b))
        })
    });

    if criteria.contains(&TiebreakCriterion::HeadToHead) {
        apply_head_to_head(tallies);
    }
}

/// Swap blocks of exactly two tied entities when the trailing one won
/// more of their meetings. Blocks of three or more are left in place.
fn apply_head_to_head(tallies: &mut [Tally]) {
    let mut start = 0;
    while start < tallies.len() {
        let mut end = start;
        while end + 1 < tallies.len() && tallies[end].numerically_tied(&tallies[end + 1]) {
            end += 1;
        }

        if end - start + 1 == 2 {
            let leader = &tallies[start];
            let trailer = &tallies[start + 1];
            if trailer.wins_over(leader) > leader.wins_over(trailer) {
                tallies.swap(start, start + 1);
            }
        }

        start = end + 1;
    }
}

fn into_ranking(tallies: Vec<Tally>) -> Vec<RankingEntry> {
    tallies
        .into_iter()
        .enumerate()
        .map(|(idx, tally)| tally.into_entry(idx + 1))
        .collect()
}

/// Rank participants by their finished matches.
///
/// Winners get one win and `points_per_win` points, losers one loss; games
/// from every recorded set count for and against both sides. Points always
/// come first, the remaining `criteria` break ties in order, and
/// `head_to_head` (wherever it is listed) only reorders two-way ties left
/// after all numeric criteria.
///
/// Matches that are not finished are ignored, as are matches naming a
/// participant that is not in `participants`.
pub fn calculate_ranking(
    participants: &[Participant],
    matches: &[Match],
    criteria: &[TiebreakCriterion],
    points_per_win: u32,
) -> Vec<RankingEntry> {
    let mut tallies: Vec<Tally> = participants
        .iter()
        .map(|p| Tally::new(p.clone(), p.id))
        .collect();
    let index: HashMap<ParticipantId, usize> = participants
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id, idx))
        .collect();

    for m in matches.iter().filter(|m| m.is_finished()) {
        let (Some(&team1), Some(&team2)) = (index.get(&m.team1_id), index.get(&m.team2_id)) else {
            warn!(
                "Skipping match {} vs {}: unknown participant",
                m.team1_id, m.team2_id
            );
            continue;
        };

        let team1_games = m.games(Side::Team1);
        let team2_games = m.games(Side::Team2);
        tallies[team1].add_games(team1_games, team2_games);
        tallies[team2].add_games(team2_games, team1_games);

        let (winner, loser) = match m.winner_id {
            Some(id) if id == m.team1_id => (team1, team2),
            Some(id) if id == m.team2_id => (team2, team1),
            _ => continue,
        };
        let loser_key = tallies[loser].key;
        tallies[winner].add_win(points_per_win, &[loser_key]);
        tallies[loser].losses += 1;
    }

    order_tallies(&mut tallies, criteria);
    into_ranking(tallies)
}

/// Rank individual players in an event where partners change every round.
///
/// Only individual participants (no second player) are ranked, keyed by
/// their `player1_id`. Match teams are expanded into their players, and each
/// player on a side receives the whole result of that match: a full win or
/// loss, full points and the match's total games for and against.
/// Head-to-head credit goes from every winning player to every losing one.
pub fn calculate_individual_ranking(
    participants: &[Participant],
    matches: &[Match],
    criteria: &[TiebreakCriterion],
    points_per_win: u32,
) -> Vec<RankingEntry> {
    let mut tallies: Vec<Tally> = Vec::new();
    let mut by_player: HashMap<PlayerId, usize> = HashMap::new();
    for p in participants.iter().filter(|p| !p.is_pair()) {
        if by_player.contains_key(&p.player1_id) {
            warn!(
                "Player {} is entered more than once, keeping the first entry",
                p.player1_id
            );
            continue;
        }
        by_player.insert(p.player1_id, tallies.len());
        tallies.push(Tally::new(p.clone(), p.player1_id));
    }

    let teams: HashMap<ParticipantId, &Participant> =
        participants.iter().map(|p| (p.id, p)).collect();

    for m in matches.iter().filter(|m| m.is_finished()) {
        let (Some(team1), Some(team2)) = (teams.get(&m.team1_id), teams.get(&m.team2_id)) else {
            warn!(
                "Skipping match {} vs {}: unknown participant",
                m.team1_id, m.team2_id
            );
            continue;
        };
        let team1_players = team1.player_ids();
        let team2_players = team2.player_ids();

        let team1_games = m.games(Side::Team1);
        let team2_games = m.games(Side::Team2);
        for player in &team1_players {
            if let Some(&idx) = by_player.get(player) {
                tallies[idx].add_games(team1_games, team2_games);
            }
        }
        for player in &team2_players {
            if let Some(&idx) = by_player.get(player) {
                tallies[idx].add_games(team2_games, team1_games);
            }
        }

        let (winners, losers) = match m.winner_id {
            Some(id) if id == m.team1_id => (&team1_players, &team2_players),
            Some(id) if id == m.team2_id => (&team2_players, &team1_players),
            _ => continue,
        };
        for player in winners {
            if let Some(&idx) = by_player.get(player) {
                tallies[idx].add_win(points_per_win, losers);
            }
        }
        for player in losers {
            if let Some(&idx) = by_player.get(player) {
                tallies[idx].losses += 1;
            }
        }
    }

    order_tallies(&mut tallies, criteria);
    into_ranking(tallies)
}
