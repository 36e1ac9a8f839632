//! What each subcommand does once its files are known.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use super8::domain::{EventId, Match, Participant};
use super8::event::{EventConfig, InMemoryPairRegistry, generate_event_matches, standings};
use super8::ranking::RankingEntry;
use super8::schedule::{explain_rotation, generate_rotating_rounds};

/// What `schedule` prints and `rank` reads back
#[derive(Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub matches: Vec<Match>,
    /// Pairs formed for a rotating event
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<Participant>,
}

/// Generate every match of the event
pub fn schedule(
    config: &EventConfig,
    participants: &[Participant],
    event_id: EventId,
) -> Result<Schedule> {
    let mut registry = InMemoryPairRegistry::new(participants);
    let matches = generate_event_matches(config, event_id, participants, &mut registry)?;
    Ok(Schedule {
        matches,
        pairs: registry.into_pairs(),
    })
}

/// Standings for a schedule read back from disk
pub fn rank(
    config: &EventConfig,
    participants: &[Participant],
    schedule: &Schedule,
) -> Vec<RankingEntry> {
    let mut everyone = participants.to_vec();
    everyone.extend(schedule.pairs.iter().cloned());
    standings(config, &everyone, &schedule.matches)
}

pub fn explain(
    config: &EventConfig,
    participants: &[Participant],
    event_id: EventId,
) -> Result<String> {
    let rounds = generate_rotating_rounds(
        participants,
        event_id,
        config.num_courts,
        config.rotating_rounds,
    )?;
    Ok(explain_rotation(&rounds))
}

/// Built-in defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<EventConfig> {
    let Some(path) = path else {
        return Ok(EventConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EventConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn label(participant: &Participant) -> String {
    if let Some(name) = &participant.team_name {
        return name.clone();
    }
    match participant.player2_id {
        Some(partner) => format!("Players {} & {}", participant.player1_id, partner),
        None => format!("Player {}", participant.player1_id),
    }
}

/// Standings as a fixed-width table, one line per entry after the header
pub fn format_standings(table: &[RankingEntry]) -> String {
    let mut out = format!(
        "{:>3}  {:<24} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}\n",
        "Pos", "Participant", "W", "L", "Pts", "GF", "GA", "GD"
    );
    for entry in table {
        out.push_str(&format!(
            "{:>3}  {:<24} {:>3} {:>3} {:>4} {:>4} {:>4} {:>+4}\n",
            entry.position,
            label(&entry.participant),
            entry.wins,
            entry.losses,
            entry.points,
            entry.games_for,
            entry.games_against,
            entry.game_difference
        ));
    }
    out
}
