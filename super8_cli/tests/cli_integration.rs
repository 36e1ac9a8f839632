//! Integration tests for the super8 command line driver.
//!
//! The `schedule` output is written as JSON, edited with results and read
//! back by `rank`, so these tests go through the same serde round trip.

use std::path::Path;

use super8::domain::{MatchScores, Participant, SetScore};
use super8::event::{EventConfig, EventFormat};
use super8_cli::commands::{self, Schedule, format_standings, load_config, read_json};

fn pairs() -> Vec<Participant> {
    (1..=8).map(|i| Participant::pair(i, i * 10, i * 10 + 1)).collect()
}

fn players() -> Vec<Participant> {
    (1..=8).map(|i| Participant::individual(i, i * 100)).collect()
}

/// Serialize and parse back, as between `schedule` and `rank`
fn reload(schedule: &Schedule) -> Schedule {
    let json = serde_json::to_string_pretty(schedule).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_round_robin_schedule_omits_pairs() {
    let config = EventConfig::default();
    let schedule = commands::schedule(&config, &pairs(), 4).unwrap();

    let json = serde_json::to_string(&schedule).unwrap();
    assert!(!json.contains("\"pairs\""));

    let reloaded = reload(&schedule);
    assert_eq!(reloaded.matches, schedule.matches);
    assert!(reloaded.pairs.is_empty());
    assert_eq!(reloaded.matches.len(), 28);
}

#[test]
fn test_rotating_schedule_keeps_pairs_for_rank() {
    let config = EventConfig {
        format: EventFormat::Rotating,
        ..EventConfig::default()
    };
    let roster = players();
    let schedule = commands::schedule(&config, &roster, 1).unwrap();
    assert_eq!(schedule.pairs.len(), 16);

    let mut reloaded = reload(&schedule);
    assert_eq!(reloaded.pairs, schedule.pairs);

    let ruleset = config.score_ruleset.ruleset();
    for m in reloaded.matches.iter_mut() {
        m.record_played(
            ruleset,
            config.num_sets,
            MatchScores::one_set(SetScore::new(6, 2)),
        )
        .unwrap();
    }
    let reloaded = reload(&reloaded);

    let table = commands::rank(&config, &roster, &reloaded);
    assert_eq!(table.len(), 8);
    assert!(table.iter().all(|e| e.wins + e.losses == 4));
    assert_eq!(table.iter().map(|e| e.wins).sum::<u32>(), 16);
}

#[test]
fn test_rank_without_pairs_ignores_rotating_matches() {
    let config = EventConfig {
        format: EventFormat::Rotating,
        ..EventConfig::default()
    };
    let roster = players();
    let mut schedule = commands::schedule(&config, &roster, 1).unwrap();
    let ruleset = config.score_ruleset.ruleset();
    for m in schedule.matches.iter_mut() {
        m.record_played(
            ruleset,
            config.num_sets,
            MatchScores::one_set(SetScore::new(6, 2)),
        )
        .unwrap();
    }
    schedule.pairs.clear();

    let table = commands::rank(&config, &roster, &schedule);
    assert!(table.iter().all(|e| e.wins == 0 && e.losses == 0));
}

#[test]
fn test_standings_table_layout() {
    let config = EventConfig::default();
    let roster = pairs();
    let schedule = commands::schedule(&config, &roster, 1).unwrap();
    let text = format_standings(&commands::rank(&config, &roster, &schedule));

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines[0].contains("Participant"));
    assert!(lines[1].contains("Players 10 & 11"));
    assert!(lines[1].trim_end().ends_with("+0"));
}

#[test]
fn test_explain_needs_individual_players() {
    let config = EventConfig::default();
    let text = commands::explain(&config, &players(), 1).unwrap();
    assert!(text.starts_with("How the rotation was generated:"));
    assert!(text.contains("Rounds: 4"));

    let error = commands::explain(&config, &pairs(), 1).unwrap_err();
    assert!(error.to_string().contains("individual player"));
}

#[test]
fn test_missing_files_are_reported() {
    assert_eq!(load_config(None).unwrap(), EventConfig::default());

    let missing = Path::new("does-not-exist/roster.json");
    let error = read_json::<Vec<Participant>>(missing).unwrap_err();
    assert!(error.to_string().starts_with("failed to read"));

    let error = load_config(Some(missing)).unwrap_err();
    assert!(error.to_string().starts_with("failed to read config"));
}
