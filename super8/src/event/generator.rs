//! Turning an event roster into persisted-ready matches.

use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::HashMap;

use super::config::{EventConfig, EventFormat};
use super::{EventError, EventResult};
use crate::domain::{EventId, Match, Participant, ParticipantId, PlayerId};
use crate::ranking::calculate_ranking;
use crate::schedule::{
    GROUP_A, GROUP_B, GroupDrawer, PendingPair, ScheduleError, distinct_partnerships,
    generate_finals, generate_group_matches, generate_rotating_rounds, organize_into_rounds,
    require_count, require_individuals, require_pairs, schedule_round_robin,
};

/// Entrants in every Super 8 event
pub const EVENT_SIZE: usize = 8;

/// Creates the team participants that rotating events form on the fly.
///
/// Implementations usually persist the pair and return it with its stored id.
pub trait PairRegistry {
    /// Register two players as a team for `event_id`
    fn register_pair(
        &mut self,
        event_id: EventId,
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> Participant;
}

/// Pair registry that hands out ids above every known participant id
#[derive(Debug, Clone)]
pub struct InMemoryPairRegistry {
    next_id: ParticipantId,
    pairs: Vec<Participant>,
}

impl InMemoryPairRegistry {
    pub fn new(participants: &[Participant]) -> Self {
        let max_id = participants.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            next_id: max_id + 1,
            pairs: Vec::new(),
        }
    }

    /// Pairs registered so far, in creation order
    pub fn pairs(&self) -> &[Participant] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<Participant> {
        self.pairs
    }
}

impl PairRegistry for InMemoryPairRegistry {
    fn register_pair(
        &mut self,
        _event_id: EventId,
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> Participant {
        let pair = Participant::pair(self.next_id, player1_id, player2_id);
        self.next_id += 1;
        self.pairs.push(pair.clone());
        pair
    }
}

/// Builds the full match list for an event in its configured format.
pub struct EventGenerator<'a, R = ThreadRng> {
    config: &'a EventConfig,
    drawer: GroupDrawer<R>,
}

impl<'a> EventGenerator<'a, ThreadRng> {
    pub fn new(config: &'a EventConfig) -> Self {
        Self {
            config,
            drawer: GroupDrawer::new(),
        }
    }
}

impl<'a, R: Rng> EventGenerator<'a, R> {
    /// Generator that draws groups with a caller-supplied generator
    pub fn with_rng(config: &'a EventConfig, rng: R) -> Self {
        Self {
            config,
            drawer: GroupDrawer::with_rng(rng),
        }
    }

    /// Generate every match of the event, placed in rounds and on courts.
    ///
    /// The roster must hold exactly [`EVENT_SIZE`] entrants: fixed pairs for
    /// round robin and groups, individual players for the rotating format.
    /// Rotating partnerships are registered once each through `registry`
    /// and the matches reference the returned ids. Group finals are not
    /// generated here, see [`schedule_semifinals`].
    pub fn generate(
        &mut self,
        event_id: EventId,
        participants: &[Participant],
        registry: &mut impl PairRegistry,
    ) -> EventResult<Vec<Match>> {
        let config = self.config;
        config.validate()?;
        require_count(participants, EVENT_SIZE)?;
        if config.format.is_individual() {
            require_individuals(participants)?;
        } else {
            require_pairs(participants)?;
        }

        let matches: Vec<Match> = match config.format {
            EventFormat::RoundRobin => {
                schedule_round_robin(participants, event_id, config.num_courts)?
                    .into_iter()
                    .flatten()
                    .collect()
            }
            EventFormat::GroupsFinals => {
                let [group_a, group_b] = self.drawer.draw(participants, config.seed_groups)?;
                let mut group_matches = generate_group_matches(&group_a, event_id)?;
                group_matches.extend(generate_group_matches(&group_b, event_id)?);

                organize_into_rounds(group_matches, config.num_courts)?
                    .into_iter()
                    .flatten()
                    .collect()
            }
            EventFormat::Rotating => {
                materialize_rotation(config, event_id, participants, registry)?
            }
        };

        info!(
            "Generated {} matches for event {} ({}, {} courts)",
            matches.len(),
            event_id,
            config.format,
            config.num_courts
        );
        Ok(matches)
    }
}

fn materialize_rotation(
    config: &EventConfig,
    event_id: EventId,
    participants: &[Participant],
    registry: &mut impl PairRegistry,
) -> EventResult<Vec<Match>> {
    let rounds = generate_rotating_rounds(
        participants,
        event_id,
        config.num_courts,
        config.rotating_rounds,
    )?;

    let players: HashMap<ParticipantId, PlayerId> =
        participants.iter().map(|p| (p.id, p.player1_id)).collect();
    let player_of = |id: ParticipantId| {
        players
            .get(&id)
            .copied()
            .ok_or(ScheduleError::UnknownParticipant(id))
    };

    let mut team_ids: HashMap<PendingPair, ParticipantId> = HashMap::new();
    for pair in distinct_partnerships(&rounds) {
        let team = registry.register_pair(event_id, player_of(pair.first)?, player_of(pair.second)?);
        debug!("Registered pair {} as participant {}", pair, team.id);
        team_ids.insert(pair, team.id);
    }

    let team_of = |pair: &PendingPair| {
        team_ids
            .get(pair)
            .copied()
            .ok_or(ScheduleError::UnknownParticipant(pair.first))
    };

    let mut matches = Vec::new();
    for pending in rounds.iter().flat_map(|r| &r.matches) {
        matches.push(pending.materialize(team_of(&pending.team1)?, team_of(&pending.team2)?));
    }
    Ok(matches)
}

/// Generate every match of the event using the thread-local generator
pub fn generate_event_matches(
    config: &EventConfig,
    event_id: EventId,
    participants: &[Participant],
    registry: &mut impl PairRegistry,
) -> EventResult<Vec<Match>> {
    EventGenerator::new(config).generate(event_id, participants, registry)
}

/// Schedule the semifinals once both groups have finished.
///
/// Each group is ranked over its own matches with the event's criteria, then
/// A1 meets B2 and B1 meets A2. The semifinals follow the last group round,
/// one per court; with a single court the second one gets its own round.
pub fn schedule_semifinals(
    config: &EventConfig,
    event_id: EventId,
    participants: &[Participant],
    matches: &[Match],
) -> EventResult<[Match; 2]> {
    let group_matches: Vec<&Match> = matches.iter().filter(|m| m.group.is_some()).collect();
    if group_matches.is_empty() {
        return Err(EventError::NoGroupMatches);
    }

    let pending = group_matches.iter().filter(|m| !m.is_finished()).count();
    if pending > 0 {
        return Err(EventError::GroupStageUnfinished(pending));
    }

    let rank_group = |name: &str| {
        let in_group: Vec<Match> = group_matches
            .iter()
            .filter(|m| m.group.as_deref() == Some(name))
            .map(|m| (*m).clone())
            .collect();
        let members: Vec<Participant> = participants
            .iter()
            .filter(|p| in_group.iter().any(|m| m.involves(p.id)))
            .cloned()
            .collect();
        calculate_ranking(
            &members,
            &in_group,
            &config.tiebreak_criteria,
            config.points_per_win,
        )
    };
    let ranking_a = rank_group(GROUP_A);
    let ranking_b = rank_group(GROUP_B);

    let last_round = group_matches.iter().map(|m| m.round).max().unwrap_or(0);
    let [first, second] = generate_finals(&ranking_a, &ranking_b, event_id, last_round + 1)?;

    let num_courts = config.num_courts.max(1);
    let place = |m: Match, idx: usize| {
        m.with_round(last_round + 1 + (idx / num_courts) as u32)
            .with_court((idx % num_courts) as u32 + 1)
    };
    let (first, second) = (place(first, 0), place(second, 1));

    info!(
        "Semifinals for event {}: {} vs {} and {} vs {}",
        event_id, first.team1_id, first.team2_id, second.team1_id, second.team2_id
    );
    Ok([first, second])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchScores, SetScore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pairs() -> Vec<Participant> {
        (1..=8).map(|i| Participant::pair(i, i * 10, i * 10 + 1)).collect()
    }

    fn players() -> Vec<Participant> {
        (1..=8).map(|i| Participant::individual(i, i * 100)).collect()
    }

    fn config(format: EventFormat) -> EventConfig {
        EventConfig {
            format,
            seed_groups: true,
            ..EventConfig::default()
        }
    }

    fn finish_all(matches: &mut [Match]) {
        let config = EventConfig::default();
        for m in matches.iter_mut() {
            m.record_played(
                config.score_ruleset.ruleset(),
                config.num_sets,
                MatchScores::one_set(SetScore::new(6, 2)),
            )
            .unwrap();
        }
    }

    #[test]
    fn test_round_robin_event() {
        let config = config(EventFormat::RoundRobin);
        let mut registry = InMemoryPairRegistry::new(&pairs());
        let matches = generate_event_matches(&config, 42, &pairs(), &mut registry).unwrap();

        assert_eq!(matches.len(), 28);
        assert!(matches.iter().all(|m| m.event_id == 42 && m.round >= 1));
        assert!(matches.iter().all(|m| m.court.is_some_and(|c| c <= 2)));
        assert!(registry.pairs().is_empty());
    }

    #[test]
    fn test_roster_checks() {
        let config = config(EventFormat::RoundRobin);
        let mut registry = InMemoryPairRegistry::new(&[]);

        let roster = pairs();
        let seven = &roster[..7];
        assert!(matches!(
            generate_event_matches(&config, 1, seven, &mut registry),
            Err(EventError::Schedule(ScheduleError::WrongParticipantCount {
                expected: 8,
                actual: 7
            }))
        ));
        assert!(matches!(
            generate_event_matches(&config, 1, &players(), &mut registry),
            Err(EventError::Schedule(ScheduleError::IncompletePair(1)))
        ));

        let rotating = EventConfig {
            format: EventFormat::Rotating,
            ..EventConfig::default()
        };
        assert!(matches!(
            generate_event_matches(&rotating, 1, &pairs(), &mut registry),
            Err(EventError::Schedule(ScheduleError::UnexpectedPair(1)))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EventConfig {
            num_courts: 0,
            ..EventConfig::default()
        };
        let mut registry = InMemoryPairRegistry::new(&[]);
        assert!(matches!(
            generate_event_matches(&config, 1, &pairs(), &mut registry),
            Err(EventError::Config(_))
        ));
    }

    #[test]
    fn test_groups_event_with_drawn_groups() {
        let config = EventConfig {
            format: EventFormat::GroupsFinals,
            ..EventConfig::default()
        };
        let mut generator = EventGenerator::with_rng(&config, StdRng::seed_from_u64(7));
        let mut registry = InMemoryPairRegistry::new(&pairs());
        let matches = generator.generate(3, &pairs(), &mut registry).unwrap();

        assert_eq!(matches.len(), 12);
        assert_eq!(matches.iter().filter(|m| m.group.as_deref() == Some(GROUP_A)).count(), 6);
        assert_eq!(matches.iter().filter(|m| m.group.as_deref() == Some(GROUP_B)).count(), 6);
    }

    #[test]
    fn test_rotating_event_materializes_pairs() {
        let config = config(EventFormat::Rotating);
        let roster = players();
        let mut registry = InMemoryPairRegistry::new(&roster);
        let matches = generate_event_matches(&config, 5, &roster, &mut registry).unwrap();

        assert_eq!(matches.len(), 8);
        assert_eq!(registry.pairs().len(), 16);

        let pair_ids: HashSet<_> = registry.pairs().iter().map(|p| p.id).collect();
        assert_eq!(pair_ids, (9..=24).collect::<HashSet<_>>());
        assert!(
            matches
                .iter()
                .all(|m| pair_ids.contains(&m.team1_id) && pair_ids.contains(&m.team2_id))
        );

        // Round 1 pairs players 1+2 against 3+4
        let first = &registry.pairs()[0];
        assert_eq!((first.player1_id, first.player2_id), (100, Some(200)));
        assert_eq!((matches[0].team1_id, matches[0].round, matches[0].court), (9, 1, Some(1)));
    }

    #[test]
    fn test_semifinals_after_group_stage() {
        let config = config(EventFormat::GroupsFinals);
        let mut registry = InMemoryPairRegistry::new(&pairs());
        let mut matches = generate_event_matches(&config, 1, &pairs(), &mut registry).unwrap();

        assert!(matches!(
            schedule_semifinals(&config, 1, &pairs(), &matches),
            Err(EventError::GroupStageUnfinished(12))
        ));

        // Team 1 wins every match: 1 > 2 > 3 > 4 and 5 > 6 > 7 > 8
        finish_all(&mut matches);
        let [semi1, semi2] = schedule_semifinals(&config, 1, &pairs(), &matches).unwrap();

        assert_eq!((semi1.team1_id, semi1.team2_id), (1, 6));
        assert_eq!((semi2.team1_id, semi2.team2_id), (5, 2));
        assert_eq!((semi1.round, semi1.court), (10, Some(1)));
        assert_eq!((semi2.round, semi2.court), (10, Some(2)));
        assert_eq!(semi1.group, None);
    }

    #[test]
    fn test_semifinals_on_one_court() {
        let config = EventConfig {
            num_courts: 1,
            ..config(EventFormat::GroupsFinals)
        };
        let mut registry = InMemoryPairRegistry::new(&pairs());
        let mut matches = generate_event_matches(&config, 1, &pairs(), &mut registry).unwrap();
        finish_all(&mut matches);

        let [semi1, semi2] = schedule_semifinals(&config, 1, &pairs(), &matches).unwrap();
        assert_eq!((semi1.round, semi1.court), (13, Some(1)));
        assert_eq!((semi2.round, semi2.court), (14, Some(1)));
    }

    #[test]
    fn test_semifinals_need_group_matches() {
        let config = config(EventFormat::RoundRobin);
        let mut registry = InMemoryPairRegistry::new(&pairs());
        let matches = generate_event_matches(&config, 1, &pairs(), &mut registry).unwrap();

        assert!(matches!(
            schedule_semifinals(&config, 1, &pairs(), &matches),
            Err(EventError::NoGroupMatches)
        ));
    }
}
