//! Integration tests for score rulesets and match validation
//!
//! These tests pin down which set scores each preset accepts and how
//! two-set matches ask for a decider.

#[cfg(test)]
mod score_tests {
    use super8::domain::{MatchScores, SetScore, Side};
    use super8::scoring::{
        FAST_4, MatchScoreError, NORMAL_6, SCORE_RULESETS, SUPER_TIEBREAK, ScoreRulesetId,
        ScoreVerdict, SetScoreError, SetsPerMatch, validate_match_score, validate_set_score,
        walkover_score,
    };

    #[test]
    fn test_normal_6_accepted_scores() {
        for loser in 0..=4 {
            assert!(validate_set_score(&NORMAL_6, 6, loser).is_ok(), "6-{loser}");
            assert!(validate_set_score(&NORMAL_6, loser, 6).is_ok(), "{loser}-6");
        }
        assert!(validate_set_score(&NORMAL_6, 7, 5).is_ok());
        assert!(validate_set_score(&NORMAL_6, 5, 7).is_ok());
    }

    #[test]
    fn test_normal_6_rejected_scores() {
        for (a, b) in [(6, 5), (6, 6), (7, 6), (8, 6), (5, 3), (7, 4), (-1, 6)] {
            assert!(validate_set_score(&NORMAL_6, a, b).is_err(), "{a}-{b}");
        }
        assert_eq!(
            validate_set_score(&NORMAL_6, 6, 5),
            Err(SetScoreError::UnfinishedSet {
                ruleset: ScoreRulesetId::Normal6
            })
        );
    }

    #[test]
    fn test_fast_4_scores() {
        for loser in 0..=3 {
            assert!(validate_set_score(&FAST_4, 4, loser).is_ok(), "4-{loser}");
        }
        for (a, b) in [(5, 4), (4, 4), (3, 1), (5, 0)] {
            assert!(validate_set_score(&FAST_4, a, b).is_err(), "{a}-{b}");
        }
    }

    #[test]
    fn test_super_tiebreak_has_no_upper_bound() {
        assert!(validate_set_score(&SUPER_TIEBREAK, 12, 10).is_ok());
        assert!(validate_set_score(&SUPER_TIEBREAK, 25, 23).is_ok());
        assert!(validate_set_score(&SUPER_TIEBREAK, 11, 10).is_err());
        assert!(validate_set_score(&SUPER_TIEBREAK, 9, 2).is_err());
    }

    #[test]
    fn test_split_sets_require_decider() {
        let split = MatchScores::two_sets(SetScore::new(6, 4), SetScore::new(4, 6));
        let validation = validate_match_score(&NORMAL_6, SetsPerMatch::Two, &split);

        assert!(!validation.is_ok());
        assert!(validation.requires_decider());
        assert_eq!(validation.verdict, ScoreVerdict::DeciderRequired);
        assert!(validation.reason().is_some());

        let decided = split.with_decider(SetScore::new(10, 7));
        let validation = validate_match_score(&NORMAL_6, SetsPerMatch::Two, &decided);
        assert!(validation.is_ok());
        assert_eq!(validation.winner(), Some(Side::Team1));
        assert_eq!((validation.sets_won_team1, validation.sets_won_team2), (2, 1));
        assert_eq!(validation.games_for_team1, 20);
        assert_eq!(validation.games_against_team1, 17);
    }

    #[test]
    fn test_decider_uses_super_tiebreak_whatever_the_ruleset() {
        let split = MatchScores::two_sets(SetScore::new(4, 2), SetScore::new(1, 4));

        let normal_decider = split.with_decider(SetScore::new(6, 4));
        let validation = validate_match_score(&FAST_4, SetsPerMatch::Two, &normal_decider);
        assert!(matches!(
            validation.verdict,
            ScoreVerdict::Rejected(MatchScoreError::InvalidDecider(_))
        ));

        let tiebreak_decider = split.with_decider(SetScore::new(8, 10));
        let validation = validate_match_score(&FAST_4, SetsPerMatch::Two, &tiebreak_decider);
        assert_eq!(validation.winner(), Some(Side::Team2));
    }

    #[test]
    fn test_missing_sets() {
        let empty = MatchScores::default();
        let validation = validate_match_score(&NORMAL_6, SetsPerMatch::One, &empty);
        assert_eq!(
            validation.verdict,
            ScoreVerdict::Rejected(MatchScoreError::MissingSet(1))
        );

        let one = MatchScores::one_set(SetScore::new(6, 1));
        let validation = validate_match_score(&NORMAL_6, SetsPerMatch::Two, &one);
        assert_eq!(
            validation.verdict,
            ScoreVerdict::Rejected(MatchScoreError::MissingSet(2))
        );
    }

    #[test]
    fn test_straight_sets_ignore_extra_set() {
        let scores = MatchScores::two_sets(SetScore::new(6, 1), SetScore::new(6, 2))
            .with_decider(SetScore::new(3, 10));
        let validation = validate_match_score(&NORMAL_6, SetsPerMatch::Two, &scores);

        assert_eq!(validation.winner(), Some(Side::Team1));
        assert!(!validation.decider_played());
    }

    #[test]
    fn test_walkover_scores() {
        let fast = walkover_score(&FAST_4, SetsPerMatch::One);
        assert_eq!(fast.set1, Some(SetScore::new(4, 0)));
        assert_eq!(fast.set2, None);

        let normal = walkover_score(&NORMAL_6, SetsPerMatch::Two);
        assert_eq!(normal.set1, Some(SetScore::new(6, 0)));
        assert_eq!(normal.set2, Some(SetScore::new(6, 0)));
        assert_eq!(normal.set3, None);
    }

    #[test]
    fn test_ruleset_catalogue() {
        assert_eq!(SCORE_RULESETS.len(), 3);
        for ruleset in SCORE_RULESETS {
            assert_eq!(ruleset.id.ruleset(), ruleset);
            assert_eq!(ruleset.id.to_string().parse::<ScoreRulesetId>(), Ok(ruleset.id));
            assert!(!ruleset.name.is_empty());
        }
        assert!("best_of_five".parse::<ScoreRulesetId>().is_err());
    }
}
