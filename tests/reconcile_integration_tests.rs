//! End-to-end reconciliation scenarios over a scripted results source.

use matchday::data_fetcher::models::{DataCategory, Group};
use matchday::leagues::{LeagueKey, LeagueShortcuts};
use matchday::testing_utils::{MockResultsSource, SourceCall, TestDataBuilder};
use matchday::{AppError, reconcile, reconcile_with_shortcuts};

const SEASON: i32 = 2025;

fn finished_round(first_id: i64) -> Vec<matchday::data_fetcher::models::Match> {
    vec![
        TestDataBuilder::finished_match(first_id, (40, "FC Bayern München"), (7, "Borussia Dortmund"), 3, 1),
        TestDataBuilder::finished_match(first_id + 1, (16, "VfB Stuttgart"), (6, "Bayer 04 Leverkusen"), 1, 1),
    ]
}

fn matches_calls(source: &MockResultsSource) -> Vec<i32> {
    source
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SourceCall::Matches { ordinal, .. } => Some(ordinal),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_table_failure_is_reported_without_touching_matches() {
    let matches = vec![TestDataBuilder::scheduled_match(
        1,
        (40, "FC Bayern München"),
        (7, "Borussia Dortmund"),
    )];
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("12. Spieltag", 12))
        .with_table_error("bl1", SEASON, 500)
        .with_matches("bl1", SEASON, 12, matches.clone());

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    assert_eq!(view.current_round.matches, matches);
    assert!(view.table.is_empty());
    assert_eq!(view.visible_errors, vec![DataCategory::Table]);

    let labels: Vec<String> = view.visible_errors.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["table"]);
}

#[tokio::test]
async fn test_goals_of_current_round_are_sorted() {
    let mut game = TestDataBuilder::finished_match(1, (1, "A"), (2, "B"), 2, 0);
    game.goals = vec![
        matchday::data_fetcher::models::Goal {
            goal_id: Some(2),
            match_minute: Some(80),
            ..Default::default()
        },
        matchday::data_fetcher::models::Goal {
            goal_id: Some(1),
            match_minute: Some(5),
            ..Default::default()
        },
    ];
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("1. Spieltag", 1))
        .with_table("bl1", SEASON, Vec::new())
        .with_matches("bl1", SEASON, 1, vec![game]);

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    let minutes: Vec<_> = view.current_round.matches[0]
        .goals
        .iter()
        .filter_map(|goal| goal.match_minute)
        .collect();
    assert_eq!(minutes, vec![5, 80]);
}

#[tokio::test]
async fn test_missing_current_round_is_fatal_with_partial_data() {
    let source = MockResultsSource::new()
        .with_current_round_error("ucl", 503)
        .with_table("ucl", 2024, vec![TestDataBuilder::table_row(1, "Liverpool", 21)])
        .with_groups_error("cl", 2024, 404)
        .with_groups("ucl", 2024, vec![Group::new("Achtelfinale", 10)])
        .with_matches_error("ucl", 2024, 9, 500);

    let error = reconcile(&source, LeagueKey::Cl, 2024).await.unwrap_err();

    let AppError::CurrentRoundMissing { shortcut, partial } = error else {
        panic!("expected the current round to be missing");
    };
    assert_eq!(shortcut, "ucl");
    assert_eq!(partial.table.len(), 1);
    assert_eq!(partial.groups, vec![Group::new("Achtelfinale", 10)]);
    assert!(partial.playoff_matches.is_empty());
    assert_eq!(
        partial.visible_errors,
        vec![DataCategory::CurrentGroup, DataCategory::Playoffs]
    );
    assert!(matches_calls(&source).iter().all(|ordinal| *ordinal == 9));
}

#[tokio::test]
async fn test_unfinished_round_does_not_look_ahead() {
    let mut matches = finished_round(1);
    matches.push(TestDataBuilder::scheduled_match(3, (1, "A"), (2, "B")));
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups("bl1", SEASON, TestDataBuilder::matchdays(34))
        .with_matches("bl1", SEASON, 5, matches);

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    assert!(view.next_round.is_none());
    assert_eq!(matches_calls(&source), vec![5]);
    assert!(!source
        .calls()
        .iter()
        .any(|call| matches!(call, SourceCall::Groups { .. })));
}

#[tokio::test]
async fn test_finished_round_finds_next_matchday_from_stage_list() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups("bl1", SEASON, TestDataBuilder::matchdays(34))
        .with_matches("bl1", SEASON, 5, finished_round(50))
        .with_matches(
            "bl1",
            SEASON,
            6,
            vec![TestDataBuilder::scheduled_match(60, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    let next = view.next_round.expect("next round");
    assert_eq!(next.order_id, 6);
    assert_eq!(next.name, "6. Spieltag");
    assert_eq!(next.matches.len(), 1);
    assert!(view.visible_errors.is_empty());
}

#[tokio::test]
async fn test_known_later_stage_wins_over_nearer_fallback() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups(
            "bl1",
            SEASON,
            vec![Group::new("5. Spieltag", 5), Group::new("7. Spieltag", 7)],
        )
        .with_matches("bl1", SEASON, 5, finished_round(50))
        .with_matches("bl1", SEASON, 6, Vec::new())
        .with_matches(
            "bl1",
            SEASON,
            7,
            vec![TestDataBuilder::scheduled_match(70, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    let next = view.next_round.expect("next round");
    assert_eq!(next.order_id, 7);
    assert_eq!(next.name, "7. Spieltag");
    assert_eq!(matches_calls(&source), vec![5, 7]);
}

#[tokio::test]
async fn test_lookahead_skips_missing_rounds_silently() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_matches("bl1", SEASON, 5, finished_round(50))
        .with_matches(
            "bl1",
            SEASON,
            8,
            vec![TestDataBuilder::scheduled_match(80, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    let next = view.next_round.expect("next round");
    assert_eq!(next.order_id, 8);
    assert_eq!(next.name, "Next Matchday");
    assert!(view.visible_errors.is_empty());
    assert_eq!(matches_calls(&source), vec![5, 6, 7, 8]);
}

#[tokio::test]
async fn test_lookahead_failure_is_reported_once_and_stops() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups("bl1", SEASON, TestDataBuilder::matchdays(34))
        .with_matches("bl1", SEASON, 5, finished_round(50))
        .with_matches_error("bl1", SEASON, 6, 500)
        .with_matches(
            "bl1",
            SEASON,
            7,
            vec![TestDataBuilder::scheduled_match(70, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    assert!(view.next_round.is_none());
    assert_eq!(view.visible_errors, vec![DataCategory::NextMatchday]);
    assert_eq!(matches_calls(&source), vec![5, 6]);
}

#[tokio::test]
async fn test_exhausted_lookahead_is_not_an_error() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("34. Spieltag", 34))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups("bl1", SEASON, TestDataBuilder::matchdays(34))
        .with_matches("bl1", SEASON, 34, finished_round(340));

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    assert!(view.next_round.is_none());
    assert!(view.visible_errors.is_empty());
    assert_eq!(matches_calls(&source), vec![34, 35, 36, 37, 38, 39, 40, 41, 42]);
}

#[tokio::test]
async fn test_stage_list_failure_during_lookahead_is_reported() {
    let source = MockResultsSource::new()
        .with_current_round("bl1", Group::new("5. Spieltag", 5))
        .with_table("bl1", SEASON, Vec::new())
        .with_groups_error("bl1", SEASON, 500)
        .with_matches("bl1", SEASON, 5, finished_round(50))
        .with_matches(
            "bl1",
            SEASON,
            6,
            vec![TestDataBuilder::scheduled_match(60, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Bl1, SEASON).await.unwrap();

    assert_eq!(view.next_round.map(|next| next.order_id), Some(6));
    assert_eq!(view.visible_errors, vec![DataCategory::NextGroups]);
}

#[tokio::test]
async fn test_missing_stage_list_is_silent_for_bracket_competitions() {
    let source = MockResultsSource::new()
        .with_current_round("ucl", Group::new("League Phase Matchday 3", 3))
        .with_table("ucl", 2024, Vec::new())
        .with_groups_error("cl", 2024, 404)
        .with_groups_error("ucl", 2024, 404)
        .with_matches("ucl", 2024, 9, Vec::new())
        .with_matches(
            "ucl",
            2024,
            3,
            vec![TestDataBuilder::scheduled_match(30, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Cl, 2024).await.unwrap();

    assert!(view.bracket.is_empty());
    assert!(view.visible_errors.is_empty());
}

#[tokio::test]
async fn test_knockout_rounds_use_data_shortcut_and_pair_ties() {
    let source = MockResultsSource::new()
        .with_current_round("ucl", Group::new("Viertelfinale", 11))
        .with_table("ucl", 2024, Vec::new())
        .with_groups(
            "cl",
            2024,
            vec![
                Group::new("League Phase Matchday 8", 8),
                Group::new("Achtelfinale", 10),
                Group::new("Viertelfinale", 11),
            ],
        )
        .with_matches("ucl", 2024, 9, Vec::new())
        .with_matches("ucl", 2024, 11, Vec::new())
        .with_round_matches(
            "ucl",
            2024,
            10,
            vec![
                TestDataBuilder::kicking_off(
                    TestDataBuilder::finished_match(101, (7, "Team A"), (9, "Team B"), 2, 1),
                    "2025-03-04T20:00:00Z",
                ),
                TestDataBuilder::kicking_off(
                    TestDataBuilder::finished_match(102, (9, "Team B"), (7, "Team A"), 0, 1),
                    "2025-03-11T20:00:00Z",
                ),
            ],
        )
        .with_round_matches_error("ucl", 2024, 11, 500);

    let view = reconcile(&source, LeagueKey::Cl, 2024).await.unwrap();

    assert_eq!(view.bracket.len(), 2);
    let round_of_16 = &view.bracket[0];
    assert_eq!(round_of_16.group.group_name.as_deref(), Some("Achtelfinale"));
    assert_eq!(round_of_16.ties.len(), 1);
    let aggregate = round_of_16.ties[0].aggregate_score.as_ref().unwrap();
    assert_eq!((aggregate.team1, aggregate.team2), (3, 1));

    assert!(view.bracket[1].matches.is_empty());
    assert_eq!(view.visible_errors, vec![DataCategory::KnockoutRounds]);
    assert!(!source.calls().iter().any(|call| matches!(
        call,
        SourceCall::RoundMatches { shortcut, .. } if shortcut == "cl"
    )));
}

#[tokio::test]
async fn test_knockout_rounds_follow_listed_data_shortcut() {
    let shortcuts = LeagueShortcuts::with_data_shortcut(LeagueKey::Cl, "ucl24");
    let source = MockResultsSource::new()
        .with_current_round("ucl24", Group::new("League Phase Matchday 8", 8))
        .with_table("ucl24", 2024, Vec::new())
        .with_groups("cl", 2024, vec![Group::new("Achtelfinale", 10)])
        .with_matches("ucl", 2024, 9, Vec::new())
        .with_matches(
            "ucl24",
            2024,
            8,
            vec![TestDataBuilder::scheduled_match(80, (1, "A"), (2, "B"))],
        )
        .with_round_matches(
            "ucl24",
            2024,
            10,
            vec![TestDataBuilder::scheduled_match(100, (7, "Team A"), (9, "Team B"))],
        );

    let view = reconcile_with_shortcuts(&source, LeagueKey::Cl, 2024, &shortcuts)
        .await
        .unwrap();

    assert_eq!(view.bracket.len(), 1);
    assert_eq!(view.bracket[0].matches.len(), 1);
    assert!(view.visible_errors.is_empty());

    let round_shortcuts: Vec<String> = source
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SourceCall::RoundMatches { shortcut, .. } => Some(shortcut),
            _ => None,
        })
        .collect();
    assert_eq!(round_shortcuts, vec!["ucl24"]);
}

#[tokio::test]
async fn test_seeded_playoffs_replace_stage_rounds() {
    let source = MockResultsSource::new()
        .with_current_round("ucl", Group::new("League Phase Matchday 8", 8))
        .with_table("ucl", 2024, Vec::new())
        .with_groups("cl", 2024, vec![Group::new("Achtelfinale", 10)])
        .with_matches(
            "ucl",
            2024,
            9,
            vec![
                TestDataBuilder::finished_match(91, (5, "Celtic"), (6, "Bayern"), 1, 2),
                TestDataBuilder::finished_match(92, (6, "Bayern"), (5, "Celtic"), 1, 1),
            ],
        )
        .with_matches(
            "ucl",
            2024,
            8,
            vec![TestDataBuilder::scheduled_match(80, (1, "A"), (2, "B"))],
        );

    let view = reconcile(&source, LeagueKey::Cl, 2024).await.unwrap();

    assert_eq!(view.bracket.len(), 1);
    assert_eq!(view.bracket[0].group.group_name.as_deref(), Some("Playoffs"));
    assert_eq!(view.bracket[0].group.group_id, Some(9));
    assert_eq!(view.bracket[0].ties.len(), 1);
    assert!(!source
        .calls()
        .iter()
        .any(|call| matches!(call, SourceCall::RoundMatches { .. })));
}

#[tokio::test]
async fn test_error_categories_are_deduplicated_and_ordered() {
    let source = MockResultsSource::new()
        .with_current_round("ucl", Group::new("Halbfinale", 12))
        .with_table_error("ucl", 2024, 500)
        .with_groups(
            "cl",
            2024,
            vec![
                Group::new("Achtelfinale", 10),
                Group::new("Viertelfinale", 11),
                Group::new("Halbfinale", 12),
            ],
        )
        .with_matches_error("ucl", 2024, 9, 502)
        .with_matches_error("ucl", 2024, 12, 500)
        .with_round_matches_error("ucl", 2024, 10, 500)
        .with_round_matches_error("ucl", 2024, 11, 500)
        .with_round_matches_error("ucl", 2024, 12, 500);

    let view = reconcile(&source, LeagueKey::Cl, 2024).await.unwrap();

    assert_eq!(
        view.visible_errors,
        vec![
            DataCategory::Table,
            DataCategory::Playoffs,
            DataCategory::Matchday,
            DataCategory::KnockoutRounds,
        ]
    );
    assert_eq!(view.bracket.len(), 3);
}

#[tokio::test]
async fn test_custom_shortcuts_are_used_for_every_request() {
    let shortcuts = LeagueShortcuts::with_data_shortcut(LeagueKey::Bl1, "bl1x");
    let source = MockResultsSource::new()
        .with_current_round("bl1x", Group::new("2. Spieltag", 2))
        .with_table("bl1x", SEASON, Vec::new())
        .with_matches("bl1x", SEASON, 2, Vec::new());

    let view = reconcile_with_shortcuts(&source, LeagueKey::Bl1, SEASON, &shortcuts)
        .await
        .unwrap();

    assert_eq!(view.current_round.order_id, 2);
    assert!(view.visible_errors.is_empty());
}
