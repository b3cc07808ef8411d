//! Tests for the score service, run against the in-memory store.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ErrorCode, LevelDraft, PasswordDigest, ScoreKind, ScoreOrder};
use crate::domain::ports::LevelsCommand;
use crate::test_support::{InMemoryScoreboard, fixed_clock, fixture_timestamp};

type Service =
    ScoreService<InMemoryScoreboard, InMemoryScoreboard, InMemoryScoreboard, InMemoryScoreboard>;

struct Harness {
    store: Arc<InMemoryScoreboard>,
    service: Service,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryScoreboard::seeded());
    let levels = LevelService::new(Arc::clone(&store), Arc::clone(&store));
    let service = ScoreService::new(levels, Arc::clone(&store), Arc::clone(&store), fixed_clock());
    Harness { store, service }
}

fn name(value: &str) -> ResourceName {
    ResourceName::new(value).expect("valid name")
}

fn unique(value: &str) -> UniqueName {
    UniqueName::new(value).expect("valid unique name")
}

fn key(game: &str, level: &str, player: &str) -> ScoreKey {
    ScoreKey {
        game: name(game),
        level: name(level),
        player: unique(player),
    }
}

fn submission(player: &str, password: &str, value: i64) -> ScoreSubmission {
    ScoreSubmission {
        player: unique(player),
        password: PasswordDigest::of_plaintext(password),
        value,
        date: None,
    }
}

async fn new_level(h: &Harness, order: ScoreOrder) {
    let levels = LevelService::new(Arc::clone(&h.store), Arc::clone(&h.store));
    levels
        .create_level(
            &name("Game 1"),
            LevelDraft {
                name: name("Bonus"),
                kind: ScoreKind::Time,
                order,
            },
        )
        .await
        .expect("level created");
}

#[rstest]
#[tokio::test]
async fn leaderboard_is_ranked_best_first(harness: Harness) {
    let board = harness
        .service
        .leaderboard(&name("Game 1"), &name("Level 1"))
        .await
        .expect("leaderboard");
    let values: Vec<_> = board.iter().map(|s| s.value).collect();
    assert_eq!(values, [300, 200, 100]);
}

#[rstest]
#[tokio::test]
async fn ascending_levels_rank_lowest_first(harness: Harness) {
    new_level(&harness, ScoreOrder::Ascending).await;
    for (player, value) in [("player_1", 90), ("player_2", 30), ("player_3", 60)] {
        let password = format!("pw {}", player.trim_start_matches("player_"));
        harness
            .service
            .submit_score(&name("Game 1"), &name("Bonus"), submission(player, &password, value))
            .await
            .expect("submitted");
    }
    let board = harness
        .service
        .leaderboard(&name("Game 1"), &name("Bonus"))
        .await
        .expect("leaderboard");
    let values: Vec<_> = board.iter().map(|s| s.value).collect();
    assert_eq!(values, [30, 60, 90]);
}

#[rstest]
#[tokio::test]
async fn submissions_default_to_the_clock(harness: Harness) {
    new_level(&harness, ScoreOrder::Descending).await;
    let view = harness
        .service
        .submit_score(&name("Game 1"), &name("Bonus"), submission("player_2", "pw 2", 42))
        .await
        .expect("submitted");
    assert_eq!(view.date, fixture_timestamp());
    assert_eq!(view.kind, ScoreKind::Time);
    assert_eq!(view.player_name.as_str(), "Player 2");
}

#[rstest]
#[case("player_9", "pw 9", ErrorCode::NotFound)]
#[case("player_2", "wrong", ErrorCode::Unauthorized)]
#[case("player_2", "pw 2", ErrorCode::Conflict)]
#[tokio::test]
async fn submissions_are_checked(
    harness: Harness,
    #[case] player: &str,
    #[case] password: &str,
    #[case] expected: ErrorCode,
) {
    let err = harness
        .service
        .submit_score(&name("Game 1"), &name("Level 1"), submission(player, password, 1))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case("Game 9", "Level 1")]
#[case("Game 1", "Level 9")]
#[tokio::test]
async fn submissions_to_unknown_levels_are_not_found(
    harness: Harness,
    #[case] game: &str,
    #[case] level: &str,
) {
    let err = harness
        .service
        .submit_score(&name(game), &name(level), submission("player_1", "pw 1", 1))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn replace_updates_value_and_date(harness: Harness) {
    let date = NaiveDate::from_ymd_opt(2020, 2, 2)
        .and_then(|d| d.and_hms_opt(2, 2, 2))
        .expect("valid timestamp");
    let mut update = submission("player_1", "pw 1", 999);
    update.date = Some(date);
    let target = key("Game 2", "Level 3", "player_1");

    harness
        .service
        .replace_score(&target, update)
        .await
        .expect("replaced");
    let stored = harness.service.score(&target).await.expect("score");
    assert_eq!((stored.value, stored.date), (999, date));
}

#[rstest]
#[case("player_2", "pw 2", ErrorCode::Forbidden)]
#[case("player_1", "pw 2", ErrorCode::Unauthorized)]
#[case("nobody", "pw 1", ErrorCode::NotFound)]
#[tokio::test]
async fn replace_checks_ownership_and_credentials(
    harness: Harness,
    #[case] player: &str,
    #[case] password: &str,
    #[case] expected: ErrorCode,
) {
    let err = harness
        .service
        .replace_score(&key("Game 1", "Level 1", "player_1"), submission(player, password, 5))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn scores_by_lists_every_level(harness: Harness) {
    let scores = harness
        .service
        .scores_by(&unique("player_3"))
        .await
        .expect("scores");
    assert_eq!(scores.len(), 9);
    assert!(scores.iter().all(|s| s.value == 300));
}

#[rstest]
#[tokio::test]
async fn delete_removes_only_the_target(harness: Harness) {
    let target = key("Game 3", "Level 2", "player_2");
    harness.service.delete_score(&target).await.expect("deleted");

    let err = harness.service.score(&target).await.expect_err("gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(harness.store.counts().3, 26);
}
