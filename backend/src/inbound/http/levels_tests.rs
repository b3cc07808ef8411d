//! Tests for level HTTP handlers and score submission.

use crate::domain::PasswordDigest;
use crate::inbound::http::router::app;
use crate::inbound::http::test_utils::{json_body, location, seeded_state, state_over};
use crate::test_support::InMemoryScoreboard;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

const LEVEL: &str = "/api/games/Game%201/Level%201/";

fn submission(player: &str, plaintext: &str, value: i64) -> Value {
    json!({
        "player": player,
        "password": PasswordDigest::of_plaintext(plaintext).as_str(),
        "value": value,
    })
}

fn leaderboard_players(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["player"].as_str().expect("player").to_owned())
        .collect()
}

#[actix_web::test]
async fn level_lists_scores_best_first() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get().uri(LEVEL).to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["name"], "Level 1");
    assert_eq!(body["@controls"]["up"]["href"], "/api/games/Game%201/");
    assert_eq!(body["@controls"]["gss:add-score"]["method"], "POST");
    assert_eq!(body["@controls"]["profile"]["href"], "/profiles/level/");
    assert_eq!(leaderboard_players(&body), ["Player 3", "Player 2", "Player 1"]);
    assert_eq!(body["items"][0]["value"], 300);
    assert_eq!(
        body["items"][0]["@controls"]["self"]["href"],
        "/api/games/Game%201/Level%201/player_3/"
    );
}

#[actix_web::test]
async fn switching_to_ascending_reverses_the_leaderboard() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::put()
        .uri(LEVEL)
        .set_json(json!({"name": "Level 1", "type": "time", "order": "ascending"}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = actix_test::TestRequest::get().uri(LEVEL).to_request();
    let body = json_body(actix_test::call_service(&app, req).await).await;
    assert_eq!(body["type"], "time");
    assert_eq!(leaderboard_players(&body), ["Player 1", "Player 2", "Player 3"]);
}

#[rstest]
#[case::rename("Finale", StatusCode::MOVED_PERMANENTLY)]
#[case::taken("Level 2", StatusCode::CONFLICT)]
#[actix_web::test]
async fn renaming_a_level(#[case] name: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::put()
        .uri(LEVEL)
        .set_json(json!({"name": name}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
    if expected == StatusCode::MOVED_PERMANENTLY {
        assert_eq!(location(&res), "/api/games/Game%201/Finale/");
    }
}

#[actix_web::test]
async fn submitting_a_score_records_it_now() {
    let store = Arc::new(InMemoryScoreboard::seeded());
    let app = actix_test::init_service(app(state_over(store))).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/players/")
        .set_json(json!({
            "name": "Ada",
            "password": PasswordDigest::of_plaintext("secret").as_str(),
        }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = actix_test::TestRequest::post()
        .uri(LEVEL)
        .set_json(submission("ada", "secret", 250))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(location(&res), "/api/games/Game%201/Level%201/ada/");

    let req = actix_test::TestRequest::get().uri(LEVEL).to_request();
    let body = json_body(actix_test::call_service(&app, req).await).await;
    assert_eq!(
        leaderboard_players(&body),
        ["Player 3", "Ada", "Player 2", "Player 1"]
    );
    assert_eq!(body["items"][1]["date"], "2024-08-15 21:22:23");
}

#[rstest]
#[case::wrong_password(submission("player_1", "nope", 1), StatusCode::UNAUTHORIZED)]
#[case::unknown_player(submission("ghost", "pw 1", 1), StatusCode::NOT_FOUND)]
#[case::already_scored(submission("player_1", "pw 1", 1), StatusCode::CONFLICT)]
#[case::missing_value(
    json!({"player": "player_1", "password": "0cc175b9c0f1b6a831c399e269772661"}),
    StatusCode::BAD_REQUEST
)]
#[case::bad_date(json!({
    "player": "player_1",
    "password": "0cc175b9c0f1b6a831c399e269772661",
    "value": 1,
    "date": "yesterday",
}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn rejected_submissions(#[case] payload: Value, #[case] expected: StatusCode) {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::post()
        .uri(LEVEL)
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn unknown_level_is_not_found() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/games/Game%201/Level%209/")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["@error"]["@messages"][0], "Level 'Level 9' wasn't found.");
}

#[actix_web::test]
async fn delete_removes_the_level_and_its_scores() {
    let store = Arc::new(InMemoryScoreboard::seeded());
    let app = actix_test::init_service(app(state_over(store.clone()))).await;
    let req = actix_test::TestRequest::delete().uri(LEVEL).to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.counts(), (3, 3, 8, 24));
}
