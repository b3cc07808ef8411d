//! Tests for player HTTP handlers.

use super::*;
use crate::domain::ports::MockPlayersQuery;
use crate::inbound::http::router::app;
use crate::inbound::http::test_utils::{json_body, location, seeded_state, state_over};
use crate::test_support::InMemoryScoreboard;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn digest(plaintext: &str) -> String {
    PasswordDigest::of_plaintext(plaintext).as_str().to_owned()
}

#[actix_web::test]
async fn collection_lists_players_with_controls() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get().uri("/api/players/").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/vnd.mason+json")
    );
    let body = json_body(res).await;
    assert_eq!(
        body["@namespaces"]["gss"]["name"],
        "/gamescoreservice/link-relations/"
    );
    assert_eq!(body["@controls"]["self"]["href"], "/api/players/");
    assert_eq!(body["@controls"]["up"]["href"], "/api/");
    assert_eq!(body["@controls"]["gss:games-all"]["href"], "/api/games/");
    assert_eq!(body["@controls"]["gss:add-player"]["method"], "POST");
    let items = body["items"].as_array().expect("items");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Player 1");
    assert_eq!(items[0]["unique_name"], "player_1");
    assert_eq!(items[0]["@controls"]["self"]["href"], "/api/players/player_1/");
    assert_eq!(items[0]["@controls"]["profile"]["href"], "/profiles/player/");
}

#[actix_web::test]
async fn create_derives_the_unique_name() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/players/")
        .set_json(json!({"name": "Ada L", "password": digest("secret")}))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(location(&res), "/api/players/ada_l/");
}

#[actix_web::test]
async fn duplicate_unique_names_conflict() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/players/")
        .set_json(json!({
            "name": "Someone",
            "unique_name": "player_2",
            "password": digest("secret"),
        }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = json_body(res).await;
    assert_eq!(body["@error"]["@message"], "Already exists");
    assert_eq!(body["@error"]["@messages"][0], "Player 'player_2' already exists.");
}

#[rstest]
#[case::missing_name(json!({"password": "0cc175b9c0f1b6a831c399e269772661"}), "name")]
#[case::missing_password(json!({"name": "Ada"}), "password")]
#[case::bad_name(json!({"name": "Ada!", "password": "0cc175b9c0f1b6a831c399e269772661"}), "name")]
#[case::bad_digest(json!({"name": "Ada", "password": "plain"}), "password")]
#[actix_web::test]
async fn invalid_payloads_are_rejected(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/players/")
        .set_json(payload)
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["@error"]["@code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn non_json_bodies_are_unsupported() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/players/")
        .insert_header(("content-type", "text/plain"))
        .set_payload("name=Ada")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_web::test]
async fn item_carries_navigation_and_edit_controls() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/players/player_1/")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["name"], "Player 1");
    let controls = &body["@controls"];
    assert_eq!(controls["collection"]["href"], "/api/players/");
    assert_eq!(controls["gss:scores-by"]["href"], "/api/players/player_1/scores/");
    assert_eq!(controls["edit"]["method"], "PUT");
    assert_eq!(controls["edit"]["encoding"], "json");
    assert_eq!(controls["gss:delete"]["method"], "DELETE");
}

#[rstest]
#[case::unknown("/api/players/nobody/", "Player 'nobody' wasn't found.")]
#[case::invalid_segment("/api/players/No%20Body/", "Player 'No Body' wasn't found.")]
#[actix_web::test]
async fn unknown_players_are_not_found(#[case] uri: &str, #[case] message: &str) {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get().uri(uri).to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["@error"]["@messages"][0], message);
    assert_eq!(body["@controls"]["profile"]["href"], "/profiles/error/");
}

#[actix_web::test]
async fn replace_without_rename_is_no_content() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::put()
        .uri("/api/players/player_1/")
        .set_json(json!({
            "name": "Player One",
            "unique_name": "player_1",
            "password": digest("pw 1"),
        }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let req = actix_test::TestRequest::get()
        .uri("/api/players/player_1/")
        .to_request();
    let body = json_body(actix_test::call_service(&app, req).await).await;
    assert_eq!(body["name"], "Player One");
}

#[actix_web::test]
async fn rename_moves_the_player() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::put()
        .uri("/api/players/player_1/")
        .set_json(json!({
            "name": "Player 1",
            "unique_name": "first",
            "password": digest("pw 1"),
        }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(location(&res), "/api/players/first/");
}

#[actix_web::test]
async fn delete_removes_player_and_scores() {
    let store = Arc::new(InMemoryScoreboard::seeded());
    let app = actix_test::init_service(app(state_over(store.clone()))).await;
    let req = actix_test::TestRequest::delete()
        .uri("/api/players/player_3/")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.counts(), (2, 3, 9, 18));
}

#[actix_web::test]
async fn scores_by_lists_every_game() {
    let app = actix_test::init_service(app(seeded_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/players/player_2/scores/")
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["@controls"]["author"]["href"], "/api/players/player_2/");
    let items = body["items"].as_array().expect("items");
    assert_eq!(items.len(), 9);
    assert_eq!(items[0]["game"], "Game 1");
    assert_eq!(items[0]["level"], "Level 1");
    assert_eq!(items[0]["value"], 200);
    assert_eq!(items[0]["type"], "number");
    assert_eq!(items[0]["date"], "2024-08-15 21:22:23");
    assert_eq!(
        items[0]["@controls"]["self"]["href"],
        "/api/games/Game%201/Level%201/player_2/"
    );
}

#[actix_web::test]
async fn unavailable_database_maps_to_service_unavailable() {
    let mut query = MockPlayersQuery::new();
    query
        .expect_list_players()
        .times(1)
        .return_once(|| Err(Error::service_unavailable("database offline")));
    let mut state = HttpState::clone(&seeded_state());
    state.players_query = Arc::new(query);

    let app = actix_test::init_service(app(web::Data::new(state))).await;
    let req = actix_test::TestRequest::get().uri("/api/players/").to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(res).await;
    assert_eq!(body["@error"]["@code"], "service_unavailable");
}
