//! Game resources. A game item doubles as the collection of its levels.
//!
//! ```text
//! GET    /api/games/
//! POST   /api/games/          {"name":"Space Race","publisher":"Acme","genre":"Racing"}
//! GET    /api/games/{game}/
//! PUT    /api/games/{game}/
//! POST   /api/games/{game}/   {"name":"Level 1","type":"number","order":"descending"}
//! DELETE /api/games/{game}/
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, Game, GameDraft, Label, Level, LevelDraft, ResourceName};

use super::ApiResult;
use super::hypermedia::{
    Profile, add_game, add_level, delete as delete_control, edit, entry_href, game_href,
    game_schema, game_segment, games_href, level_href, players_all,
};
use super::levels::LevelRequest;
use super::mason::{Control, MasonDocument};
use super::schemas::{MasonDocumentSchema, MasonErrorSchema};
use super::state::HttpState;
use super::validation::{FieldName, parse_field, required};

const NAME: FieldName = FieldName::new("name");
const PUBLISHER: FieldName = FieldName::new("publisher");
const GENRE: FieldName = FieldName::new("genre");

/// Body of game create and edit requests. Empty labels mean "absent".
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GameRequest {
    #[schema(example = "Space Race")]
    pub name: Option<String>,
    #[schema(example = "Acme")]
    pub publisher: Option<String>,
    #[schema(example = "Racing")]
    pub genre: Option<String>,
}

fn parse_label(value: Option<&str>, field: FieldName) -> Result<Option<Label>, Error> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => parse_field(raw, field, |v| Label::new(v)).map(Some),
    }
}

impl TryFrom<GameRequest> for GameDraft {
    type Error = Error;

    fn try_from(value: GameRequest) -> Result<Self, Self::Error> {
        let name = required(value.name, NAME)?;
        Ok(Self {
            name: parse_field(&name, NAME, |v| ResourceName::new(v))?,
            publisher: parse_label(value.publisher.as_deref(), PUBLISHER)?,
            genre: parse_label(value.genre.as_deref(), GENRE)?,
        })
    }
}

fn label_value(label: Option<&Label>) -> Value {
    label.map_or(Value::Null, |label| Value::from(label.as_str()))
}

fn game_fields(game: &Game) -> MasonDocument {
    MasonDocument::new()
        .field("name", game.name.as_str())
        .field("publisher", label_value(game.publisher.as_ref()))
        .field("genre", label_value(game.genre.as_ref()))
}

fn level_entry(game: &ResourceName, level: &Level) -> MasonDocument {
    MasonDocument::new()
        .field("name", level.name.as_str())
        .field("type", level.kind.as_str())
        .field("order", level.order.as_str())
        .control("self", Control::new(level_href(game, &level.name)))
        .control("profile", Profile::Level.control())
}

/// List every game.
#[utoipa::path(
    get,
    path = "/api/games/",
    responses(
        (status = 200, description = "Game collection", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 503, description = "Database unavailable", body = MasonErrorSchema)
    ),
    tags = ["games"],
    operation_id = "listGames"
)]
#[get("/games/")]
pub async fn list_games(state: web::Data<HttpState>) -> ApiResult<MasonDocument> {
    let games = state.games_query.list_games().await?;
    let items = games.iter().map(|game| {
        game_fields(game)
            .control("self", Control::new(game_href(&game.name)))
            .control("profile", Profile::Game.control())
    });
    Ok(MasonDocument::new()
        .with_namespace()
        .control("self", Control::new(games_href()))
        .control("up", Control::new(entry_href()).title("API entry point"))
        .control("gss:players-all", players_all())
        .control("gss:add-game", add_game())
        .items(items))
}

/// Register a game.
#[utoipa::path(
    post,
    path = "/api/games/",
    request_body = GameRequest,
    responses(
        (status = 201, description = "Game created", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 409, description = "Name taken", body = MasonErrorSchema),
        (status = 415, description = "Body is not JSON", body = MasonErrorSchema)
    ),
    tags = ["games"],
    operation_id = "createGame"
)]
#[post("/games/")]
pub async fn create_game(
    state: web::Data<HttpState>,
    payload: web::Json<GameRequest>,
) -> ApiResult<HttpResponse> {
    let draft = GameDraft::try_from(payload.into_inner())?;
    let game = state.games.create_game(draft).await?;
    debug!(game = %game.name, "game registered");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, game_href(&game.name)))
        .finish())
}

/// Fetch a game together with its levels.
#[utoipa::path(
    get,
    path = "/api/games/{game}/",
    params(("game" = String, Path, description = "Game name")),
    responses(
        (status = 200, description = "Game and its levels", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 404, description = "Unknown game", body = MasonErrorSchema)
    ),
    tags = ["games"],
    operation_id = "getGame"
)]
#[get("/games/{game}/")]
pub async fn get_game(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<MasonDocument> {
    let name = game_segment(&path)?;
    let game = state.games_query.game(&name).await?;
    let levels = state.levels_query.levels(&game.name).await?;
    let href = game_href(&game.name);
    Ok(game_fields(&game)
        .with_namespace()
        .control("self", Control::new(href.clone()))
        .control("profile", Profile::Game.control())
        .control("collection", Control::new(games_href()))
        .control("gss:add-level", add_level(&game.name))
        .control("edit", edit(href.clone(), "Edit this game", game_schema()))
        .control("gss:delete", delete_control(href))
        .items(levels.iter().map(|level| level_entry(&game.name, level))))
}

/// Replace a game. Renaming moves the resource.
#[utoipa::path(
    put,
    path = "/api/games/{game}/",
    params(("game" = String, Path, description = "Game name")),
    request_body = GameRequest,
    responses(
        (status = 204, description = "Game updated"),
        (status = 301, description = "Game renamed", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 404, description = "Unknown game", body = MasonErrorSchema),
        (status = 409, description = "Name taken", body = MasonErrorSchema)
    ),
    tags = ["games"],
    operation_id = "replaceGame"
)]
#[put("/games/{game}/")]
pub async fn replace_game(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GameRequest>,
) -> ApiResult<HttpResponse> {
    let current = game_segment(&path)?;
    let draft = GameDraft::try_from(payload.into_inner())?;
    let game = state.games.replace_game(&current, draft).await?;
    if game.name == current {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::MovedPermanently()
            .insert_header((LOCATION, game_href(&game.name)))
            .finish())
    }
}

/// Add a level to a game.
#[utoipa::path(
    post,
    path = "/api/games/{game}/",
    params(("game" = String, Path, description = "Game name")),
    request_body = LevelRequest,
    responses(
        (status = 201, description = "Level created", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 404, description = "Unknown game", body = MasonErrorSchema),
        (status = 409, description = "Level name taken in this game", body = MasonErrorSchema)
    ),
    tags = ["levels"],
    operation_id = "createLevel"
)]
#[post("/games/{game}/")]
pub async fn create_level(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<LevelRequest>,
) -> ApiResult<HttpResponse> {
    let game = game_segment(&path)?;
    let draft = LevelDraft::try_from(payload.into_inner())?;
    let level = state.levels.create_level(&game, draft).await?;
    debug!(game = %game, level = %level.name, "level created");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, level_href(&game, &level.name)))
        .finish())
}

/// Delete a game with all of its levels and scores.
#[utoipa::path(
    delete,
    path = "/api/games/{game}/",
    params(("game" = String, Path, description = "Game name")),
    responses(
        (status = 204, description = "Game deleted"),
        (status = 404, description = "Unknown game", body = MasonErrorSchema)
    ),
    tags = ["games"],
    operation_id = "deleteGame"
)]
#[delete("/games/{game}/")]
pub async fn delete_game(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = game_segment(&path)?;
    state.games.delete_game(&name).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "games_tests.rs"]
mod tests;
