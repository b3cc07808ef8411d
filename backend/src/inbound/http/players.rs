//! Player resources.
//!
//! ```text
//! GET    /api/players/
//! POST   /api/players/                {"name":"Ada L","password":"<md5>"}
//! GET    /api/players/{player}/
//! PUT    /api/players/{player}/
//! DELETE /api/players/{player}/
//! GET    /api/players/{player}/scores/
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, PasswordDigest, Player, PlayerDraft, ResourceName, ScoreView, UniqueName,
    format_score_date,
};

use super::ApiResult;
use super::hypermedia::{
    Profile, add_player, delete as delete_control, edit, entry_href, games_all, player_href,
    player_schema, player_segment, players_href, score_href, scores_by, scores_by_href,
};
use super::mason::{Control, MasonDocument};
use super::schemas::{MasonDocumentSchema, MasonErrorSchema};
use super::state::HttpState;
use super::validation::{FieldName, parse_field, required};

const NAME: FieldName = FieldName::new("name");
const UNIQUE_NAME: FieldName = FieldName::new("unique_name");
const PASSWORD: FieldName = FieldName::new("password");

/// Body of player create and edit requests.
///
/// `unique_name` defaults to `name` lowercased with spaces turned into
/// underscores.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PlayerRequest {
    #[schema(example = "Ada L")]
    pub name: Option<String>,
    #[schema(example = "ada_l")]
    pub unique_name: Option<String>,
    /// MD5 digest of the player's password.
    #[schema(example = "0cc175b9c0f1b6a831c399e269772661")]
    pub password: Option<String>,
}

impl TryFrom<PlayerRequest> for PlayerDraft {
    type Error = Error;

    fn try_from(value: PlayerRequest) -> Result<Self, Self::Error> {
        let name = required(value.name, NAME)?;
        let name = parse_field(&name, NAME, |v| ResourceName::new(v))?;
        let unique_name = match value.unique_name.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_field(raw, UNIQUE_NAME, |v| UniqueName::new(v))?),
        };
        let password = required(value.password, PASSWORD)?;
        let password = parse_field(&password, PASSWORD, |v| PasswordDigest::new(v))?;
        Ok(Self::new(name, unique_name, password))
    }
}

fn player_fields(player: &Player) -> MasonDocument {
    MasonDocument::new()
        .field("name", player.name.as_str())
        .field("unique_name", player.unique_name.as_str())
}

fn score_entry(score: &ScoreView) -> MasonDocument {
    MasonDocument::new()
        .field("game", score.game.as_str())
        .field("level", score.level.as_str())
        .field("value", score.value)
        .field("type", score.kind.as_str())
        .field("date", format_score_date(&score.date))
        .control(
            "self",
            Control::new(score_href(&score.game, &score.level, &score.player)),
        )
        .control("profile", Profile::Score.control())
}

/// List every player.
#[utoipa::path(
    get,
    path = "/api/players/",
    responses(
        (status = 200, description = "Player collection", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 503, description = "Database unavailable", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "listPlayers"
)]
#[get("/players/")]
pub async fn list_players(state: web::Data<HttpState>) -> ApiResult<MasonDocument> {
    let players = state.players_query.list_players().await?;
    let items = players.iter().map(|player| {
        player_fields(player)
            .control("self", Control::new(player_href(&player.unique_name)))
            .control("profile", Profile::Player.control())
    });
    Ok(MasonDocument::new()
        .with_namespace()
        .control("self", Control::new(players_href()))
        .control("up", Control::new(entry_href()).title("API entry point"))
        .control("gss:games-all", games_all())
        .control("gss:add-player", add_player())
        .items(items))
}

/// Register a player.
#[utoipa::path(
    post,
    path = "/api/players/",
    request_body = PlayerRequest,
    responses(
        (status = 201, description = "Player created", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 409, description = "Unique name taken", body = MasonErrorSchema),
        (status = 415, description = "Body is not JSON", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "createPlayer"
)]
#[post("/players/")]
pub async fn create_player(
    state: web::Data<HttpState>,
    payload: web::Json<PlayerRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PlayerDraft::try_from(payload.into_inner())?;
    let player = state.players.create_player(draft).await?;
    debug!(player = %player.unique_name, "player registered");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, player_href(&player.unique_name)))
        .finish())
}

/// Fetch a player.
#[utoipa::path(
    get,
    path = "/api/players/{player}/",
    params(("player" = String, Path, description = "Player's unique name")),
    responses(
        (status = 200, description = "Player", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 404, description = "Unknown player", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "getPlayer"
)]
#[get("/players/{player}/")]
pub async fn get_player(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<MasonDocument> {
    let unique_name = player_segment(&path)?;
    let player = state.players_query.player(&unique_name).await?;
    let href = player_href(&player.unique_name);
    Ok(player_fields(&player)
        .with_namespace()
        .control("self", Control::new(href.clone()))
        .control("profile", Profile::Player.control())
        .control("collection", Control::new(players_href()))
        .control("gss:scores-by", scores_by(&player.unique_name))
        .control("edit", edit(href.clone(), "Edit this player", player_schema()))
        .control("gss:delete", delete_control(href)))
}

/// Replace a player. Changing the unique name moves the resource.
#[utoipa::path(
    put,
    path = "/api/players/{player}/",
    params(("player" = String, Path, description = "Player's unique name")),
    request_body = PlayerRequest,
    responses(
        (status = 204, description = "Player updated"),
        (status = 301, description = "Player renamed", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 404, description = "Unknown player", body = MasonErrorSchema),
        (status = 409, description = "Unique name taken", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "replacePlayer"
)]
#[put("/players/{player}/")]
pub async fn replace_player(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PlayerRequest>,
) -> ApiResult<HttpResponse> {
    let current = player_segment(&path)?;
    let draft = PlayerDraft::try_from(payload.into_inner())?;
    let player = state.players.replace_player(&current, draft).await?;
    if player.unique_name == current {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::MovedPermanently()
            .insert_header((LOCATION, player_href(&player.unique_name)))
            .finish())
    }
}

/// Delete a player and every score they hold.
#[utoipa::path(
    delete,
    path = "/api/players/{player}/",
    params(("player" = String, Path, description = "Player's unique name")),
    responses(
        (status = 204, description = "Player deleted"),
        (status = 404, description = "Unknown player", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "deletePlayer"
)]
#[delete("/players/{player}/")]
pub async fn delete_player(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let unique_name = player_segment(&path)?;
    state.players.delete_player(&unique_name).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the scores a player holds across every game.
#[utoipa::path(
    get,
    path = "/api/players/{player}/scores/",
    params(("player" = String, Path, description = "Player's unique name")),
    responses(
        (status = 200, description = "Scores by the player", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 404, description = "Unknown player", body = MasonErrorSchema)
    ),
    tags = ["players"],
    operation_id = "listScoresBy"
)]
#[get("/players/{player}/scores/")]
pub async fn list_scores_by(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<MasonDocument> {
    let unique_name = player_segment(&path)?;
    let scores = state.scores_query.scores_by(&unique_name).await?;
    Ok(MasonDocument::new()
        .with_namespace()
        .control("self", Control::new(scores_by_href(&unique_name)))
        .control("author", Control::new(player_href(&unique_name)))
        .items(scores.iter().map(score_entry)))
}

#[cfg(test)]
#[path = "players_tests.rs"]
mod tests;
