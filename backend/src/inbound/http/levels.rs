//! Level resources. A level item doubles as its leaderboard.
//!
//! ```text
//! GET    /api/games/{game}/{level}/
//! PUT    /api/games/{game}/{level}/   {"name":"Level 1","type":"time","order":"ascending"}
//! POST   /api/games/{game}/{level}/   {"player":"ada_l","password":"<md5>","value":1200}
//! DELETE /api/games/{game}/{level}/
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, LevelDraft, ResourceName, ScoreKind, ScoreOrder, ScoreSubmission, ScoreView,
    format_score_date,
};

use super::ApiResult;
use super::hypermedia::{
    Profile, add_score, delete as delete_control, edit, game_href, game_segment, level_href,
    level_schema, level_segment, score_href,
};
use super::mason::{Control, MasonDocument};
use super::schemas::{MasonDocumentSchema, MasonErrorSchema};
use super::scores::ScoreRequest;
use super::state::HttpState;
use super::validation::{FieldName, parse_field, required};

const NAME: FieldName = FieldName::new("name");
const TYPE: FieldName = FieldName::new("type");
const ORDER: FieldName = FieldName::new("order");

/// Body of level create and edit requests.
///
/// `type` defaults to `number` and `order` to `descending`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LevelRequest {
    #[schema(example = "Level 1")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "number")]
    pub kind: Option<String>,
    #[schema(example = "descending")]
    pub order: Option<String>,
}

impl TryFrom<LevelRequest> for LevelDraft {
    type Error = Error;

    fn try_from(value: LevelRequest) -> Result<Self, Self::Error> {
        let name = required(value.name, NAME)?;
        let kind = match value.kind.as_deref() {
            None => ScoreKind::default(),
            Some(raw) => parse_field(raw, TYPE, str::parse)?,
        };
        let order = match value.order.as_deref() {
            None => ScoreOrder::default(),
            Some(raw) => parse_field(raw, ORDER, str::parse)?,
        };
        Ok(Self {
            name: parse_field(&name, NAME, |v| ResourceName::new(v))?,
            kind,
            order,
        })
    }
}

fn leaderboard_entry(score: &ScoreView) -> MasonDocument {
    MasonDocument::new()
        .field("player", score.player_name.as_str())
        .field("value", score.value)
        .field("date", format_score_date(&score.date))
        .control(
            "self",
            Control::new(score_href(&score.game, &score.level, &score.player)),
        )
        .control("profile", Profile::Score.control())
}

/// Fetch a level with its scores, best first.
#[utoipa::path(
    get,
    path = "/api/games/{game}/{level}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name")
    ),
    responses(
        (status = 200, description = "Level and its leaderboard", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 404, description = "Unknown game or level", body = MasonErrorSchema)
    ),
    tags = ["levels"],
    operation_id = "getLevel"
)]
#[get("/games/{game}/{level}/")]
pub async fn get_level(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<MasonDocument> {
    let (game, level) = path.into_inner();
    let game = game_segment(&game)?;
    let level = level_segment(&level)?;
    let found = state.levels_query.level(&game, &level).await?;
    let scores = state.scores_query.leaderboard(&game, &found.name).await?;
    let href = level_href(&game, &found.name);
    Ok(MasonDocument::new()
        .field("name", found.name.as_str())
        .field("type", found.kind.as_str())
        .field("order", found.order.as_str())
        .with_namespace()
        .control("self", Control::new(href.clone()))
        .control("profile", Profile::Level.control())
        .control("up", Control::new(game_href(&game)))
        .control("gss:add-score", add_score(&game, &found.name))
        .control("edit", edit(href.clone(), "Edit this level", level_schema()))
        .control("gss:delete", delete_control(href))
        .items(scores.iter().map(leaderboard_entry)))
}

/// Replace a level. Renaming moves the resource.
#[utoipa::path(
    put,
    path = "/api/games/{game}/{level}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name")
    ),
    request_body = LevelRequest,
    responses(
        (status = 204, description = "Level updated"),
        (status = 301, description = "Level renamed", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 404, description = "Unknown game or level", body = MasonErrorSchema),
        (status = 409, description = "Level name taken in this game", body = MasonErrorSchema)
    ),
    tags = ["levels"],
    operation_id = "replaceLevel"
)]
#[put("/games/{game}/{level}/")]
pub async fn replace_level(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<LevelRequest>,
) -> ApiResult<HttpResponse> {
    let (game, level) = path.into_inner();
    let game = game_segment(&game)?;
    let current = level_segment(&level)?;
    let draft = LevelDraft::try_from(payload.into_inner())?;
    let level = state.levels.replace_level(&game, &current, draft).await?;
    if level.name == current {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::MovedPermanently()
            .insert_header((LOCATION, level_href(&game, &level.name)))
            .finish())
    }
}

/// Submit a score on a level on behalf of a player.
#[utoipa::path(
    post,
    path = "/api/games/{game}/{level}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name")
    ),
    request_body = ScoreRequest,
    responses(
        (status = 201, description = "Score recorded", headers(("Location" = String))),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 401, description = "Password mismatch", body = MasonErrorSchema),
        (status = 404, description = "Unknown game, level or player", body = MasonErrorSchema),
        (status = 409, description = "Player already has a score here", body = MasonErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "submitScore"
)]
#[post("/games/{game}/{level}/")]
pub async fn submit_score(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<ScoreRequest>,
) -> ApiResult<HttpResponse> {
    let (game, level) = path.into_inner();
    let game = game_segment(&game)?;
    let level = level_segment(&level)?;
    let submission = ScoreSubmission::try_from(payload.into_inner())?;
    let score = state.scores.submit_score(&game, &level, submission).await?;
    debug!(game = %score.game, level = %score.level, player = %score.player, "score recorded");
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, score_href(&score.game, &score.level, &score.player)))
        .finish())
}

/// Delete a level and its scores.
#[utoipa::path(
    delete,
    path = "/api/games/{game}/{level}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name")
    ),
    responses(
        (status = 204, description = "Level deleted"),
        (status = 404, description = "Unknown game or level", body = MasonErrorSchema)
    ),
    tags = ["levels"],
    operation_id = "deleteLevel"
)]
#[delete("/games/{game}/{level}/")]
pub async fn delete_level(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (game, level) = path.into_inner();
    let game = game_segment(&game)?;
    let level = level_segment(&level)?;
    state.levels.delete_level(&game, &level).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "levels_tests.rs"]
mod tests;
