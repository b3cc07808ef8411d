//! Score resources.
//!
//! ```text
//! GET    /api/games/{game}/{level}/{player}/
//! PUT    /api/games/{game}/{level}/{player}/  {"player":"ada_l","password":"<md5>","value":1300}
//! DELETE /api/games/{game}/{level}/{player}/
//! ```

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ScoreKey;
use crate::domain::{
    Error, PasswordDigest, ScoreSubmission, UniqueName, format_score_date, parse_score_date,
};

use super::ApiResult;
use super::hypermedia::{
    Profile, delete as delete_control, edit, game_segment, level_href, level_segment,
    player_href, player_segment, score_href, score_schema, scores_by,
};
use super::mason::{Control, MasonDocument};
use super::schemas::{MasonDocumentSchema, MasonErrorSchema};
use super::state::HttpState;
use super::validation::{FieldName, parse_field, required};

const VALUE: FieldName = FieldName::new("value");
const DATE: FieldName = FieldName::new("date");
const PLAYER: FieldName = FieldName::new("player");
const PASSWORD: FieldName = FieldName::new("password");

/// Body of score submit and edit requests.
///
/// An absent or empty `date` records the score at the current time.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ScoreRequest {
    #[schema(example = 1200)]
    pub value: Option<i64>,
    #[schema(example = "2024-08-15 21:22:23")]
    pub date: Option<String>,
    /// Unique name of the submitting player.
    #[schema(example = "ada_l")]
    pub player: Option<String>,
    /// MD5 digest of the submitting player's password.
    #[schema(example = "0cc175b9c0f1b6a831c399e269772661")]
    pub password: Option<String>,
}

impl TryFrom<ScoreRequest> for ScoreSubmission {
    type Error = Error;

    fn try_from(value: ScoreRequest) -> Result<Self, Self::Error> {
        let score = required(value.value, VALUE)?;
        let player = required(value.player, PLAYER)?;
        let password = required(value.password, PASSWORD)?;
        let date = match value.date.as_deref() {
            None => None,
            Some(raw) => parse_field(raw, DATE, |v| parse_score_date(Some(v)))?,
        };
        Ok(Self {
            player: parse_field(&player, PLAYER, |v| UniqueName::new(v))?,
            password: parse_field(&password, PASSWORD, |v| PasswordDigest::new(v))?,
            value: score,
            date,
        })
    }
}

fn score_key(path: web::Path<(String, String, String)>) -> Result<ScoreKey, Error> {
    let (game, level, player) = path.into_inner();
    Ok(ScoreKey {
        game: game_segment(&game)?,
        level: level_segment(&level)?,
        player: player_segment(&player)?,
    })
}

/// Fetch a single score.
#[utoipa::path(
    get,
    path = "/api/games/{game}/{level}/{player}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name"),
        ("player" = String, Path, description = "Unique name of the score's owner")
    ),
    responses(
        (status = 200, description = "Score", body = MasonDocumentSchema,
            content_type = "application/vnd.mason+json"),
        (status = 404, description = "Unknown score", body = MasonErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "getScore"
)]
#[get("/games/{game}/{level}/{player}/")]
pub async fn get_score(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<MasonDocument> {
    let key = score_key(path)?;
    let score = state.scores_query.score(&key).await?;
    let href = score_href(&score.game, &score.level, &score.player);
    Ok(MasonDocument::new()
        .field("name", score.player_name.as_str())
        .field("player", score.player.as_str())
        .field("value", score.value)
        .field("type", score.kind.as_str())
        .field("date", format_score_date(&score.date))
        .with_namespace()
        .control("self", Control::new(href.clone()))
        .control("profile", Profile::Score.control())
        .control("up", Control::new(level_href(&score.game, &score.level)))
        .control("author", Control::new(player_href(&score.player)))
        .control("gss:scores-by", scores_by(&score.player))
        .control("edit", edit(href.clone(), "Edit this score", score_schema()))
        .control("gss:delete", delete_control(href)))
}

/// Replace the value and date of a score. Only the owner may edit it.
#[utoipa::path(
    put,
    path = "/api/games/{game}/{level}/{player}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name"),
        ("player" = String, Path, description = "Unique name of the score's owner")
    ),
    request_body = ScoreRequest,
    responses(
        (status = 204, description = "Score updated"),
        (status = 400, description = "Invalid request", body = MasonErrorSchema),
        (status = 401, description = "Password mismatch", body = MasonErrorSchema),
        (status = 403, description = "Submitter is not the owner", body = MasonErrorSchema),
        (status = 404, description = "Unknown score or player", body = MasonErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "replaceScore"
)]
#[put("/games/{game}/{level}/{player}/")]
pub async fn replace_score(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
    payload: web::Json<ScoreRequest>,
) -> ApiResult<HttpResponse> {
    let key = score_key(path)?;
    let submission = ScoreSubmission::try_from(payload.into_inner())?;
    state.scores.replace_score(&key, submission).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a score.
#[utoipa::path(
    delete,
    path = "/api/games/{game}/{level}/{player}/",
    params(
        ("game" = String, Path, description = "Game name"),
        ("level" = String, Path, description = "Level name"),
        ("player" = String, Path, description = "Unique name of the score's owner")
    ),
    responses(
        (status = 204, description = "Score deleted"),
        (status = 404, description = "Unknown score", body = MasonErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "deleteScore"
)]
#[delete("/games/{game}/{level}/{player}/")]
pub async fn delete_score(
    state: web::Data<HttpState>,
    path: web::Path<(String, String, String)>,
) -> ApiResult<HttpResponse> {
    let key = score_key(path)?;
    state.scores.delete_score(&key).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "scores_tests.rs"]
mod tests;
