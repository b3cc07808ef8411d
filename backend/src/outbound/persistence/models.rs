//! Diesel row structs and their conversions into domain types.
//!
//! Rows are re-validated on the way out so a hand-edited database cannot
//! smuggle invalid names into responses.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    FieldError, Game, GameDraft, GameId, Label, Level, LevelDraft, LevelId, PasswordDigest,
    Player, PlayerDraft, PlayerId, ResourceName, Score, ScoreId, ScoreView, UniqueName,
};

use super::schema::{games, levels, players, scores};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = players)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlayerRow {
    pub id: i32,
    pub name: String,
    pub unique_name: String,
    pub password: String,
}

/// Insert and full-replace changeset for players.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = players)]
pub(crate) struct PlayerFields<'a> {
    pub name: &'a str,
    pub unique_name: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a PlayerDraft> for PlayerFields<'a> {
    fn from(draft: &'a PlayerDraft) -> Self {
        Self {
            name: draft.name.as_str(),
            unique_name: draft.unique_name.as_str(),
            password: draft.password.as_str(),
        }
    }
}

impl TryFrom<PlayerRow> for Player {
    type Error = FieldError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PlayerId(row.id),
            name: ResourceName::new(row.name)?,
            unique_name: UniqueName::new(row.unique_name)?,
            password: PasswordDigest::new(row.password)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = games)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GameRow {
    pub id: i32,
    pub name: String,
    pub publisher: Option<String>,
    pub genre: Option<String>,
}

/// Insert and full-replace changeset for games. Absent labels are written
/// as `NULL` rather than skipped.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = games)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct GameFields<'a> {
    pub name: &'a str,
    pub publisher: Option<&'a str>,
    pub genre: Option<&'a str>,
}

impl<'a> From<&'a GameDraft> for GameFields<'a> {
    fn from(draft: &'a GameDraft) -> Self {
        Self {
            name: draft.name.as_str(),
            publisher: draft.publisher.as_ref().map(Label::as_str),
            genre: draft.genre.as_ref().map(Label::as_str),
        }
    }
}

impl TryFrom<GameRow> for Game {
    type Error = FieldError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: GameId(row.id),
            name: ResourceName::new(row.name)?,
            publisher: Label::parse_optional(row.publisher)?,
            genre: Label::parse_optional(row.genre)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = levels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LevelRow {
    pub id: i32,
    pub game_id: i32,
    pub name: String,
    pub score_type: String,
    pub score_order: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = levels)]
pub(crate) struct NewLevelRow<'a> {
    pub game_id: i32,
    pub name: &'a str,
    pub score_type: &'static str,
    pub score_order: &'static str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = levels)]
pub(crate) struct LevelChanges<'a> {
    pub name: &'a str,
    pub score_type: &'static str,
    pub score_order: &'static str,
}

impl<'a> NewLevelRow<'a> {
    pub fn new(game_id: GameId, draft: &'a LevelDraft) -> Self {
        Self {
            game_id: game_id.0,
            name: draft.name.as_str(),
            score_type: draft.kind.as_str(),
            score_order: draft.order.as_str(),
        }
    }
}

impl<'a> From<&'a LevelDraft> for LevelChanges<'a> {
    fn from(draft: &'a LevelDraft) -> Self {
        Self {
            name: draft.name.as_str(),
            score_type: draft.kind.as_str(),
            score_order: draft.order.as_str(),
        }
    }
}

impl TryFrom<LevelRow> for Level {
    type Error = FieldError;

    fn try_from(row: LevelRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LevelId(row.id),
            game_id: GameId(row.game_id),
            name: ResourceName::new(row.name)?,
            kind: row.score_type.parse()?,
            order: row.score_order.parse()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ScoreRow {
    pub id: i32,
    pub level_id: i32,
    pub player_id: i32,
    pub value: i64,
    pub recorded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = scores)]
pub(crate) struct NewScoreRow {
    pub level_id: i32,
    pub player_id: i32,
    pub value: i64,
    pub recorded_at: NaiveDateTime,
}

impl From<ScoreRow> for Score {
    fn from(row: ScoreRow) -> Self {
        Self {
            id: ScoreId(row.id),
            level_id: LevelId(row.level_id),
            player_id: PlayerId(row.player_id),
            value: row.value,
            date: row.recorded_at,
        }
    }
}

/// Score joined with level, game and player columns:
/// `(score, level name, score type, game name, player name, unique name)`.
pub(crate) type ScoreViewRow = (ScoreRow, String, String, String, String, String);

pub(crate) fn score_view(row: ScoreViewRow) -> Result<ScoreView, FieldError> {
    let (score, level, score_type, game, player_name, player) = row;
    Ok(ScoreView {
        id: ScoreId(score.id),
        game: ResourceName::new(game)?,
        level: ResourceName::new(level)?,
        kind: score_type.parse()?,
        player_name: ResourceName::new(player_name)?,
        player: UniqueName::new(player)?,
        value: score.value,
        date: score.recorded_at,
    })
}
