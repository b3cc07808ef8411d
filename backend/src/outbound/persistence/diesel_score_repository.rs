//! PostgreSQL-backed `ScoreRepository` using Diesel.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ScoreRepository, ScoreRepositoryError};
use crate::domain::{LevelId, PlayerId, Score, ScoreDraft, ScoreId, ScoreView};

use super::diesel_error_mapping::{DbFailure, classify};
use super::models::{NewScoreRow, ScoreRow, ScoreViewRow, score_view};
use super::pool::{DbPool, PoolError};
use super::schema::{games, levels, players, scores};

/// Scores joined with the names needed to build a [`ScoreView`].
macro_rules! score_views {
    () => {
        scores::table
            .inner_join(levels::table.inner_join(games::table))
            .inner_join(players::table)
            .select((
                ScoreRow::as_select(),
                levels::name,
                levels::score_type,
                games::name,
                players::name,
                players::unique_name,
            ))
    };
}

/// Diesel implementation of [`ScoreRepository`].
#[derive(Clone)]
pub struct DieselScoreRepository {
    pool: DbPool,
}

impl DieselScoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ScoreRepositoryError {
    ScoreRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ScoreRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => ScoreRepositoryError::connection(message),
        DbFailure::UniqueViolation { .. } => ScoreRepositoryError::duplicate(),
        DbFailure::ForeignKeyViolation { constraint } => {
            let message = match constraint.as_deref() {
                Some(name) if name.contains("player") => "Player wasn't found.",
                _ => "Level wasn't found.",
            };
            ScoreRepositoryError::missing_reference(message)
        }
        other => ScoreRepositoryError::query(other.into_message()),
    }
}

fn map_views(rows: Vec<ScoreViewRow>) -> Result<Vec<ScoreView>, ScoreRepositoryError> {
    rows.into_iter()
        .map(|row| {
            score_view(row).map_err(|err| {
                ScoreRepositoryError::query(format!("stored score is invalid: {err}"))
            })
        })
        .collect()
}

#[async_trait]
impl ScoreRepository for DieselScoreRepository {
    async fn list_for_level(
        &self,
        level_id: LevelId,
    ) -> Result<Vec<ScoreView>, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ScoreViewRow> = score_views!()
            .filter(scores::level_id.eq(level_id.0))
            .order(scores::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        map_views(rows)
    }

    async fn list_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<ScoreView>, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ScoreViewRow> = score_views!()
            .filter(scores::player_id.eq(player_id.0))
            .order(scores::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        map_views(rows)
    }

    async fn find(
        &self,
        level_id: LevelId,
        player_id: PlayerId,
    ) -> Result<Option<ScoreView>, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ScoreViewRow> = score_views!()
            .filter(scores::level_id.eq(level_id.0))
            .filter(scores::player_id.eq(player_id.0))
            .limit(1)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(map_views(rows)?.into_iter().next())
    }

    async fn insert(&self, draft: &ScoreDraft) -> Result<Score, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ScoreRow = diesel::insert_into(scores::table)
            .values(NewScoreRow {
                level_id: draft.level_id.0,
                player_id: draft.player_id.0,
                value: draft.value,
                recorded_at: draft.date,
            })
            .returning(ScoreRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn replace(
        &self,
        id: ScoreId,
        value: i64,
        date: NaiveDateTime,
    ) -> Result<Option<Score>, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ScoreRow> = diesel::update(scores::table.find(id.0))
            .set((scores::value.eq(value), scores::recorded_at.eq(date)))
            .returning(ScoreRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Score::from))
    }

    async fn delete(&self, id: ScoreId) -> Result<bool, ScoreRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(scores::table.find(id.0))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
