//! PostgreSQL-backed `LevelRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LevelRepository, LevelRepositoryError};
use crate::domain::{GameId, Level, LevelDraft, LevelId, ResourceName};

use super::diesel_error_mapping::{DbFailure, classify};
use super::models::{LevelChanges, LevelRow, NewLevelRow};
use super::pool::{DbPool, PoolError};
use super::schema::levels;

/// Diesel implementation of [`LevelRepository`].
#[derive(Clone)]
pub struct DieselLevelRepository {
    pool: DbPool,
}

impl DieselLevelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LevelRepositoryError {
    LevelRepositoryError::connection(error.into_message())
}

fn map_write_error(error: diesel::result::Error, name: &ResourceName) -> LevelRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => LevelRepositoryError::connection(message),
        DbFailure::UniqueViolation { .. } => LevelRepositoryError::duplicate(name.as_str()),
        DbFailure::ForeignKeyViolation { .. } => LevelRepositoryError::missing_game(),
        other => LevelRepositoryError::query(other.into_message()),
    }
}

fn map_read_error(error: diesel::result::Error) -> LevelRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => LevelRepositoryError::connection(message),
        other => LevelRepositoryError::query(other.into_message()),
    }
}

fn map_row(row: LevelRow) -> Result<Level, LevelRepositoryError> {
    Level::try_from(row)
        .map_err(|err| LevelRepositoryError::query(format!("stored level is invalid: {err}")))
}

#[async_trait]
impl LevelRepository for DieselLevelRepository {
    async fn list_for_game(&self, game_id: GameId) -> Result<Vec<Level>, LevelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LevelRow> = levels::table
            .filter(levels::game_id.eq(game_id.0))
            .order(levels::id.asc())
            .select(LevelRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(map_row).collect()
    }

    async fn find(
        &self,
        game_id: GameId,
        name: &ResourceName,
    ) -> Result<Option<Level>, LevelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LevelRow> = levels::table
            .filter(levels::game_id.eq(game_id.0))
            .filter(levels::name.eq(name.as_str()))
            .select(LevelRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(map_row).transpose()
    }

    async fn insert(
        &self,
        game_id: GameId,
        draft: &LevelDraft,
    ) -> Result<Level, LevelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: LevelRow = diesel::insert_into(levels::table)
            .values(NewLevelRow::new(game_id, draft))
            .returning(LevelRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &draft.name))?;
        map_row(row)
    }

    async fn replace(
        &self,
        id: LevelId,
        draft: &LevelDraft,
    ) -> Result<Option<Level>, LevelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LevelRow> = diesel::update(levels::table.find(id.0))
            .set(LevelChanges::from(draft))
            .returning(LevelRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, &draft.name))?;
        row.map(map_row).transpose()
    }

    async fn delete(&self, id: LevelId) -> Result<bool, LevelRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(levels::table.find(id.0))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(removed > 0)
    }
}
