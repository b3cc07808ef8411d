//! PostgreSQL-backed `GameRepository` using Diesel.
//!
//! Deleting a game relies on `ON DELETE CASCADE` to remove its levels and
//! their scores in the same statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{GameRepository, GameRepositoryError};
use crate::domain::{Game, GameDraft, ResourceName};

use super::diesel_error_mapping::{DbFailure, classify};
use super::models::{GameFields, GameRow};
use super::pool::{DbPool, PoolError};
use super::schema::games;

/// Diesel implementation of [`GameRepository`].
#[derive(Clone)]
pub struct DieselGameRepository {
    pool: DbPool,
}

impl DieselGameRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> GameRepositoryError {
    GameRepositoryError::connection(error.into_message())
}

fn map_write_error(error: diesel::result::Error, name: &ResourceName) -> GameRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => GameRepositoryError::connection(message),
        DbFailure::UniqueViolation { .. } => GameRepositoryError::duplicate(name.as_str()),
        other => GameRepositoryError::query(other.into_message()),
    }
}

fn map_read_error(error: diesel::result::Error) -> GameRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => GameRepositoryError::connection(message),
        other => GameRepositoryError::query(other.into_message()),
    }
}

fn map_row(row: GameRow) -> Result<Game, GameRepositoryError> {
    Game::try_from(row)
        .map_err(|err| GameRepositoryError::query(format!("stored game is invalid: {err}")))
}

#[async_trait]
impl GameRepository for DieselGameRepository {
    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<GameRow> = games::table
            .order(games::id.asc())
            .select(GameRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(map_row).collect()
    }

    async fn find(&self, name: &ResourceName) -> Result<Option<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GameRow> = games::table
            .filter(games::name.eq(name.as_str()))
            .select(GameRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(map_row).transpose()
    }

    async fn insert(&self, draft: &GameDraft) -> Result<Game, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: GameRow = diesel::insert_into(games::table)
            .values(GameFields::from(draft))
            .returning(GameRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &draft.name))?;
        map_row(row)
    }

    async fn replace(
        &self,
        current: &ResourceName,
        draft: &GameDraft,
    ) -> Result<Option<Game>, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<GameRow> =
            diesel::update(games::table.filter(games::name.eq(current.as_str())))
                .set(GameFields::from(draft))
                .returning(GameRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_write_error(err, &draft.name))?;
        row.map(map_row).transpose()
    }

    async fn delete(&self, name: &ResourceName) -> Result<bool, GameRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(games::table.filter(games::name.eq(name.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(removed > 0)
    }
}
