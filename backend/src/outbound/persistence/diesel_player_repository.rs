//! PostgreSQL-backed `PlayerRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PlayerRepository, PlayerRepositoryError};
use crate::domain::{FieldError, Player, PlayerDraft, UniqueName};

use super::diesel_error_mapping::{DbFailure, classify};
use super::models::{PlayerFields, PlayerRow};
use super::pool::{DbPool, PoolError};
use super::schema::players;

/// Diesel implementation of [`PlayerRepository`].
#[derive(Clone)]
pub struct DieselPlayerRepository {
    pool: DbPool,
}

impl DieselPlayerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PlayerRepositoryError {
    PlayerRepositoryError::connection(error.into_message())
}

fn map_write_error(
    error: diesel::result::Error,
    unique_name: &UniqueName,
) -> PlayerRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => PlayerRepositoryError::connection(message),
        DbFailure::UniqueViolation { .. } => {
            PlayerRepositoryError::duplicate(unique_name.as_str())
        }
        other => PlayerRepositoryError::query(other.into_message()),
    }
}

fn map_read_error(error: diesel::result::Error) -> PlayerRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => PlayerRepositoryError::connection(message),
        other => PlayerRepositoryError::query(other.into_message()),
    }
}

fn map_row(row: PlayerRow) -> Result<Player, PlayerRepositoryError> {
    Player::try_from(row).map_err(|err: FieldError| {
        PlayerRepositoryError::query(format!("stored player is invalid: {err}"))
    })
}

#[async_trait]
impl PlayerRepository for DieselPlayerRepository {
    async fn list(&self) -> Result<Vec<Player>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PlayerRow> = players::table
            .order(players::id.asc())
            .select(PlayerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;
        rows.into_iter().map(map_row).collect()
    }

    async fn find(
        &self,
        unique_name: &UniqueName,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlayerRow> = players::table
            .filter(players::unique_name.eq(unique_name.as_str()))
            .select(PlayerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;
        row.map(map_row).transpose()
    }

    async fn insert(&self, draft: &PlayerDraft) -> Result<Player, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PlayerRow = diesel::insert_into(players::table)
            .values(PlayerFields::from(draft))
            .returning(PlayerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &draft.unique_name))?;
        map_row(row)
    }

    async fn replace(
        &self,
        current: &UniqueName,
        draft: &PlayerDraft,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PlayerRow> =
            diesel::update(players::table.filter(players::unique_name.eq(current.as_str())))
                .set(PlayerFields::from(draft))
                .returning(PlayerRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| map_write_error(err, &draft.unique_name))?;
        row.map(map_row).transpose()
    }

    async fn delete(&self, unique_name: &UniqueName) -> Result<bool, PlayerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed =
            diesel::delete(players::table.filter(players::unique_name.eq(unique_name.as_str())))
                .execute(&mut conn)
                .await
                .map_err(map_read_error)?;
        Ok(removed > 0)
    }
}
