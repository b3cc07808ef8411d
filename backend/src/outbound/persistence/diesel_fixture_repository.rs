//! PostgreSQL-backed `FixtureRepository` loading the sample dataset in one
//! transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{FixtureRepository, FixtureRepositoryError};
use crate::domain::{FixtureDataset, FixtureScore, FixtureSummary, GameId};

use super::diesel_error_mapping::{DbFailure, classify};
use super::models::{GameFields, NewLevelRow, NewScoreRow, PlayerFields};
use super::pool::{DbPool, PoolError};
use super::schema::{games, levels, players, scores};

/// Diesel implementation of [`FixtureRepository`].
#[derive(Clone)]
pub struct DieselFixtureRepository {
    pool: DbPool,
}

impl DieselFixtureRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FixtureRepositoryError {
    FixtureRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FixtureRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => FixtureRepositoryError::connection(message),
        DbFailure::UndefinedTable(_) => FixtureRepositoryError::schema_missing(),
        DbFailure::UniqueViolation { .. } => FixtureRepositoryError::not_empty(),
        other => FixtureRepositoryError::query(other.into_message()),
    }
}

async fn is_empty(conn: &mut AsyncPgConnection) -> Result<bool, diesel::result::Error> {
    let player_count: i64 = players::table.count().get_result(conn).await?;
    let game_count: i64 = games::table.count().get_result(conn).await?;
    Ok(player_count == 0 && game_count == 0)
}

/// A fixture score names a player the dataset did not insert.
#[derive(Debug, thiserror::Error)]
#[error("fixture score references unknown player '{0}'")]
struct UnknownFixturePlayer(String);

fn score_rows(
    player_ids: &HashMap<String, i32>,
    level_id: i32,
    scores: &[FixtureScore],
    recorded_at: NaiveDateTime,
) -> Result<Vec<NewScoreRow>, diesel::result::Error> {
    scores
        .iter()
        .map(|score| {
            let player_id = player_ids.get(score.player.as_str()).ok_or_else(|| {
                diesel::result::Error::QueryBuilderError(Box::new(UnknownFixturePlayer(
                    score.player.as_str().to_owned(),
                )))
            })?;
            Ok(NewScoreRow {
                level_id,
                player_id: *player_id,
                value: score.value,
                recorded_at,
            })
        })
        .collect()
}

async fn insert_all(
    conn: &mut AsyncPgConnection,
    dataset: &FixtureDataset,
    recorded_at: NaiveDateTime,
) -> Result<(), diesel::result::Error> {
    let player_rows: Vec<PlayerFields<'_>> =
        dataset.players.iter().map(PlayerFields::from).collect();
    let player_ids: HashMap<String, i32> = diesel::insert_into(players::table)
        .values(&player_rows)
        .returning((players::unique_name, players::id))
        .get_results::<(String, i32)>(conn)
        .await?
        .into_iter()
        .collect();

    for fixture in &dataset.games {
        let game_id: i32 = diesel::insert_into(games::table)
            .values(GameFields::from(&fixture.game))
            .returning(games::id)
            .get_result(conn)
            .await?;
        for entry in &fixture.levels {
            let level_id: i32 = diesel::insert_into(levels::table)
                .values(NewLevelRow::new(GameId(game_id), &entry.level))
                .returning(levels::id)
                .get_result(conn)
                .await?;
            let score_rows = score_rows(&player_ids, level_id, &entry.scores, recorded_at)?;
            diesel::insert_into(scores::table)
                .values(&score_rows)
                .execute(conn)
                .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl FixtureRepository for DieselFixtureRepository {
    async fn populate(
        &self,
        dataset: &FixtureDataset,
        recorded_at: NaiveDateTime,
    ) -> Result<FixtureSummary, FixtureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let written = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    if !is_empty(conn).await? {
                        return Ok(false);
                    }
                    insert_all(conn, dataset, recorded_at).await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if written {
            Ok(dataset.summary())
        } else {
            Err(FixtureRepositoryError::not_empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UniqueName;
    use crate::test_support::fixture_timestamp;
    use rstest::rstest;

    fn score(player: &str, value: i64) -> FixtureScore {
        FixtureScore {
            player: UniqueName::new(player).expect("unique name"),
            value,
        }
    }

    #[rstest]
    fn score_rows_resolve_every_player() {
        let ids = HashMap::from([("player_1".to_owned(), 7), ("player_2".to_owned(), 8)]);
        let rows = score_rows(
            &ids,
            3,
            &[score("player_1", 100), score("player_2", 200)],
            fixture_timestamp(),
        )
        .expect("rows");

        let summary: Vec<_> = rows.iter().map(|r| (r.level_id, r.player_id, r.value)).collect();
        assert_eq!(summary, vec![(3, 7, 100), (3, 8, 200)]);
    }

    #[rstest]
    fn unknown_fixture_player_aborts_the_load() {
        let ids = HashMap::from([("player_1".to_owned(), 7)]);
        let err = score_rows(
            &ids,
            3,
            &[score("player_1", 100), score("ghost", 200)],
            fixture_timestamp(),
        )
        .expect_err("ghost is not inserted");

        assert_eq!(
            map_diesel_error(err),
            FixtureRepositoryError::query("fixture score references unknown player 'ghost'")
        );
    }
}
