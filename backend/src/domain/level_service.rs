//! Level use-cases. Levels are addressed through their game, so every call
//! resolves the game first.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::game_service::{game_not_found, map_game_error};
use crate::domain::ports::{
    GameRepository, LevelRepository, LevelRepositoryError, LevelsCommand, LevelsQuery,
};
use crate::domain::{Error, Game, Level, LevelDraft, ResourceName};

/// Implements [`LevelsQuery`] and [`LevelsCommand`].
#[derive(Clone)]
pub struct LevelService<G, L> {
    games: Arc<G>,
    levels: Arc<L>,
}

impl<G, L> LevelService<G, L> {
    pub fn new(games: Arc<G>, levels: Arc<L>) -> Self {
        Self { games, levels }
    }
}

pub(crate) fn level_not_found(name: &ResourceName) -> Error {
    Error::not_found(format!("Level '{name}' wasn't found."))
}

pub(crate) fn map_level_error(error: LevelRepositoryError) -> Error {
    match error {
        LevelRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("level repository unavailable: {message}"))
        }
        LevelRepositoryError::Query { message } => {
            Error::internal(format!("level repository error: {message}"))
        }
        LevelRepositoryError::Duplicate { name } => {
            Error::conflict(format!("Level '{name}' already exists."))
        }
        LevelRepositoryError::MissingGame => Error::not_found("Game wasn't found."),
    }
}

impl<G, L> LevelService<G, L>
where
    G: GameRepository,
    L: LevelRepository,
{
    async fn resolve_game(&self, name: &ResourceName) -> Result<Game, Error> {
        self.games
            .find(name)
            .await
            .map_err(map_game_error)?
            .ok_or_else(|| game_not_found(name))
    }

    async fn resolve(&self, game: &ResourceName, level: &ResourceName) -> Result<Level, Error> {
        let game = self.resolve_game(game).await?;
        self.levels
            .find(game.id, level)
            .await
            .map_err(map_level_error)?
            .ok_or_else(|| level_not_found(level))
    }
}

#[async_trait]
impl<G, L> LevelsQuery for LevelService<G, L>
where
    G: GameRepository,
    L: LevelRepository,
{
    async fn levels(&self, game: &ResourceName) -> Result<Vec<Level>, Error> {
        let game = self.resolve_game(game).await?;
        self.levels
            .list_for_game(game.id)
            .await
            .map_err(map_level_error)
    }

    async fn level(&self, game: &ResourceName, level: &ResourceName) -> Result<Level, Error> {
        self.resolve(game, level).await
    }
}

#[async_trait]
impl<G, L> LevelsCommand for LevelService<G, L>
where
    G: GameRepository,
    L: LevelRepository,
{
    async fn create_level(&self, game: &ResourceName, draft: LevelDraft) -> Result<Level, Error> {
        let owner = self.resolve_game(game).await?;
        let level = self
            .levels
            .insert(owner.id, &draft)
            .await
            .map_err(map_level_error)?;
        info!(game = %game, level = %level.name, "level added");
        Ok(level)
    }

    async fn replace_level(
        &self,
        game: &ResourceName,
        level: &ResourceName,
        draft: LevelDraft,
    ) -> Result<Level, Error> {
        let current = self.resolve(game, level).await?;
        self.levels
            .replace(current.id, &draft)
            .await
            .map_err(map_level_error)?
            .ok_or_else(|| level_not_found(level))
    }

    async fn delete_level(&self, game: &ResourceName, level: &ResourceName) -> Result<(), Error> {
        let current = self.resolve(game, level).await?;
        if self
            .levels
            .delete(current.id)
            .await
            .map_err(map_level_error)?
        {
            info!(game = %game, level = %level, "level deleted");
            Ok(())
        } else {
            Err(level_not_found(level))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockGameRepository, MockLevelRepository};
    use crate::domain::{ErrorCode, GameDraft, GameId, LevelId, ScoreKind, ScoreOrder};
    use rstest::rstest;

    fn name(value: &str) -> ResourceName {
        ResourceName::new(value).expect("valid name")
    }

    fn games_with(found: bool) -> MockGameRepository {
        let mut games = MockGameRepository::new();
        games.expect_find().returning(move |n| {
            Ok(found.then(|| {
                Game::from_draft(
                    GameId(3),
                    GameDraft {
                        name: n.clone(),
                        publisher: None,
                        genre: None,
                    },
                )
            }))
        });
        games
    }

    fn draft(level: &str) -> LevelDraft {
        LevelDraft {
            name: name(level),
            kind: ScoreKind::Time,
            order: ScoreOrder::Ascending,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn creating_in_an_unknown_game_is_not_found() {
        let mut levels = MockLevelRepository::new();
        levels.expect_insert().never();
        let service = LevelService::new(Arc::new(games_with(false)), Arc::new(levels));

        let err = service
            .create_level(&name("Nope"), draft("Level 1"))
            .await
            .expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn create_inserts_under_the_resolved_game() {
        let mut levels = MockLevelRepository::new();
        levels
            .expect_insert()
            .withf(|game_id, _| *game_id == GameId(3))
            .times(1)
            .returning(|game_id, draft| Ok(Level::from_draft(LevelId(5), game_id, draft.clone())));
        let service = LevelService::new(Arc::new(games_with(true)), Arc::new(levels));

        let level = service
            .create_level(&name("Game 1"), draft("Speedrun"))
            .await
            .expect("created");
        assert_eq!(level.kind, ScoreKind::Time);
        assert_eq!(level.order, ScoreOrder::Ascending);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_level_names_conflict() {
        let mut levels = MockLevelRepository::new();
        levels
            .expect_insert()
            .return_once(|_, _| Err(LevelRepositoryError::duplicate("Level 1")));
        let service = LevelService::new(Arc::new(games_with(true)), Arc::new(levels));

        let err = service
            .create_level(&name("Game 1"), draft("Level 1"))
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_levels_are_not_found() {
        let mut levels = MockLevelRepository::new();
        levels.expect_find().return_once(|_, _| Ok(None));
        levels.expect_delete().never();
        let service = LevelService::new(Arc::new(games_with(true)), Arc::new(levels));

        let err = service
            .delete_level(&name("Game 1"), &name("Level 9"))
            .await
            .expect_err("not found");
        assert_eq!(err.message(), "Level 'Level 9' wasn't found.");
    }
}
