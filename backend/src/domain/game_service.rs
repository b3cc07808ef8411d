//! Game use-cases backed by a [`GameRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{GameRepository, GameRepositoryError, GamesCommand, GamesQuery};
use crate::domain::{Error, Game, GameDraft, ResourceName};

/// Implements [`GamesQuery`] and [`GamesCommand`].
#[derive(Clone)]
pub struct GameService<R> {
    repo: Arc<R>,
}

impl<R> GameService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn game_not_found(name: &ResourceName) -> Error {
    Error::not_found(format!("Game '{name}' wasn't found."))
}

pub(crate) fn map_game_error(error: GameRepositoryError) -> Error {
    match error {
        GameRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("game repository unavailable: {message}"))
        }
        GameRepositoryError::Query { message } => {
            Error::internal(format!("game repository error: {message}"))
        }
        GameRepositoryError::Duplicate { name } => {
            Error::conflict(format!("Game '{name}' already exists."))
        }
    }
}

#[async_trait]
impl<R> GamesQuery for GameService<R>
where
    R: GameRepository,
{
    async fn list_games(&self) -> Result<Vec<Game>, Error> {
        self.repo.list().await.map_err(map_game_error)
    }

    async fn game(&self, name: &ResourceName) -> Result<Game, Error> {
        self.repo
            .find(name)
            .await
            .map_err(map_game_error)?
            .ok_or_else(|| game_not_found(name))
    }
}

#[async_trait]
impl<R> GamesCommand for GameService<R>
where
    R: GameRepository,
{
    async fn create_game(&self, draft: GameDraft) -> Result<Game, Error> {
        let game = self.repo.insert(&draft).await.map_err(map_game_error)?;
        info!(game = %game.name, "game registered");
        Ok(game)
    }

    async fn replace_game(
        &self,
        current: &ResourceName,
        draft: GameDraft,
    ) -> Result<Game, Error> {
        self.repo
            .replace(current, &draft)
            .await
            .map_err(map_game_error)?
            .ok_or_else(|| game_not_found(current))
    }

    async fn delete_game(&self, name: &ResourceName) -> Result<(), Error> {
        if self.repo.delete(name).await.map_err(map_game_error)? {
            info!(game = %name, "game deleted");
            Ok(())
        } else {
            Err(game_not_found(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockGameRepository;
    use crate::domain::{ErrorCode, GameId, Label};
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> GameDraft {
        GameDraft {
            name: ResourceName::new("Pong").expect("name"),
            publisher: Some(Label::new("Atari").expect("label")),
            genre: None,
        }
    }

    fn service(repo: MockGameRepository) -> GameService<MockGameRepository> {
        GameService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_the_stored_game(draft: GameDraft) {
        let mut repo = MockGameRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|draft| Ok(Game::from_draft(GameId(1), draft.clone())));

        let game = service(repo).create_game(draft.clone()).await.expect("created");
        assert_eq!(game, Game::from_draft(GameId(1), draft));
    }

    #[rstest]
    #[tokio::test]
    async fn rename_collisions_are_conflicts(draft: GameDraft) {
        let mut repo = MockGameRepository::new();
        repo.expect_replace()
            .times(1)
            .return_once(|_, _| Err(GameRepositoryError::duplicate("Pong")));
        let current = ResourceName::new("Tennis").expect("name");

        let err = service(repo)
            .replace_game(&current, draft)
            .await
            .expect_err("conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_games_are_not_found() {
        let mut repo = MockGameRepository::new();
        repo.expect_find().times(1).return_once(|_| Ok(None));
        let name = ResourceName::new("Nope").expect("name");

        let err = service(repo).game(&name).await.expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Game 'Nope' wasn't found.");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_game_is_not_found() {
        let mut repo = MockGameRepository::new();
        repo.expect_delete().times(1).return_once(|_| Ok(false));
        let name = ResourceName::new("Nope").expect("name");

        let err = service(repo).delete_game(&name).await.expect_err("not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
