//! Player use-cases backed by a [`PlayerRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{PlayerRepository, PlayerRepositoryError, PlayersCommand, PlayersQuery};
use crate::domain::{Error, Player, PlayerDraft, UniqueName};

/// Implements [`PlayersQuery`] and [`PlayersCommand`].
#[derive(Clone)]
pub struct PlayerService<R> {
    repo: Arc<R>,
}

impl<R> PlayerService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

pub(crate) fn player_not_found(unique_name: &UniqueName) -> Error {
    Error::not_found(format!("Player '{unique_name}' wasn't found."))
}

fn map_player_error(error: PlayerRepositoryError) -> Error {
    match error {
        PlayerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("player repository unavailable: {message}"))
        }
        PlayerRepositoryError::Query { message } => {
            Error::internal(format!("player repository error: {message}"))
        }
        PlayerRepositoryError::Duplicate { unique_name } => {
            Error::conflict(format!("Player '{unique_name}' already exists."))
        }
    }
}

#[async_trait]
impl<R> PlayersQuery for PlayerService<R>
where
    R: PlayerRepository,
{
    async fn list_players(&self) -> Result<Vec<Player>, Error> {
        self.repo.list().await.map_err(map_player_error)
    }

    async fn player(&self, unique_name: &UniqueName) -> Result<Player, Error> {
        self.repo
            .find(unique_name)
            .await
            .map_err(map_player_error)?
            .ok_or_else(|| player_not_found(unique_name))
    }
}

#[async_trait]
impl<R> PlayersCommand for PlayerService<R>
where
    R: PlayerRepository,
{
    async fn create_player(&self, draft: PlayerDraft) -> Result<Player, Error> {
        let player = self.repo.insert(&draft).await.map_err(map_player_error)?;
        info!(player = %player.unique_name, "player registered");
        Ok(player)
    }

    async fn replace_player(
        &self,
        current: &UniqueName,
        draft: PlayerDraft,
    ) -> Result<Player, Error> {
        self.repo
            .replace(current, &draft)
            .await
            .map_err(map_player_error)?
            .ok_or_else(|| player_not_found(current))
    }

    async fn delete_player(&self, unique_name: &UniqueName) -> Result<(), Error> {
        if self
            .repo
            .delete(unique_name)
            .await
            .map_err(map_player_error)?
        {
            info!(player = %unique_name, "player deleted");
            Ok(())
        } else {
            Err(player_not_found(unique_name))
        }
    }
}
