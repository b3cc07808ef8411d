//! Driving ports for game use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Game, GameDraft, ResourceName};

/// Read-side game use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamesQuery: Send + Sync {
    /// Every registered game, oldest first.
    async fn list_games(&self) -> Result<Vec<Game>, Error>;

    /// A single game, or `not_found`.
    async fn game(&self, name: &ResourceName) -> Result<Game, Error>;
}

/// Write-side game use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GamesCommand: Send + Sync {
    /// Register a game. Fails with `conflict` when the name is taken.
    async fn create_game(&self, draft: GameDraft) -> Result<Game, Error>;

    /// Replace every field of an existing game.
    async fn replace_game(&self, current: &ResourceName, draft: GameDraft)
    -> Result<Game, Error>;

    /// Delete a game together with its levels and scores.
    async fn delete_game(&self, name: &ResourceName) -> Result<(), Error>;
}
