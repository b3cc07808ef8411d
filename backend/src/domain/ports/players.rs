//! Driving ports for player use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Player, PlayerDraft, UniqueName};

/// Read-side player use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayersQuery: Send + Sync {
    /// Every registered player, oldest first.
    async fn list_players(&self) -> Result<Vec<Player>, Error>;

    /// A single player, or `not_found`.
    async fn player(&self, unique_name: &UniqueName) -> Result<Player, Error>;
}

/// Write-side player use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayersCommand: Send + Sync {
    /// Register a player. Fails with `conflict` when the unique name is taken.
    async fn create_player(&self, draft: PlayerDraft) -> Result<Player, Error>;

    /// Replace every field of an existing player.
    ///
    /// Fails with `not_found` when `current` is unknown and with `conflict`
    /// when the new unique name belongs to another player.
    async fn replace_player(
        &self,
        current: &UniqueName,
        draft: PlayerDraft,
    ) -> Result<Player, Error>;

    /// Delete a player and their scores.
    async fn delete_player(&self, unique_name: &UniqueName) -> Result<(), Error>;
}
