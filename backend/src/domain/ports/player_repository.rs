//! Port abstraction for player persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Player, PlayerDraft, UniqueName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by player repository adapters.
    pub enum PlayerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "player repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "player repository query failed: {message}",
        /// Another player already owns the unique name.
        Duplicate { unique_name: String } => "player '{unique_name}' already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// All players ordered by identifier.
    async fn list(&self) -> Result<Vec<Player>, PlayerRepositoryError>;

    /// Look up a player by unique name.
    async fn find(&self, unique_name: &UniqueName)
    -> Result<Option<Player>, PlayerRepositoryError>;

    /// Insert a new player.
    async fn insert(&self, draft: &PlayerDraft) -> Result<Player, PlayerRepositoryError>;

    /// Overwrite every field of the player currently known as `current`.
    ///
    /// Returns `Ok(None)` when no such player exists.
    async fn replace(
        &self,
        current: &UniqueName,
        draft: &PlayerDraft,
    ) -> Result<Option<Player>, PlayerRepositoryError>;

    /// Delete a player and, by cascade, their scores.
    ///
    /// Returns whether a row was removed.
    async fn delete(&self, unique_name: &UniqueName) -> Result<bool, PlayerRepositoryError>;
}
