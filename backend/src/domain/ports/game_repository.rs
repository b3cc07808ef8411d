//! Port abstraction for game persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Game, GameDraft, ResourceName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by game repository adapters.
    pub enum GameRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "game repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "game repository query failed: {message}",
        /// Another game already uses the name.
        Duplicate { name: String } => "game '{name}' already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// All games ordered by identifier.
    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError>;

    /// Look up a game by name.
    async fn find(&self, name: &ResourceName) -> Result<Option<Game>, GameRepositoryError>;

    /// Insert a new game.
    async fn insert(&self, draft: &GameDraft) -> Result<Game, GameRepositoryError>;

    /// Overwrite every field of the game currently named `current`.
    ///
    /// Returns `Ok(None)` when no such game exists.
    async fn replace(
        &self,
        current: &ResourceName,
        draft: &GameDraft,
    ) -> Result<Option<Game>, GameRepositoryError>;

    /// Delete a game together with its levels and their scores.
    async fn delete(&self, name: &ResourceName) -> Result<bool, GameRepositoryError>;
}
