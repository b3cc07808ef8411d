//! Port abstraction for level persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{GameId, Level, LevelDraft, LevelId, ResourceName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by level repository adapters.
    pub enum LevelRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "level repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "level repository query failed: {message}",
        /// The game already has a level with this name.
        Duplicate { name: String } => "level '{name}' already exists",
        /// The owning game disappeared before the write landed.
        MissingGame => "game no longer exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Levels of a game ordered by identifier.
    async fn list_for_game(&self, game_id: GameId) -> Result<Vec<Level>, LevelRepositoryError>;

    /// Look up a level by name within a game.
    async fn find(
        &self,
        game_id: GameId,
        name: &ResourceName,
    ) -> Result<Option<Level>, LevelRepositoryError>;

    /// Insert a new level into a game.
    async fn insert(
        &self,
        game_id: GameId,
        draft: &LevelDraft,
    ) -> Result<Level, LevelRepositoryError>;

    /// Overwrite every field of a level. Returns `Ok(None)` when it is gone.
    async fn replace(
        &self,
        id: LevelId,
        draft: &LevelDraft,
    ) -> Result<Option<Level>, LevelRepositoryError>;

    /// Delete a level and its scores.
    async fn delete(&self, id: LevelId) -> Result<bool, LevelRepositoryError>;
}
