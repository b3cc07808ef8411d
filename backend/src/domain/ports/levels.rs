//! Driving ports for level use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Level, LevelDraft, ResourceName};

/// Read-side level use-cases. Unknown games and levels yield `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LevelsQuery: Send + Sync {
    /// Levels of a game, oldest first.
    async fn levels(&self, game: &ResourceName) -> Result<Vec<Level>, Error>;

    /// A single level of a game.
    async fn level(&self, game: &ResourceName, level: &ResourceName) -> Result<Level, Error>;
}

/// Write-side level use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LevelsCommand: Send + Sync {
    /// Add a level to a game. Fails with `conflict` when the game already has
    /// a level with the same name.
    async fn create_level(&self, game: &ResourceName, draft: LevelDraft) -> Result<Level, Error>;

    /// Replace every field of an existing level.
    async fn replace_level(
        &self,
        game: &ResourceName,
        level: &ResourceName,
        draft: LevelDraft,
    ) -> Result<Level, Error>;

    /// Delete a level and its scores.
    async fn delete_level(&self, game: &ResourceName, level: &ResourceName) -> Result<(), Error>;
}
