//! Port abstraction for score persistence adapters and their errors.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::{LevelId, PlayerId, Score, ScoreDraft, ScoreId, ScoreView};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by score repository adapters.
    pub enum ScoreRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "score repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "score repository query failed: {message}",
        /// The player already has a score on the level.
        Duplicate => "score already exists",
        /// The level or the player disappeared before the write landed.
        MissingReference { message: String } => "score reference missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Scores recorded on a level, in no particular order.
    async fn list_for_level(&self, level_id: LevelId)
    -> Result<Vec<ScoreView>, ScoreRepositoryError>;

    /// Scores recorded by a player, ordered by identifier.
    async fn list_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<ScoreView>, ScoreRepositoryError>;

    /// The score a player holds on a level.
    async fn find(
        &self,
        level_id: LevelId,
        player_id: PlayerId,
    ) -> Result<Option<ScoreView>, ScoreRepositoryError>;

    /// Record a new score.
    async fn insert(&self, draft: &ScoreDraft) -> Result<Score, ScoreRepositoryError>;

    /// Overwrite the value and timestamp of a score.
    async fn replace(
        &self,
        id: ScoreId,
        value: i64,
        date: NaiveDateTime,
    ) -> Result<Option<Score>, ScoreRepositoryError>;

    /// Delete a score.
    async fn delete(&self, id: ScoreId) -> Result<bool, ScoreRepositoryError>;
}
