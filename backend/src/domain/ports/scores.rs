//! Driving ports for score use-cases.

use async_trait::async_trait;

use crate::domain::{Error, ResourceName, ScoreSubmission, ScoreView, UniqueName};

/// Address of a single score: the level it was set on and its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreKey {
    pub game: ResourceName,
    pub level: ResourceName,
    pub player: UniqueName,
}

/// Read-side score use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoresQuery: Send + Sync {
    /// Leaderboard of a level, best score first.
    async fn leaderboard(
        &self,
        game: &ResourceName,
        level: &ResourceName,
    ) -> Result<Vec<ScoreView>, Error>;

    /// Every score a player holds, oldest first.
    async fn scores_by(&self, player: &UniqueName) -> Result<Vec<ScoreView>, Error>;

    /// A single score.
    async fn score(&self, key: &ScoreKey) -> Result<ScoreView, Error>;
}

/// Write-side score use-cases. Submissions carry the player's credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoresCommand: Send + Sync {
    /// Record a new score on a level.
    ///
    /// Fails with `not_found` for an unknown game, level or player, with
    /// `unauthorized` when the password does not match and with `conflict`
    /// when the player already has a score on the level.
    async fn submit_score(
        &self,
        game: &ResourceName,
        level: &ResourceName,
        submission: ScoreSubmission,
    ) -> Result<ScoreView, Error>;

    /// Replace the value and date of an existing score.
    ///
    /// Fails with `forbidden` when the submission names a different owner.
    async fn replace_score(
        &self,
        key: &ScoreKey,
        submission: ScoreSubmission,
    ) -> Result<ScoreView, Error>;

    /// Delete a score.
    async fn delete_score(&self, key: &ScoreKey) -> Result<(), Error>;
}
