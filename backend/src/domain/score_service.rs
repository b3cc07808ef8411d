//! Score use-cases: leaderboards, per-player listings and authenticated
//! submissions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::level_service::LevelService;
use crate::domain::player_service::player_not_found;
use crate::domain::ports::{
    GameRepository, LevelRepository, LevelsQuery, PlayerRepository, PlayerRepositoryError,
    ScoreKey, ScoreRepository, ScoreRepositoryError, ScoresCommand, ScoresQuery,
};
use crate::domain::{
    Error, Level, Player, ResourceName, Score, ScoreDraft, ScoreSubmission, ScoreView, UniqueName,
};

/// Implements [`ScoresQuery`] and [`ScoresCommand`].
#[derive(Clone)]
pub struct ScoreService<G, L, P, S> {
    levels: LevelService<G, L>,
    players: Arc<P>,
    scores: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<G, L, P, S> ScoreService<G, L, P, S> {
    pub fn new(
        levels: LevelService<G, L>,
        players: Arc<P>,
        scores: Arc<S>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            levels,
            players,
            scores,
            clock,
        }
    }
}

fn score_not_found() -> Error {
    Error::not_found("Score wasn't found.")
}

fn map_score_error(error: ScoreRepositoryError) -> Error {
    match error {
        ScoreRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("score repository unavailable: {message}"))
        }
        ScoreRepositoryError::Query { message } => {
            Error::internal(format!("score repository error: {message}"))
        }
        ScoreRepositoryError::Duplicate => Error::conflict("Score already exists."),
        ScoreRepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

fn map_player_lookup_error(error: PlayerRepositoryError) -> Error {
    match error {
        PlayerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("player repository unavailable: {message}"))
        }
        other => Error::internal(format!("player repository error: {other}")),
    }
}

fn view_of(game: &ResourceName, level: &Level, player: &Player, score: Score) -> ScoreView {
    ScoreView {
        id: score.id,
        game: game.clone(),
        level: level.name.clone(),
        kind: level.kind,
        player_name: player.name.clone(),
        player: player.unique_name.clone(),
        value: score.value,
        date: score.date,
    }
}

impl<G, L, P, S> ScoreService<G, L, P, S>
where
    G: GameRepository,
    L: LevelRepository,
    P: PlayerRepository,
    S: ScoreRepository,
{
    async fn player(&self, unique_name: &UniqueName) -> Result<Player, Error> {
        self.players
            .find(unique_name)
            .await
            .map_err(map_player_lookup_error)?
            .ok_or_else(|| player_not_found(unique_name))
    }

    async fn existing(&self, key: &ScoreKey) -> Result<(Level, ScoreView), Error> {
        let level = self.levels.level(&key.game, &key.level).await?;
        let Some(owner) = self
            .players
            .find(&key.player)
            .await
            .map_err(map_player_lookup_error)?
        else {
            return Err(score_not_found());
        };
        let view = self
            .scores
            .find(level.id, owner.id)
            .await
            .map_err(map_score_error)?
            .ok_or_else(score_not_found)?;
        Ok((level, view))
    }

    fn authenticate(player: &Player, submission: &ScoreSubmission) -> Result<(), Error> {
        if player.password.verify(&submission.password) {
            Ok(())
        } else {
            warn!(player = %player.unique_name, "score rejected: password mismatch");
            Err(Error::unauthorized("Invalid password."))
        }
    }
}

#[async_trait]
impl<G, L, P, S> ScoresQuery for ScoreService<G, L, P, S>
where
    G: GameRepository,
    L: LevelRepository,
    P: PlayerRepository,
    S: ScoreRepository,
{
    async fn leaderboard(
        &self,
        game: &ResourceName,
        level: &ResourceName,
    ) -> Result<Vec<ScoreView>, Error> {
        let level = self.levels.level(game, level).await?;
        let mut scores = self
            .scores
            .list_for_level(level.id)
            .await
            .map_err(map_score_error)?;
        level.order.rank(&mut scores);
        Ok(scores)
    }

    async fn scores_by(&self, player: &UniqueName) -> Result<Vec<ScoreView>, Error> {
        let player = self.player(player).await?;
        self.scores
            .list_for_player(player.id)
            .await
            .map_err(map_score_error)
    }

    async fn score(&self, key: &ScoreKey) -> Result<ScoreView, Error> {
        self.existing(key).await.map(|(_, view)| view)
    }
}

#[async_trait]
impl<G, L, P, S> ScoresCommand for ScoreService<G, L, P, S>
where
    G: GameRepository,
    L: LevelRepository,
    P: PlayerRepository,
    S: ScoreRepository,
{
    async fn submit_score(
        &self,
        game: &ResourceName,
        level: &ResourceName,
        submission: ScoreSubmission,
    ) -> Result<ScoreView, Error> {
        let level = self.levels.level(game, level).await?;
        let player = self.player(&submission.player).await?;
        Self::authenticate(&player, &submission)?;

        let draft = ScoreDraft {
            level_id: level.id,
            player_id: player.id,
            value: submission.value,
            date: submission
                .date
                .unwrap_or_else(|| self.clock.utc().naive_utc()),
        };
        let score = self.scores.insert(&draft).await.map_err(map_score_error)?;
        info!(
            game = %game,
            level = %level.name,
            player = %player.unique_name,
            value = score.value,
            "score recorded"
        );
        Ok(view_of(game, &level, &player, score))
    }

    async fn replace_score(
        &self,
        key: &ScoreKey,
        submission: ScoreSubmission,
    ) -> Result<ScoreView, Error> {
        let (level, current) = self.existing(key).await?;
        let submitter = self.player(&submission.player).await?;
        if submitter.unique_name != key.player {
            return Err(Error::forbidden("Score owner cannot be changed."));
        }
        Self::authenticate(&submitter, &submission)?;

        let date = submission
            .date
            .unwrap_or_else(|| self.clock.utc().naive_utc());
        let score = self
            .scores
            .replace(current.id, submission.value, date)
            .await
            .map_err(map_score_error)?
            .ok_or_else(score_not_found)?;
        Ok(view_of(&key.game, &level, &submitter, score))
    }

    async fn delete_score(&self, key: &ScoreKey) -> Result<(), Error> {
        let (_, current) = self.existing(key).await?;
        if self
            .scores
            .delete(current.id)
            .await
            .map_err(map_score_error)?
        {
            info!(game = %key.game, level = %key.level, player = %key.player, "score deleted");
            Ok(())
        } else {
            Err(score_not_found())
        }
    }
}

#[cfg(test)]
#[path = "score_service_tests.rs"]
mod tests;
