//! In-memory implementation of every repository port.
//!
//! Mirrors the database constraints the Diesel adapters rely on: unique
//! natural keys, foreign keys and cascading deletes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::ports::{
    FixtureRepository, FixtureRepositoryError, GameRepository, GameRepositoryError,
    LevelRepository, LevelRepositoryError, PlayerRepository, PlayerRepositoryError,
    ScoreRepository, ScoreRepositoryError,
};
use crate::domain::{
    FixtureDataset, FixtureSummary, Game, GameDraft, GameId, Level, LevelDraft, LevelId, Player,
    PlayerDraft, PlayerId, ResourceName, Score, ScoreDraft, ScoreId, ScoreView, UniqueName,
};

#[derive(Debug, Default)]
struct State {
    last_id: i32,
    players: Vec<Player>,
    games: Vec<Game>,
    levels: Vec<Level>,
    scores: Vec<Score>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn view(&self, score: &Score) -> Option<ScoreView> {
        let level = self.levels.iter().find(|l| l.id == score.level_id)?;
        let game = self.games.iter().find(|g| g.id == level.game_id)?;
        let player = self.players.iter().find(|p| p.id == score.player_id)?;
        Some(ScoreView {
            id: score.id,
            game: game.name.clone(),
            level: level.name.clone(),
            kind: level.kind,
            player_name: player.name.clone(),
            player: player.unique_name.clone(),
            value: score.value,
            date: score.date,
        })
    }

    fn views<F>(&self, keep: F) -> Vec<ScoreView>
    where
        F: Fn(&Score) -> bool,
    {
        self.scores
            .iter()
            .filter(|s| keep(s))
            .filter_map(|s| self.view(s))
            .collect()
    }

    fn insert_player(&mut self, draft: &PlayerDraft) -> Result<Player, PlayerRepositoryError> {
        if self
            .players
            .iter()
            .any(|p| p.unique_name == draft.unique_name)
        {
            return Err(PlayerRepositoryError::duplicate(draft.unique_name.as_str()));
        }
        let player = Player::from_draft(PlayerId(self.next_id()), draft.clone());
        self.players.push(player.clone());
        Ok(player)
    }

    fn insert_game(&mut self, draft: &GameDraft) -> Result<Game, GameRepositoryError> {
        if self.games.iter().any(|g| g.name == draft.name) {
            return Err(GameRepositoryError::duplicate(draft.name.as_str()));
        }
        let game = Game::from_draft(GameId(self.next_id()), draft.clone());
        self.games.push(game.clone());
        Ok(game)
    }

    fn insert_level(
        &mut self,
        game_id: GameId,
        draft: &LevelDraft,
    ) -> Result<Level, LevelRepositoryError> {
        if !self.games.iter().any(|g| g.id == game_id) {
            return Err(LevelRepositoryError::missing_game());
        }
        if self
            .levels
            .iter()
            .any(|l| l.game_id == game_id && l.name == draft.name)
        {
            return Err(LevelRepositoryError::duplicate(draft.name.as_str()));
        }
        let level = Level::from_draft(LevelId(self.next_id()), game_id, draft.clone());
        self.levels.push(level.clone());
        Ok(level)
    }

    fn insert_score(&mut self, draft: &ScoreDraft) -> Result<Score, ScoreRepositoryError> {
        if !self.levels.iter().any(|l| l.id == draft.level_id) {
            return Err(ScoreRepositoryError::missing_reference("Level wasn't found."));
        }
        if !self.players.iter().any(|p| p.id == draft.player_id) {
            return Err(ScoreRepositoryError::missing_reference("Player wasn't found."));
        }
        if self
            .scores
            .iter()
            .any(|s| s.level_id == draft.level_id && s.player_id == draft.player_id)
        {
            return Err(ScoreRepositoryError::duplicate());
        }
        let score = Score {
            id: ScoreId(self.next_id()),
            level_id: draft.level_id,
            player_id: draft.player_id,
            value: draft.value,
            date: draft.date,
        };
        self.scores.push(score.clone());
        Ok(score)
    }

    fn remove_levels<F>(&mut self, doomed: F) -> bool
    where
        F: Fn(&Level) -> bool,
    {
        let ids: Vec<LevelId> = self
            .levels
            .iter()
            .filter(|l| doomed(l))
            .map(|l| l.id)
            .collect();
        self.scores.retain(|s| !ids.contains(&s.level_id));
        self.levels.retain(|l| !ids.contains(&l.id));
        !ids.is_empty()
    }
}

/// Thread-safe scoreboard store implementing all repository ports.
///
/// # Examples
/// ```
/// use gamescoreservice::test_support::InMemoryScoreboard;
///
/// let store = InMemoryScoreboard::seeded();
/// assert_eq!(store.counts(), (3, 3, 9, 27));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryScoreboard {
    state: Mutex<State>,
}

impl InMemoryScoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the sample dataset, scored at
    /// [`super::fixture_timestamp`].
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(dataset) = FixtureDataset::sample() {
            // A fresh store is empty, so loading cannot fail.
            let _summary = store.load(&dataset, super::fixture_timestamp());
        }
        store
    }

    /// Row counts as `(players, games, levels, scores)`.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let state = self.lock();
        (
            state.players.len(),
            state.games.len(),
            state.levels.len(),
            state.scores.len(),
        )
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(
        &self,
        dataset: &FixtureDataset,
        recorded_at: NaiveDateTime,
    ) -> Result<FixtureSummary, FixtureRepositoryError> {
        let mut state = self.lock();
        if !state.players.is_empty() || !state.games.is_empty() {
            return Err(FixtureRepositoryError::not_empty());
        }
        let mut staged = State {
            last_id: state.last_id,
            ..State::default()
        };
        for draft in &dataset.players {
            staged
                .insert_player(draft)
                .map_err(|e| FixtureRepositoryError::query(e.to_string()))?;
        }
        for fixture in &dataset.games {
            let game = staged
                .insert_game(&fixture.game)
                .map_err(|e| FixtureRepositoryError::query(e.to_string()))?;
            for entry in &fixture.levels {
                let level = staged
                    .insert_level(game.id, &entry.level)
                    .map_err(|e| FixtureRepositoryError::query(e.to_string()))?;
                for score in &entry.scores {
                    let player_id = staged
                        .players
                        .iter()
                        .find(|p| p.unique_name == score.player)
                        .map(|p| p.id)
                        .ok_or_else(|| FixtureRepositoryError::query("unknown fixture player"))?;
                    staged
                        .insert_score(&ScoreDraft {
                            level_id: level.id,
                            player_id,
                            value: score.value,
                            date: recorded_at,
                        })
                        .map_err(|e| FixtureRepositoryError::query(e.to_string()))?;
                }
            }
        }
        *state = staged;
        Ok(dataset.summary())
    }
}

#[async_trait]
impl PlayerRepository for InMemoryScoreboard {
    async fn list(&self) -> Result<Vec<Player>, PlayerRepositoryError> {
        Ok(self.lock().players.clone())
    }

    async fn find(
        &self,
        unique_name: &UniqueName,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        Ok(self
            .lock()
            .players
            .iter()
            .find(|p| &p.unique_name == unique_name)
            .cloned())
    }

    async fn insert(&self, draft: &PlayerDraft) -> Result<Player, PlayerRepositoryError> {
        self.lock().insert_player(draft)
    }

    async fn replace(
        &self,
        current: &UniqueName,
        draft: &PlayerDraft,
    ) -> Result<Option<Player>, PlayerRepositoryError> {
        let mut state = self.lock();
        let Some(id) = state
            .players
            .iter()
            .find(|p| &p.unique_name == current)
            .map(|p| p.id)
        else {
            return Ok(None);
        };
        if state
            .players
            .iter()
            .any(|p| p.id != id && p.unique_name == draft.unique_name)
        {
            return Err(PlayerRepositoryError::duplicate(draft.unique_name.as_str()));
        }
        let updated = Player::from_draft(id, draft.clone());
        if let Some(slot) = state.players.iter_mut().find(|p| p.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete(&self, unique_name: &UniqueName) -> Result<bool, PlayerRepositoryError> {
        let mut state = self.lock();
        let Some(id) = state
            .players
            .iter()
            .find(|p| &p.unique_name == unique_name)
            .map(|p| p.id)
        else {
            return Ok(false);
        };
        state.scores.retain(|s| s.player_id != id);
        state.players.retain(|p| p.id != id);
        Ok(true)
    }
}

#[async_trait]
impl GameRepository for InMemoryScoreboard {
    async fn list(&self) -> Result<Vec<Game>, GameRepositoryError> {
        Ok(self.lock().games.clone())
    }

    async fn find(&self, name: &ResourceName) -> Result<Option<Game>, GameRepositoryError> {
        Ok(self.lock().games.iter().find(|g| &g.name == name).cloned())
    }

    async fn insert(&self, draft: &GameDraft) -> Result<Game, GameRepositoryError> {
        self.lock().insert_game(draft)
    }

    async fn replace(
        &self,
        current: &ResourceName,
        draft: &GameDraft,
    ) -> Result<Option<Game>, GameRepositoryError> {
        let mut state = self.lock();
        let Some(id) = state.games.iter().find(|g| &g.name == current).map(|g| g.id) else {
            return Ok(None);
        };
        if state
            .games
            .iter()
            .any(|g| g.id != id && g.name == draft.name)
        {
            return Err(GameRepositoryError::duplicate(draft.name.as_str()));
        }
        let updated = Game::from_draft(id, draft.clone());
        if let Some(slot) = state.games.iter_mut().find(|g| g.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete(&self, name: &ResourceName) -> Result<bool, GameRepositoryError> {
        let mut state = self.lock();
        let Some(id) = state.games.iter().find(|g| &g.name == name).map(|g| g.id) else {
            return Ok(false);
        };
        state.remove_levels(|l| l.game_id == id);
        state.games.retain(|g| g.id != id);
        Ok(true)
    }
}

#[async_trait]
impl LevelRepository for InMemoryScoreboard {
    async fn list_for_game(&self, game_id: GameId) -> Result<Vec<Level>, LevelRepositoryError> {
        Ok(self
            .lock()
            .levels
            .iter()
            .filter(|l| l.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        game_id: GameId,
        name: &ResourceName,
    ) -> Result<Option<Level>, LevelRepositoryError> {
        Ok(self
            .lock()
            .levels
            .iter()
            .find(|l| l.game_id == game_id && &l.name == name)
            .cloned())
    }

    async fn insert(
        &self,
        game_id: GameId,
        draft: &LevelDraft,
    ) -> Result<Level, LevelRepositoryError> {
        self.lock().insert_level(game_id, draft)
    }

    async fn replace(
        &self,
        id: LevelId,
        draft: &LevelDraft,
    ) -> Result<Option<Level>, LevelRepositoryError> {
        let mut state = self.lock();
        let Some(game_id) = state.levels.iter().find(|l| l.id == id).map(|l| l.game_id) else {
            return Ok(None);
        };
        if state
            .levels
            .iter()
            .any(|l| l.id != id && l.game_id == game_id && l.name == draft.name)
        {
            return Err(LevelRepositoryError::duplicate(draft.name.as_str()));
        }
        let updated = Level::from_draft(id, game_id, draft.clone());
        if let Some(slot) = state.levels.iter_mut().find(|l| l.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete(&self, id: LevelId) -> Result<bool, LevelRepositoryError> {
        Ok(self.lock().remove_levels(|l| l.id == id))
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreboard {
    async fn list_for_level(
        &self,
        level_id: LevelId,
    ) -> Result<Vec<ScoreView>, ScoreRepositoryError> {
        Ok(self.lock().views(|s| s.level_id == level_id))
    }

    async fn list_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<ScoreView>, ScoreRepositoryError> {
        Ok(self.lock().views(|s| s.player_id == player_id))
    }

    async fn find(
        &self,
        level_id: LevelId,
        player_id: PlayerId,
    ) -> Result<Option<ScoreView>, ScoreRepositoryError> {
        Ok(self
            .lock()
            .views(|s| s.level_id == level_id && s.player_id == player_id)
            .into_iter()
            .next())
    }

    async fn insert(&self, draft: &ScoreDraft) -> Result<Score, ScoreRepositoryError> {
        self.lock().insert_score(draft)
    }

    async fn replace(
        &self,
        id: ScoreId,
        value: i64,
        date: NaiveDateTime,
    ) -> Result<Option<Score>, ScoreRepositoryError> {
        let mut state = self.lock();
        Ok(state.scores.iter_mut().find(|s| s.id == id).map(|slot| {
            slot.value = value;
            slot.date = date;
            slot.clone()
        }))
    }

    async fn delete(&self, id: ScoreId) -> Result<bool, ScoreRepositoryError> {
        let mut state = self.lock();
        let before = state.scores.len();
        state.scores.retain(|s| s.id != id);
        Ok(state.scores.len() != before)
    }
}

#[async_trait]
impl FixtureRepository for InMemoryScoreboard {
    async fn populate(
        &self,
        dataset: &FixtureDataset,
        recorded_at: NaiveDateTime,
    ) -> Result<FixtureSummary, FixtureRepositoryError> {
        self.load(dataset, recorded_at)
    }
}
