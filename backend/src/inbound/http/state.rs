//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    GameRepository, GamesCommand, GamesQuery, LevelRepository, LevelsCommand, LevelsQuery,
    PlayerRepository, PlayersCommand, PlayersQuery, ScoreRepository, ScoresCommand, ScoresQuery,
};
use crate::domain::{GameService, LevelService, PlayerService, ScoreService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub players_query: Arc<dyn PlayersQuery>,
    pub players: Arc<dyn PlayersCommand>,
    pub games_query: Arc<dyn GamesQuery>,
    pub games: Arc<dyn GamesCommand>,
    pub levels_query: Arc<dyn LevelsQuery>,
    pub levels: Arc<dyn LevelsCommand>,
    pub scores_query: Arc<dyn ScoresQuery>,
    pub scores: Arc<dyn ScoresCommand>,
}

/// Repository adapters backing every use-case.
pub struct Repositories<P, G, L, S> {
    pub players: Arc<P>,
    pub games: Arc<G>,
    pub levels: Arc<L>,
    pub scores: Arc<S>,
}

impl HttpState {
    /// Wire the domain services on top of `repos`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use gamescoreservice::inbound::http::state::{HttpState, Repositories};
    /// use gamescoreservice::test_support::{InMemoryScoreboard, fixed_clock};
    ///
    /// let store = Arc::new(InMemoryScoreboard::new());
    /// let _state = HttpState::from_repositories(
    ///     Repositories {
    ///         players: store.clone(),
    ///         games: store.clone(),
    ///         levels: store.clone(),
    ///         scores: store,
    ///     },
    ///     fixed_clock(),
    /// );
    /// ```
    pub fn from_repositories<P, G, L, S>(
        repos: Repositories<P, G, L, S>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        P: PlayerRepository + 'static,
        G: GameRepository + 'static,
        L: LevelRepository + 'static,
        S: ScoreRepository + 'static,
    {
        let Repositories {
            players,
            games,
            levels,
            scores,
        } = repos;
        let player_service = Arc::new(PlayerService::new(players.clone()));
        let game_service = Arc::new(GameService::new(games.clone()));
        let level_service = Arc::new(LevelService::new(games.clone(), levels.clone()));
        let score_service = Arc::new(ScoreService::new(
            LevelService::new(games, levels),
            players,
            scores,
            clock,
        ));

        Self {
            players_query: player_service.clone(),
            players: player_service,
            games_query: game_service.clone(),
            games: game_service,
            levels_query: level_service.clone(),
            levels: level_service,
            scores_query: score_service.clone(),
            scores: score_service,
        }
    }
}
