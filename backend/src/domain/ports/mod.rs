//! Domain ports for the hexagonal boundary.
//!
//! Repository traits are driven ports implemented by outbound adapters.
//! Query and command traits are driving ports consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod fixture_repository;
mod game_repository;
mod games;
mod level_repository;
mod levels;
mod player_repository;
mod players;
mod score_repository;
mod scores;

#[cfg(test)]
pub use fixture_repository::MockFixtureRepository;
pub use fixture_repository::{FixtureRepository, FixtureRepositoryError};
#[cfg(test)]
pub use game_repository::MockGameRepository;
pub use game_repository::{GameRepository, GameRepositoryError};
#[cfg(test)]
pub use games::{MockGamesCommand, MockGamesQuery};
pub use games::{GamesCommand, GamesQuery};
#[cfg(test)]
pub use level_repository::MockLevelRepository;
pub use level_repository::{LevelRepository, LevelRepositoryError};
#[cfg(test)]
pub use levels::{MockLevelsCommand, MockLevelsQuery};
pub use levels::{LevelsCommand, LevelsQuery};
#[cfg(test)]
pub use player_repository::MockPlayerRepository;
pub use player_repository::{PlayerRepository, PlayerRepositoryError};
#[cfg(test)]
pub use players::{MockPlayersCommand, MockPlayersQuery};
pub use players::{PlayersCommand, PlayersQuery};
#[cfg(test)]
pub use score_repository::MockScoreRepository;
pub use score_repository::{ScoreRepository, ScoreRepositoryError};
#[cfg(test)]
pub use scores::{MockScoresCommand, MockScoresQuery};
pub use scores::{ScoreKey, ScoresCommand, ScoresQuery};
