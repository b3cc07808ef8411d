//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! hold no business rules. Connections come from a `bb8` pool through
//! `diesel-async`; the schema is created by embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use gamescoreservice::outbound::persistence::{DbPool, DieselPlayerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/scores")).await?;
//! let players = DieselPlayerRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_fixture_repository;
mod diesel_game_repository;
mod diesel_level_repository;
mod diesel_player_repository;
mod diesel_score_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_fixture_repository::DieselFixtureRepository;
pub use diesel_game_repository::DieselGameRepository;
pub use diesel_level_repository::DieselLevelRepository;
pub use diesel_player_repository::DieselPlayerRepository;
pub use diesel_score_repository::DieselScoreRepository;
pub use migrations::{MigrationError, initialise_schema, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
